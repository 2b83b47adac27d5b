//! Guest network device representation.

use std::fmt;

/// A network interface discovered in the guest's object model.
///
/// Built fresh from monitor answers on every discovery and never
/// modified afterwards. Values are kept exactly as the monitor served
/// them; the MAC address in particular is not normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDevice {
    /// Object-model path, e.g. `/machine/peripheral/net0`.
    pub path: String,
    /// Backend network device identifier (the `netdev` property).
    pub name: String,
    /// Device model (the `type` property), e.g. `virtio-net-pci`.
    pub kind: String,
    /// MAC address as reported by the guest (the `mac` property).
    pub mac_address: String,
}

impl NetworkDevice {
    /// Creates a new device record.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        mac_address: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: kind.into(),
            mac_address: mac_address.into(),
        }
    }
}

impl fmt::Display for NetworkDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) at {}",
            self.name, self.kind, self.mac_address, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_device_with_correct_fields() {
        let device = NetworkDevice::new(
            "/machine/peripheral/net0",
            "hostnet0",
            "virtio-net-pci",
            "52:54:00:12:34:56",
        );

        assert_eq!(device.path, "/machine/peripheral/net0");
        assert_eq!(device.name, "hostnet0");
        assert_eq!(device.kind, "virtio-net-pci");
        assert_eq!(device.mac_address, "52:54:00:12:34:56");
    }

    #[test]
    fn display_includes_name_and_path() {
        let device = NetworkDevice::new("/machine/peripheral/net0", "net0", "e1000", "aa:bb");
        assert_eq!(
            device.to_string(),
            "net0 (e1000, aa:bb) at /machine/peripheral/net0"
        );
    }
}
