//! Discovery of network devices in the guest object model.
//!
//! The walk is deliberately two levels deep: each peripheral root is
//! listed, every child object found there is listed once more, and
//! objects carrying a `netdev` property are read into a
//! [`NetworkDevice`]. Nothing below that level is visited.

use thiserror::Error;

use super::command::{ObjectProperty, Request, decode_return};
use super::{Monitor, NetworkDevice, QmpError};

/// Roots under which user-created devices live, in iteration order.
///
/// Named peripherals (`-device ...,id=net0`) come first, devices created
/// without an id follow.
pub const PERIPHERAL_ROOTS: [&str; 2] = ["/machine/peripheral", "/machine/peripheral-anon"];

/// Type tag prefix marking a containment edge (`child<virtio-net-pci>`).
const CONTAINMENT_PREFIX: &str = "child<";

const TYPE_PROPERTY: &str = "type";
const NETDEV_PROPERTY: &str = "netdev";
const MAC_PROPERTY: &str = "mac";

/// Error type for device discovery.
///
/// Any failure aborts the whole walk; no partial device list is returned.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Listing the children of an object failed.
    #[error("Failed to list objects at {path}: {source}")]
    List {
        /// Object-model path that was being listed.
        path: String,
        /// Underlying monitor error.
        #[source]
        source: QmpError,
    },

    /// Reading a device property failed.
    #[error("Failed to get property '{property}' of {path}: {source}")]
    Get {
        /// Object-model path of the device.
        path: String,
        /// Property being read.
        property: String,
        /// Underlying monitor error.
        #[source]
        source: QmpError,
    },
}

impl WalkError {
    /// Returns the object-model path the failing request targeted.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::List { path, .. } | Self::Get { path, .. } => path,
        }
    }
}

/// Returns true if a `qom-list` type tag denotes a child object rather
/// than a plain property.
#[must_use]
pub fn is_containment_edge(type_name: &str) -> bool {
    type_name.starts_with(CONTAINMENT_PREFIX)
}

/// Discovers every network device attached to the guest.
///
/// Devices are returned in root order ([`PERIPHERAL_ROOTS`]), then in the
/// order the monitor lists them. Objects without a `netdev` property are
/// skipped silently.
///
/// # Errors
///
/// Returns [`WalkError`] naming the path (and property) of the first
/// request that failed or produced an unexpected answer.
pub fn discover_network_devices<M: Monitor>(
    monitor: &mut M,
) -> Result<Vec<NetworkDevice>, WalkError> {
    let mut devices = Vec::new();

    for root in PERIPHERAL_ROOTS {
        let children = list_objects(monitor, root)?;
        tracing::debug!("{root}: {} entries", children.len());

        for child in children {
            if !is_containment_edge(&child.type_name) {
                continue;
            }

            let path = format!("{root}/{}", child.name);
            if let Some(device) = inspect_object(monitor, path)? {
                tracing::debug!("Found network device {device}");
                devices.push(device);
            }
        }
    }

    Ok(devices)
}

/// Reads the object at `path` into a device if it has a `netdev` property.
fn inspect_object<M: Monitor>(
    monitor: &mut M,
    path: String,
) -> Result<Option<NetworkDevice>, WalkError> {
    let properties = list_objects(monitor, &path)?;

    if !properties.iter().any(|p| p.name == NETDEV_PROPERTY) {
        tracing::trace!("{path} has no netdev property, skipping");
        return Ok(None);
    }

    let mut device = NetworkDevice {
        path,
        ..NetworkDevice::default()
    };

    for property in &properties {
        let slot = match property.name.as_str() {
            TYPE_PROPERTY => &mut device.kind,
            NETDEV_PROPERTY => &mut device.name,
            MAC_PROPERTY => &mut device.mac_address,
            _ => continue,
        };
        *slot = get_property(monitor, &device.path, &property.name)?;
    }

    Ok(Some(device))
}

fn list_objects<M: Monitor>(monitor: &mut M, path: &str) -> Result<Vec<ObjectProperty>, WalkError> {
    let to_error = |source| WalkError::List {
        path: path.to_string(),
        source,
    };

    let response = monitor
        .run(&Request::QomList { path })
        .map_err(to_error)?;

    decode_return(response).map_err(|e| to_error(QmpError::Malformed(e)))
}

fn get_property<M: Monitor>(
    monitor: &mut M,
    path: &str,
    property: &str,
) -> Result<String, WalkError> {
    let to_error = |source| WalkError::Get {
        path: path.to_string(),
        property: property.to_string(),
        source,
    };

    let response = monitor
        .run(&Request::QomGet { path, property })
        .map_err(to_error)?;

    decode_return(response).map_err(|e| to_error(QmpError::Malformed(e)))
}
