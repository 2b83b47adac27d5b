//! CSV report of discovered devices and their addresses.
//!
//! Quoting follows the usual CSV writer rule: a field is wrapped in double
//! quotes only when it contains a delimiter, a quote or a line break, or
//! starts with whitespace. Records end with `\n`.

use std::borrow::Cow;
use std::io::{self, Write};
use std::net::Ipv4Addr;

use crate::neighbor::{NeighborSource, resolve_ip_address};
use crate::qmp::NetworkDevice;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Column names of the report, in output order.
pub const HEADER: [&str; 5] = ["Name", "Type", "MacAddress", "IpAddress", "Path"];

/// One device together with the address resolved for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// The discovered device.
    pub device: NetworkDevice,
    /// Its current IPv4 address, `None` when resolution failed.
    pub ip_address: Option<Ipv4Addr>,
}

impl ReportRow {
    /// Creates a row from a device and an optional address.
    #[must_use]
    pub const fn new(device: NetworkDevice, ip_address: Option<Ipv4Addr>) -> Self {
        Self { device, ip_address }
    }
}

/// Resolves the address of every device.
///
/// Resolution is best effort: a failure for one device leaves its
/// address empty and never affects the others.
pub fn build_report<S: NeighborSource + ?Sized>(
    devices: Vec<NetworkDevice>,
    table: &S,
    device_filter: &str,
) -> Vec<ReportRow> {
    devices
        .into_iter()
        .map(|device| {
            let ip_address = match resolve_ip_address(table, device_filter, &device.mac_address) {
                Ok(ip) => Some(ip),
                Err(e) if e.is_not_found() => {
                    tracing::debug!("{}: {e}", device.name);
                    None
                }
                Err(e) => {
                    tracing::warn!("Cannot resolve address of {}: {e}", device.name);
                    None
                }
            };
            ReportRow::new(device, ip_address)
        })
        .collect()
}

/// Writes the header and one record per row.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_report<W: Write>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    write_record(out, &HEADER)?;

    for row in rows {
        let device = &row.device;
        let ip_address = row.ip_address.map(|ip| ip.to_string()).unwrap_or_default();
        write_record(
            out,
            &[
                &device.name,
                &device.kind,
                &device.mac_address,
                &ip_address,
                &device.path,
            ],
        )?;
    }

    out.flush()
}

fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if needs_quotes(field) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn needs_quotes(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    // A lone `\.` would be read as end-of-data by some importers.
    if field == r"\." {
        return true;
    }
    field.contains([',', '"', '\r', '\n']) || field.starts_with(char::is_whitespace)
}
