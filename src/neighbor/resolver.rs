//! MAC address to IPv4 address resolution.

use std::io::{self, BufRead};
use std::net::{AddrParseError, Ipv4Addr};
use std::num::ParseIntError;

use thiserror::Error;

use super::{NeighborEntry, NeighborSource};

/// Error type for neighbor resolution.
///
/// All variants are terminal for one lookup only. [`ResolveError::NotFound`]
/// is the expected outcome for a guest that has not talked to the host yet.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The table could not be opened.
    #[error("Failed to open neighbor table {table}: {source}")]
    Open {
        /// Description of the table (usually its path).
        table: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading a line of the table failed.
    #[error("Failed to read neighbor table {table}: {source}")]
    Read {
        /// Description of the table.
        table: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The flags column of a matching row is not an integer.
    #[error("Failed to parse neighbor table flags field '{value}': {source}")]
    InvalidFlags {
        /// The raw flags column.
        value: String,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The address column of the matching row is not an IPv4 address.
    #[error("Invalid IPv4 address '{value}' in neighbor table: {source}")]
    InvalidAddress {
        /// The raw address column.
        value: String,
        /// Underlying parse error.
        #[source]
        source: AddrParseError,
    },

    /// No complete entry exists for the MAC address.
    #[error("Could not find {mac} in neighbor table")]
    NotFound {
        /// The MAC address that was looked up.
        mac: String,
    },
}

impl ResolveError {
    /// Returns true if the lookup simply found no usable entry.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Finds the IPv4 address currently bound to `mac_address`.
///
/// The first row whose hardware address equals `mac_address` exactly
/// (no case or separator normalization) and whose complete flag is set
/// wins. Incomplete rows for the same MAC are skipped. An empty
/// `device_filter` accepts every host interface; otherwise the device
/// column must equal it exactly.
///
/// # Errors
///
/// Returns [`ResolveError`] when the table cannot be opened or read,
/// when the flags of a matching row are malformed, or when no complete
/// row exists ([`ResolveError::NotFound`]).
pub fn resolve_ip_address<S: NeighborSource + ?Sized>(
    source: &S,
    device_filter: &str,
    mac_address: &str,
) -> Result<Ipv4Addr, ResolveError> {
    let reader = source.open().map_err(|e| ResolveError::Open {
        table: source.describe(),
        source: e,
    })?;
    let read_error = |e| ResolveError::Read {
        table: source.describe(),
        source: e,
    };

    // Interface names are raw bytes, so rows are decoded leniently one by one.
    let mut lines = reader.split(b'\n');
    if let Some(header) = lines.next() {
        header.map_err(read_error)?;
    }

    for line in lines {
        let line = line.map_err(read_error)?;
        let line = String::from_utf8_lossy(&line);
        let Some(entry) = NeighborEntry::parse(&line) else {
            tracing::trace!("Skipping short neighbor table line: {line:?}");
            continue;
        };

        if !device_filter.is_empty() && entry.device != device_filter {
            continue;
        }
        if entry.hardware_address != mac_address {
            continue;
        }

        let complete = entry
            .is_complete()
            .map_err(|e| ResolveError::InvalidFlags {
                value: entry.flags.to_string(),
                source: e,
            })?;
        if !complete {
            tracing::trace!(
                "Skipping incomplete entry {} for {mac_address}",
                entry.ip_address
            );
            continue;
        }

        return entry
            .ip_address
            .parse()
            .map_err(|e| ResolveError::InvalidAddress {
                value: entry.ip_address.to_string(),
                source: e,
            });
    }

    Err(ResolveError::NotFound {
        mac: mac_address.to_string(),
    })
}
