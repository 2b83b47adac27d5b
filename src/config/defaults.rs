//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default host neighbor table (Linux IPv4 ARP cache).
pub const NEIGHBOR_TABLE: &str = "/proc/net/arp";

/// Default monitor connect and I/O timeout in seconds.
pub const TIMEOUT_SECS: u64 = 2;

/// Default monitor timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
