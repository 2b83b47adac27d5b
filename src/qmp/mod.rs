//! Machine monitor (QMP) layer.
//!
//! This module provides types and traits for:
//! - Issuing monitor commands ([`Monitor`], [`QmpError`])
//! - The `qom-list` / `qom-get` wire shapes ([`command`])
//! - Representing guest network devices ([`NetworkDevice`])
//! - Walking the object model for network devices ([`discover_network_devices`])
//! - A blocking Unix socket client ([`SocketMonitor`], unix only)

pub mod command;
mod device;
#[cfg(unix)]
mod socket;
mod transport;
mod walker;


pub use device::NetworkDevice;
#[cfg(unix)]
pub use socket::SocketMonitor;
pub use transport::{Monitor, QmpError};
pub use walker::{PERIPHERAL_ROOTS, WalkError, discover_network_devices, is_containment_edge};
