//! Host neighbor table layer.
//!
//! This module provides:
//! - Opening the table ([`NeighborSource`], [`FileTable`])
//! - Splitting rows into columns ([`NeighborEntry`], [`parse_flags`])
//! - Resolving a MAC address to an IPv4 address ([`resolve_ip_address`])
//!
//! Only the IPv4 table (`/proc/net/arp`) is understood.

mod resolver;
mod table;


pub use resolver::{ResolveError, resolve_ip_address};
pub use table::{ATF_COM, FileTable, NeighborEntry, NeighborSource, parse_flags};
