//! qmp-netaddrs: guest network devices and their host-side addresses.
//!
//! A library for discovering the network devices of a QEMU guest through
//! its QMP object model and resolving their IPv4 addresses from the host
//! neighbor table.

pub mod config;
pub mod neighbor;
pub mod qmp;
pub mod report;
