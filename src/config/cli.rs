//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options.

use std::path::PathBuf;

use clap::Parser;

/// Usage line shown in help and error hints.
///
/// The socket may also come from the config file, so the argument itself
/// is optional to clap.
pub const USAGE: &str = "qmp-netaddrs [OPTIONS] <QMP-SOCKET-ADDRESS>";

/// Lists the network devices of a QEMU guest and their IPv4 addresses.
///
/// Devices are read from the guest object model over QMP; addresses are
/// looked up in the host neighbor table. The report is written to stdout
/// as CSV.
#[derive(Debug, Parser)]
#[command(name = "qmp-netaddrs")]
#[command(version, about, long_about = None)]
#[command(override_usage = USAGE)]
pub struct Cli {
    /// Path to the QMP socket (`~` is expanded)
    #[arg(value_name = "QMP-SOCKET-ADDRESS")]
    pub socket: Option<PathBuf>,

    /// Neighbor table to read addresses from
    #[arg(long = "neighbor-table", value_name = "PATH")]
    pub neighbor_table: Option<PathBuf>,

    /// Only use neighbor entries learned on this host interface
    #[arg(long, value_name = "IFACE")]
    pub device: Option<String>,

    /// Monitor connect and I/O timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
