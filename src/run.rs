//! Application execution logic.
//!
//! Connects to the monitor, discovers the guest's network devices,
//! resolves their addresses and writes the CSV report to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use qmp_netaddrs::config::ValidatedConfig;
use qmp_netaddrs::neighbor::NeighborSource;
use qmp_netaddrs::qmp::{Monitor, QmpError, WalkError, discover_network_devices};
use qmp_netaddrs::report::{build_report, write_report};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The monitor socket could not be reached or the handshake failed.
    #[error("Cannot connect to QMP monitor at {}: {source}", path.display())]
    Connect {
        /// Socket path
        path: PathBuf,
        /// Underlying monitor error
        #[source]
        source: QmpError,
    },

    /// Device discovery failed; nothing can be reported.
    #[error("Cannot retrieve network devices from QMP monitor: {0}")]
    Discover(#[source] WalkError),

    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Output(#[source] io::Error),

    /// QMP sockets are Unix domain sockets.
    #[cfg(not(unix))]
    #[error("QMP Unix sockets are not supported on this platform")]
    Unsupported,
}

/// Executes one report run.
///
/// # Errors
///
/// Returns an error if:
/// - The monitor cannot be reached
/// - Device discovery fails
/// - The report cannot be written
///
/// Per-device address lookups never fail the run.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires a live
/// monitor socket.
#[cfg(all(unix, not(tarpaulin_include)))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    use qmp_netaddrs::neighbor::FileTable;
    use qmp_netaddrs::qmp::SocketMonitor;

    let mut monitor =
        SocketMonitor::connect(&config.socket, config.timeout).map_err(|source| {
            RunError::Connect {
                path: config.socket.clone(),
                source,
            }
        })?;
    tracing::debug!("Connected to QMP monitor at {}", config.socket.display());

    let table = FileTable::new(&config.neighbor_table);
    let mut out = io::stdout().lock();

    let count = generate_report(&mut monitor, &table, &config.device_filter, &mut out)?;
    tracing::debug!("Reported {count} network device(s)");

    Ok(())
}

/// Executes one report run.
///
/// # Errors
///
/// Always fails: the monitor transport needs Unix domain sockets.
#[cfg(not(unix))]
pub fn execute(_config: &ValidatedConfig) -> Result<(), RunError> {
    Err(RunError::Unsupported)
}

/// Discovers devices, resolves their addresses and writes the report.
///
/// Returns the number of data rows written.
#[cfg_attr(not(unix), allow(dead_code))]
fn generate_report<M, S, W>(
    monitor: &mut M,
    table: &S,
    device_filter: &str,
    out: &mut W,
) -> Result<usize, RunError>
where
    M: Monitor,
    S: NeighborSource + ?Sized,
    W: Write,
{
    let devices = discover_network_devices(monitor).map_err(RunError::Discover)?;
    tracing::debug!("Discovered {} network device(s)", devices.len());

    let rows = build_report(devices, table, device_filter);
    write_report(out, &rows).map_err(RunError::Output)?;

    Ok(rows.len())
}
