//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// QMP socket path, home directory already expanded (required)
    pub socket: PathBuf,

    /// Monitor connect and I/O timeout
    pub timeout: Duration,

    /// Neighbor table path
    pub neighbor_table: PathBuf,

    /// Host interface filter; empty matches every interface
    pub device_filter: String,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = if self.device_filter.is_empty() {
            "any"
        } else {
            self.device_filter.as_str()
        };

        write!(
            f,
            "Config {{ socket: {}, timeout: {}s, neighbor_table: {}, device: {} }}",
            self.socket.display(),
            self.timeout.as_secs(),
            self.neighbor_table.display(),
            device,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The socket path is missing
    /// - A `~` path cannot be expanded
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let socket = Self::resolve_socket(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let neighbor_table = Self::resolve_neighbor_table(cli, toml)?;

        let device_filter = cli
            .device
            .clone()
            .or_else(|| toml.and_then(|t| t.neighbor.device.clone()))
            .unwrap_or_default();

        Ok(Self {
            socket,
            timeout,
            neighbor_table,
            device_filter,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_socket(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let socket = cli
            .socket
            .as_ref()
            .or_else(|| toml.and_then(|t| t.monitor.socket.as_ref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SOCKET,
                    "Pass the QMP socket path or set monitor.socket in config file",
                )
            })?;

        expand_home(socket)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let secs = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.monitor.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Duration::from_secs(secs))
    }

    fn resolve_neighbor_table(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<PathBuf, ConfigError> {
        match cli
            .neighbor_table
            .as_ref()
            .or_else(|| toml.and_then(|t| t.neighbor.table.as_ref()))
        {
            Some(path) => expand_home(path),
            None => Ok(PathBuf::from(defaults::NEIGHBOR_TABLE)),
        }
    }
}

/// Expands a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are supported; `~user` forms are rejected.
/// Paths that do not start with `~` are returned unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::HomeExpansion`] for `~user` paths or when the
/// home directory cannot be determined.
pub fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let Some(text) = path.to_str() else {
        return Ok(path.to_path_buf());
    };
    let Some(rest) = text.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    let expansion_error = |reason| ConfigError::HomeExpansion {
        path: text.to_string(),
        reason,
    };

    let rest = if rest.is_empty() {
        rest
    } else {
        rest.strip_prefix(['/', '\\'])
            .ok_or_else(|| expansion_error("user-specific home directories are not supported"))?
    };

    let home = dirs::home_dir().ok_or_else(|| expansion_error("home directory is unknown"))?;

    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
