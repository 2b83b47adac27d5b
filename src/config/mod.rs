//! Configuration layer for qmp-netaddrs.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Home directory expansion for paths ([`expand_home`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The socket path has no default and must come from the command line or
//! the `monitor.socket` key.
//!
//! # Device Filter
//!
//! The neighbor device filter defaults to empty, which accepts entries
//! learned on any host interface.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, USAGE};
pub use error::{ConfigError, field};
pub use toml::{MonitorSection, NeighborSection, TomlConfig};
pub use validated::{ValidatedConfig, expand_home};
