//! Monitor request/response trait and error types.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error type for a single QMP exchange.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum QmpError {
    /// Reading from or writing to the monitor failed.
    #[error("Monitor I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The monitor closed the connection before answering.
    #[error("Monitor closed the connection")]
    Closed,

    /// The first message on the connection was not a QMP greeting.
    #[error("Unexpected QMP greeting: {0}")]
    Greeting(String),

    /// The monitor rejected the command.
    #[error("Monitor returned {class}: {desc}")]
    Command {
        /// Error class reported by the monitor (e.g. `GenericError`).
        class: String,
        /// Human readable description.
        desc: String,
    },

    /// A message did not have the expected JSON shape.
    #[error("Malformed monitor response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Trait for issuing commands against a machine monitor.
///
/// # Design
///
/// - The walker only depends on this trait, never on a socket
/// - Enables dependency injection for testing with scripted responses
/// - One outstanding command at a time; `run` blocks until the answer arrives
///
/// # Example
///
/// ```ignore
/// use qmp_netaddrs::qmp::{Monitor, QmpError};
/// use serde_json::{Value, json};
///
/// struct EmptyMonitor;
///
/// impl Monitor for EmptyMonitor {
///     fn run<C: serde::Serialize>(&mut self, _command: &C) -> Result<Value, QmpError> {
///         Ok(json!({ "return": [] }))
///     }
/// }
/// ```
pub trait Monitor {
    /// Sends one command and waits for its response.
    ///
    /// # Returns
    ///
    /// The complete response object, i.e. `{"return": ...}`. Decoding the
    /// `return` member is left to the caller since its shape depends on
    /// the command.
    ///
    /// # Errors
    ///
    /// Returns [`QmpError`] when:
    /// - The command cannot be written or the response cannot be read (`QmpError::Io`)
    /// - The connection is closed mid-exchange (`QmpError::Closed`)
    /// - The monitor answers with an `error` object (`QmpError::Command`)
    /// - The response is not valid JSON (`QmpError::Malformed`)
    fn run<C: Serialize>(&mut self, command: &C) -> Result<Value, QmpError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn command_error_displays_class_and_description() {
        let error = QmpError::Command {
            class: "GenericError".to_string(),
            desc: "Device 'nope' not found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Monitor returned GenericError: Device 'nope' not found"
        );
    }

    #[test]
    fn closed_displays_message() {
        assert_eq!(
            QmpError::Closed.to_string(),
            "Monitor closed the connection"
        );
    }

    #[test]
    fn io_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let error: QmpError = io.into();

        assert!(matches!(error, QmpError::Io(_)));
        assert!(error.source().unwrap().to_string().contains("timed out"));
    }

    #[test]
    fn malformed_converts_from_serde_error() {
        let serde_error = serde_json::from_str::<Value>("{not json").unwrap_err();
        let error: QmpError = serde_error.into();

        assert!(error.to_string().starts_with("Malformed monitor response"));
    }
}
