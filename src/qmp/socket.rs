//! Blocking QMP client over a Unix domain socket.

use std::io::{BufRead, BufReader, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use socket2::{Domain, SockAddr, Socket, Type};

use super::command::Request;
use super::{Monitor, QmpError};

/// The `error` member of a failed command.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    class: String,
    desc: String,
}

/// A connected QMP monitor.
///
/// The connection is in command mode once constructed: the greeting has
/// been consumed and capabilities negotiation has completed. The socket
/// is shut down on drop.
#[derive(Debug)]
pub struct SocketMonitor {
    reader: BufReader<UnixStream>,
    writer: UnixStream,
}

impl SocketMonitor {
    /// Connects to the monitor socket at `path`.
    ///
    /// `timeout` bounds the connect itself and every read and write on
    /// the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be reached in time or the QMP
    /// handshake fails.
    pub fn connect(path: &Path, timeout: Duration) -> Result<Self, QmpError> {
        let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
        socket.connect_timeout(&SockAddr::unix(path)?, timeout)?;

        let stream = UnixStream::from(socket);
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        Self::handshake(stream)
    }

    /// Performs the QMP handshake on an already connected stream.
    ///
    /// # Errors
    ///
    /// Returns [`QmpError::Greeting`] if the peer does not open with a
    /// QMP greeting, or any error from the `qmp_capabilities` exchange.
    pub fn handshake(stream: UnixStream) -> Result<Self, QmpError> {
        let writer = stream.try_clone()?;
        let mut monitor = Self {
            reader: BufReader::new(stream),
            writer,
        };

        let greeting = monitor.read_message()?;
        let Some(banner) = greeting.get("QMP") else {
            return Err(QmpError::Greeting(greeting.to_string()));
        };
        tracing::debug!("QMP greeting: {banner}");

        monitor.run(&Request::Capabilities)?;
        Ok(monitor)
    }

    /// Reads the next non-empty line and parses it as JSON.
    fn read_message(&mut self) -> Result<Value, QmpError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(QmpError::Closed);
            }
            if !line.trim().is_empty() {
                return Ok(serde_json::from_str(&line)?);
            }
        }
    }
}

impl Monitor for SocketMonitor {
    fn run<C: Serialize>(&mut self, command: &C) -> Result<Value, QmpError> {
        let mut payload = serde_json::to_vec(command)?;
        payload.push(b'\n');
        self.writer.write_all(&payload)?;
        self.writer.flush()?;

        loop {
            let message = self.read_message()?;

            if let Some(event) = message.get("event") {
                tracing::trace!("Skipping asynchronous QMP event {event}");
                continue;
            }

            if let Some(error) = message.get("error") {
                let body: ErrorBody = serde_json::from_value(error.clone())?;
                return Err(QmpError::Command {
                    class: body.class,
                    desc: body.desc,
                });
            }

            return Ok(message);
        }
    }
}

impl Drop for SocketMonitor {
    fn drop(&mut self) {
        if let Err(e) = self.writer.shutdown(Shutdown::Both) {
            tracing::trace!("Ignoring socket shutdown error: {e}");
        }
    }
}
