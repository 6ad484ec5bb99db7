//! TCP session handling for Platinum controllers
//!
//! The controller speaks one command/response exchange per connection and
//! opens every exchange with an identification banner line.

use crate::error::{PlatinumError, Result};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, trace};

/// One TCP session against a controller
///
/// Dropping the session closes the underlying connection.
pub struct Session {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    address: String,
}

impl Session {
    /// Open a session: connect over IPv4, arm the read deadline, and
    /// consume the banner line
    pub fn open(address: &str, read_timeout: Duration) -> Result<Self> {
        let target = address
            .to_socket_addrs()
            .map_err(|e| PlatinumError::connection(format!("Failed to resolve {address}: {e}")))?
            .find(|addr| addr.is_ipv4())
            .ok_or_else(|| {
                PlatinumError::connection(format!("No IPv4 address found for {address}"))
            })?;

        let stream = TcpStream::connect_timeout(&target, read_timeout)
            .map_err(|e| PlatinumError::connection(format!("Failed to connect to {address}: {e}")))?;
        stream.set_read_timeout(Some(read_timeout))?;

        let writer = BufWriter::new(stream.try_clone()?);
        let mut session = Self {
            reader: BufReader::new(stream),
            writer,
            address: address.to_string(),
        };

        let banner = session.read_line()?.ok_or_else(|| {
            PlatinumError::connection(format!("{address} closed before sending banner"))
        })?;
        debug!("Connected to {address}, banner: {banner:?}");
        Ok(session)
    }

    /// Read one line with the trailing newline stripped
    ///
    /// Returns `None` when the controller closes the connection. Deadline
    /// expiry surfaces as [`PlatinumError::Timeout`].
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                trace!("<- {line:?}");
                Ok(Some(line))
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Err(
                PlatinumError::timeout(format!("Read from {} timed out", self.address)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a command token and flush it as one unit
    ///
    /// Commands carry no line terminator on the wire.
    pub fn send(&mut self, command: &str) -> Result<()> {
        trace!("-> {command:?}");
        self.writer.write_all(command.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// The `host:port` this session is bound to
    pub fn address(&self) -> &str {
        &self.address
    }
}
