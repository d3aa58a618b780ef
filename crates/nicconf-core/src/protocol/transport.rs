//! Byte transport to the device
//!
//! The driver only needs four primitives from a connection. [`SerialTransport`]
//! provides them over a real serial port; tests provide in-memory versions.

use serialport::SerialPort;
use std::io::{Read, Write};

use super::{serial::open_port, ConnectionConfig, ProtocolError};

/// An open, exclusively owned connection to the device
pub trait Transport {
    /// Write all of `bytes`, blocking until they are handed to the port
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), ProtocolError>;

    /// Number of received bytes waiting to be read, without blocking
    fn bytes_available(&mut self) -> Result<usize, ProtocolError>;

    /// Read up to `max` bytes, bounded by the port's read timeout
    fn read(&mut self, max: usize) -> Result<Vec<u8>, ProtocolError>;

    /// Release the connection. Later calls on the transport fail.
    fn close(&mut self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> Result<usize, ProtocolError> {
        (**self).bytes_available()
    }

    fn read(&mut self, max: usize) -> Result<Vec<u8>, ProtocolError> {
        (**self).read(max)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// [`Transport`] over a `serialport` handle
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
}

impl SerialTransport {
    /// Open the port described by `config`
    pub fn open(config: &ConnectionConfig) -> Result<Self, ProtocolError> {
        let port = open_port(config)?;
        tracing::info!(
            "Connected to {} at {} baud",
            config.port_name,
            config.baud_rate
        );
        Ok(Self::from_port(port, config.port_name.clone()))
    }

    /// Wrap an already open port
    pub fn from_port(port: Box<dyn SerialPort>, name: impl Into<String>) -> Self {
        Self {
            port: Some(port),
            name: name.into(),
        }
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, ProtocolError> {
        self.port.as_mut().ok_or(ProtocolError::NotConnected)
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let port = self.port()?;
        Write::write_all(&mut *port, bytes)?;
        // flush() is tcdrain on unix, which can hang on some USB adapters;
        // the settle delay that follows every write covers transmission.
        #[cfg(not(unix))]
        Write::flush(port)?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, ProtocolError> {
        Ok(self.port()?.bytes_to_read()? as usize)
    }

    fn read(&mut self, max: usize) -> Result<Vec<u8>, ProtocolError> {
        let port = self.port()?;
        let mut buffer = vec![0u8; max];
        let mut filled = 0;

        while filled < max {
            match Read::read(&mut *port, &mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => break,
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        buffer.truncate(filled);
        Ok(buffer)
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::info!("Serial connection {} closed", self.name);
        }
    }
}
