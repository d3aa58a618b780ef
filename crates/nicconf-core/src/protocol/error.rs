//! Protocol errors

use thiserror::Error;

/// Errors that can occur while talking to the device
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The port could not be opened; no session was started
    #[error("Failed to open port {port}: {reason}")]
    OpenFailed {
        /// Port that was requested
        port: String,
        /// Reason reported by the serial layer
        reason: String,
    },

    /// Serial layer error other than plain I/O
    #[error("Serial port error: {0}")]
    Serial(String),

    /// The transport has already been closed
    #[error("Not connected to device")]
    NotConnected,

    /// Command text contained a CR or LF
    #[error("Invalid command {0:?}: commands must not contain line terminators")]
    InvalidCommand(String),

    /// Read or write failure on the open port
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serialport::Error> for ProtocolError {
    fn from(e: serialport::Error) -> Self {
        match e.kind() {
            serialport::ErrorKind::Io(kind) => {
                ProtocolError::Io(std::io::Error::new(kind, e.description))
            }
            _ => ProtocolError::Serial(e.to_string()),
        }
    }
}
