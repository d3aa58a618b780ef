//! Serial Protocol Communication
//!
//! Implements the NIC modem's text configuration protocol: a raw attention
//! token wakes the device, then `$`-prefixed directives are sent one line at a
//! time with a fixed settle delay after each.
//!
//! The device never acknowledges individual lines, so all pacing is time based.

pub mod clock;
pub mod commands;
mod connection;
mod driver;
mod error;
pub mod serial;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use commands::{Command, CommandSet, Framing};
pub use connection::{ConnectionConfig, SessionTiming};
pub use driver::{decode_response, Driver, SessionOutcome};
pub use error::ProtocolError;
pub use serial::{list_ports, open_port, PortInfo};
pub use transport::{SerialTransport, Transport};

/// Default baud rate for the modem's configuration port
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Line terminator appended to every framed command
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Raw sequence that takes the device out of its idle listening state
pub const ATTENTION_TOKEN: &str = "@@@";

/// Settle after an ordinary command, in time units
pub const SETTLE_UNITS: u32 = 1;

/// Settle after `$save`, in time units
pub const SAVE_SETTLE_UNITS: u32 = 5;

/// Wait after `$restart`, in time units. The device documents a 40 unit reboot.
pub const REBOOT_WAIT_UNITS: u32 = 41;
