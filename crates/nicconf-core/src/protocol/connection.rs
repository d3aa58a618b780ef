//! Connection configuration
//!
//! Port settings and protocol timing for one configuration session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS, REBOOT_WAIT_UNITS, SAVE_SETTLE_UNITS, SETTLE_UNITS,
};

#[cfg(windows)]
const DEFAULT_PORT: &str = "COM3";
#[cfg(not(windows))]
const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Protocol timing, expressed as multiples of a single time unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTiming {
    /// Length of one time unit in milliseconds
    pub unit_ms: u64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self { unit_ms: 1000 }
    }
}

impl SessionTiming {
    fn units(&self, n: u32) -> Duration {
        Duration::from_millis(self.unit_ms) * n
    }

    /// Pause after an ordinary command
    pub fn settle(&self) -> Duration {
        self.units(SETTLE_UNITS)
    }

    /// Pause after `$save` while the device writes to flash
    pub fn save_settle(&self) -> Duration {
        self.units(SAVE_SETTLE_UNITS)
    }

    /// Fixed wait for the device to reboot after `$restart`
    pub fn reboot_wait(&self) -> Duration {
        self.units(REBOOT_WAIT_UNITS)
    }
}

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Serial port name
    pub port_name: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Read timeout in milliseconds
    pub timeout_ms: u64,
    /// Protocol timing
    pub timing: SessionTiming,
    /// Read and log whatever the device sends back right after each wake
    pub drain_after_wake: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            timing: SessionTiming::default(),
            drain_after_wake: false,
        }
    }
}

impl ConnectionConfig {
    /// Config for `port_name` with every other setting at its default
    pub fn new(port_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            ..Self::default()
        }
    }

    /// Read timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
