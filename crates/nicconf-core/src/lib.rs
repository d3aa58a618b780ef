//! # NicConf Core Library
//!
//! Core functionality for configuring NIC telemetry modems over a serial link.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The device's wake handshake and paced command transmission
//! - The save / restart / verify cycle with response capture
//! - Built-in region profiles
//! - Session orchestration with guaranteed port release
//!
//! ## Example
//!
//! ```rust,ignore
//! use nicconf_core::prelude::*;
//!
//! let config = ConnectionConfig::new("/dev/ttyUSB0");
//! let commands = RegionProfile::MatoGrosso.commands()?;
//! let outcome = run_session(&config, &commands, SerialTransport::open, SystemClock)?;
//! println!("{}", outcome.response);
//! ```

pub mod menu;
pub mod profile;
pub mod protocol;
pub mod session;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::menu::{MenuChoice, MenuError};
    pub use crate::profile::RegionProfile;
    pub use crate::protocol::{
        Clock, Command, CommandSet, ConnectionConfig, Driver, ProtocolError, SerialTransport,
        SessionOutcome, SessionTiming, SystemClock, Transport,
    };
    pub use crate::session::{run_choice, run_session};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
