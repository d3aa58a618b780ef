//! Protocol commands
//!
//! Device directives are plain ASCII lines beginning with `$`. A [`Command`]
//! holds one such line without its terminator; the terminator is added on
//! the wire by the driver.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ProtocolError, LINE_TERMINATOR};

/// Persist the current configuration to non-volatile storage
pub const SAVE: &str = "$save";

/// Reboot the device
pub const RESTART: &str = "$restart";

/// Report firmware version
pub const VERSION: &str = "$vers";

/// Report the configured SIM/network slots
pub const GET_SIMLIB: &str = "$gsimlib";

/// How a piece of text is put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Text followed by CR LF
    Line,
    /// Text exactly as given (attention token only)
    Raw,
}

impl Framing {
    /// Encode `text` for transmission
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut bytes = text.as_bytes().to_vec();
        if self == Framing::Line {
            bytes.extend_from_slice(LINE_TERMINATOR);
        }
        bytes
    }
}

/// A single device directive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Command(String);

impl Command {
    /// Create a command, rejecting text with embedded line terminators
    pub fn new(text: impl Into<String>) -> Result<Self, ProtocolError> {
        let text = text.into();
        if text.contains(['\r', '\n']) {
            return Err(ProtocolError::InvalidCommand(text));
        }
        Ok(Self(text))
    }

    /// The command text, without terminator
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Command {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Command::new(value)
    }
}

impl From<Command> for String {
    fn from(cmd: Command) -> Self {
        cmd.0
    }
}

/// An ordered, immutable list of commands making up one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    name: String,
    commands: Vec<Command>,
}

impl CommandSet {
    /// Build a command set from lines of text
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Result<Self, ProtocolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands = lines
            .into_iter()
            .map(Command::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            commands,
        })
    }

    /// Human-readable name of this set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of commands in the set
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if the set has no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in playback order
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_framing() {
        assert_eq!(Framing::Line.encode("$vers"), b"$vers\r\n".to_vec());
        assert_eq!(Framing::Line.encode(""), b"\r\n".to_vec());
    }

    #[test]
    fn test_raw_framing() {
        assert_eq!(Framing::Raw.encode("@@@"), b"@@@".to_vec());
    }

    #[test]
    fn test_command_rejects_terminators() {
        assert!(Command::new("$save\r\n").is_err());
        assert!(Command::new("$sa\nve").is_err());
        assert_eq!(Command::new("$save").unwrap().as_str(), "$save");
    }

    #[test]
    fn test_command_set_preserves_order() {
        let set = CommandSet::new("test", ["$a", "$b", "$c"]).unwrap();
        let texts: Vec<&str> = set.iter().map(Command::as_str).collect();
        assert_eq!(texts, vec!["$a", "$b", "$c"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.name(), "test");
    }

    #[test]
    fn test_command_set_rejects_bad_line() {
        let result = CommandSet::new("bad", ["$a", "$b\r\n"]);
        assert!(matches!(result, Err(ProtocolError::InvalidCommand(_))));
    }
}
