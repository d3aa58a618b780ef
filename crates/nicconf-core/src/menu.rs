//! Operator menu
//!
//! Maps the operator's numeric choice to a region profile or exit.

use thiserror::Error;

use crate::profile::RegionProfile;

/// Menu option that ends the program without touching the device
pub const EXIT_OPTION: &str = "4";

/// Operator input that is not a menu option
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    /// Input was not one of the numbered options
    #[error("Invalid option: {0:?}")]
    InvalidOption(String),
}

/// What the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Apply the given region profile
    Configure(RegionProfile),
    /// Leave without opening the port
    Exit,
}

impl MenuChoice {
    /// Parse one line of operator input
    pub fn parse(input: &str) -> Result<Self, MenuError> {
        match input.trim() {
            "1" => Ok(MenuChoice::Configure(RegionProfile::MatoGrosso)),
            "2" => Ok(MenuChoice::Configure(RegionProfile::SaoPaulo)),
            "3" => Ok(MenuChoice::Configure(RegionProfile::RioDeJaneiro)),
            EXIT_OPTION => Ok(MenuChoice::Exit),
            other => Err(MenuError::InvalidOption(other.to_string())),
        }
    }
}

/// Menu lines, numbered as [`MenuChoice::parse`] expects them
pub fn menu_lines() -> Vec<String> {
    RegionProfile::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.label()))
        .chain(std::iter::once(format!("{EXIT_OPTION}. Exit")))
        .collect()
}
