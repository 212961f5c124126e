//! merchants-guide: a tiny command language for an interstellar merchant
//!
//! Users teach the system alien numerals (each standing for one Roman
//! numeral character) and mineral prices, then ask two kinds of question:
//!
//! - `how much is pish tegj glob glob ?` - the decimal value of an alien number
//! - `how many credits is glob prok Silver ?` - the price of some units of a mineral
//!
//! ## Pipeline
//!
//! ```text
//! line of text -> commands::parse_command -> Command
//!                                               |
//!                          Command::execute(&mut Registry, RoundingMode)
//!                                               |
//!                               Option<String> (response or error text)
//! ```
//!
//! The `Registry` is an ordinary value owned by the caller (usually a
//! [`Merchant`]), so independent conversations never share state.

pub mod commands;
pub mod config;
pub mod error;
pub mod merchant;
pub mod registry;
pub mod roman;

// Re-export commonly used types
pub use commands::{parse_command, Command, UNKNOWN_COMMAND_RESPONSE};
pub use config::{MerchantConfig, RoundingMode};
pub use error::{MerchantError, Result};
pub use merchant::{normalize_line, Merchant, RunStats};
pub use registry::Registry;
pub use roman::{evaluate, to_roman, RomanDigit};
