//! Command types

use std::fmt;

use rust_decimal::Decimal;

/// Response to any line that is not one of the four sentence shapes
pub const UNKNOWN_COMMAND_RESPONSE: &str = "I have no idea what you are talking about";

/// A parsed input line
///
/// Each command is built from one line, executed once and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `<alien> is <roman>`
    NumeralUpdate { alien: String, roman: char },

    /// `<alien number> <Mineral> is <total price> credits`
    MineralUpdate {
        mineral: String,
        quantity: Vec<String>,
        total_price: Decimal,
    },

    /// `how much is <alien number> ?`
    NumberQuery { alien_number: Vec<String> },

    /// `how many credits is <alien number> <Mineral> ?`
    MineralQuery {
        alien_number: Vec<String>,
        mineral: String,
    },

    /// Line did not match any sentence shape
    Unknown,
}

impl Command {
    /// Short name for logs and structured output
    pub fn kind(&self) -> &'static str {
        match self {
            Command::NumeralUpdate { .. } => "numeral-update",
            Command::MineralUpdate { .. } => "mineral-update",
            Command::NumberQuery { .. } => "number-query",
            Command::MineralQuery { .. } => "mineral-query",
            Command::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind())?;
        match self {
            Command::NumeralUpdate { alien, roman } => write!(f, "set {} to {}", alien, roman),
            Command::MineralUpdate {
                mineral,
                quantity,
                total_price,
            } => write!(
                f,
                "set the price of {} {} to {}",
                quantity.join(" "),
                mineral,
                total_price
            ),
            Command::NumberQuery { alien_number } => {
                write!(f, "decimal value of {}", alien_number.join(" "))
            }
            Command::MineralQuery {
                alien_number,
                mineral,
            } => write!(
                f,
                "price of {} units of {}",
                alien_number.join(" "),
                mineral
            ),
            Command::Unknown => write!(f, "generic error message"),
        }
    }
}
