//! Merchant commands
//!
//! - `types`: the closed `Command` sum type, one variant per sentence shape
//! - `parser`: nom grammar turning one input line into a `Command`
//! - `executor`: runs a `Command` against a `Registry`
//!
//! ## Sentence Shapes
//!
//! - `glob is I` - define an alien numeral
//! - `glob glob Silver is 34 Credits` - define a mineral price from a bulk price
//! - `how much is pish tegj glob glob ?` - decimal value of an alien number
//! - `how many Credits is glob prok Silver ?` - price of some units of a mineral
//!
//! Anything else parses to `Command::Unknown`.

pub mod executor;
pub mod parser;
pub mod types;

pub use parser::parse_command;
pub use types::{Command, UNKNOWN_COMMAND_RESPONSE};
