//! Nom Parser for Merchant Commands
//!
//! The grammar, in PEG notation (`/` is ordered choice, first match wins):
//!
//! ```text
//! line           = command (space* newline)?
//! command        = (update !"?") / (query ws "?")
//! update         = numeral_update / mineral_update
//! numeral_update = alien_numeral ws "is" ws roman_char
//! mineral_update = alien_number ws mineral ws "is" ws integer ws credits
//! query          = number_query / mineral_query
//! number_query   = "how much" ws "is" ws alien_number
//! mineral_query  = "how many" ws credits ws "is" ws alien_number ws mineral
//! alien_number   = alien_numeral (ws alien_numeral)*
//! alien_numeral  = [a-z]+
//! mineral        = [A-Z][a-z]+
//! roman_char     = [IVXLCDM]
//! credits        = "Credits" / "credits"
//! ws             = whitespace*
//! ```
//!
//! Repetitions are greedy and never give characters back, so
//! `borkis I` is one alien numeral followed by `I`, not `bork is I`.
//! A line that does not match in full is `Command::Unknown`, never an error.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, line_ending, multispace0, one_of, satisfy, space0},
    combinator::{all_consuming, map, map_res, not, opt, recognize},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use rust_decimal::Decimal;
use tracing::debug;

use super::types::Command;

// =============================================================================
// MAIN PARSER ENTRY POINT
// =============================================================================

/// Parse one input line into a command
///
/// # Examples
///
/// ```
/// use merchants_guide::commands::{parse_command, Command};
///
/// assert_eq!(
///     parse_command("how much is glob glob ?"),
///     Command::NumberQuery { alien_number: vec!["glob".into(), "glob".into()] }
/// );
/// assert_eq!(parse_command("what?"), Command::Unknown);
/// ```
pub fn parse_command(input: &str) -> Command {
    match all_consuming(terminated(command, opt(trailing_newline)))(input) {
        Ok((_, cmd)) => {
            debug!(command = %cmd, "parsed command");
            cmd
        }
        Err(e) => {
            debug!(input = %input, error = %e, "input matches no command");
            Command::Unknown
        }
    }
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        terminated(update, not(char('?'))),
        terminated(query, pair(ws, char('?'))),
    ))(input)
}

fn update(input: &str) -> IResult<&str, Command> {
    alt((numeral_update, mineral_update))(input)
}

fn query(input: &str) -> IResult<&str, Command> {
    alt((number_query, mineral_query))(input)
}

// =============================================================================
// SENTENCE PARSERS
// =============================================================================

/// Parse: bork is I
fn numeral_update(input: &str) -> IResult<&str, Command> {
    map(
        tuple((alien_numeral, ws, is, ws, roman_char)),
        |(alien, _, _, _, roman)| Command::NumeralUpdate {
            alien: alien.to_string(),
            roman,
        },
    )(input)
}

/// Parse: bork bork Silver is 34 credits
fn mineral_update(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            alien_number,
            ws,
            mineral,
            ws,
            is,
            ws,
            integer,
            ws,
            credits,
        )),
        |(quantity, _, mineral, _, _, _, total_price, _, _)| Command::MineralUpdate {
            mineral: mineral.to_string(),
            quantity,
            total_price,
        },
    )(input)
}

/// Parse: how much is bork bork
fn number_query(input: &str) -> IResult<&str, Command> {
    map(
        tuple((tag("how much"), ws, is, ws, alien_number)),
        |(_, _, _, _, alien_number)| Command::NumberQuery { alien_number },
    )(input)
}

/// Parse: how many credits is bork bork Silver
fn mineral_query(input: &str) -> IResult<&str, Command> {
    map(
        tuple((
            tag("how many"),
            ws,
            credits,
            ws,
            is,
            ws,
            alien_number,
            ws,
            mineral,
        )),
        |(_, _, _, _, _, _, alien_number, _, mineral)| Command::MineralQuery {
            alien_number,
            mineral: mineral.to_string(),
        },
    )(input)
}

// =============================================================================
// TOKEN PARSERS
// =============================================================================

fn alien_number(input: &str) -> IResult<&str, Vec<String>> {
    map(
        pair(alien_numeral, many0(preceded(ws, alien_numeral))),
        |(first, rest)| {
            std::iter::once(first)
                .chain(rest)
                .map(str::to_string)
                .collect()
        },
    )(input)
}

fn alien_numeral(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_lowercase())(input)
}

fn mineral(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        take_while1(|c: char| c.is_ascii_lowercase()),
    ))(input)
}

fn roman_char(input: &str) -> IResult<&str, char> {
    one_of("IVXLCDM")(input)
}

/// Non-negative integer, up to `Decimal::MAX`
fn integer(input: &str) -> IResult<&str, Decimal> {
    map_res(digit1, str::parse::<Decimal>)(input)
}

fn credits(input: &str) -> IResult<&str, &str> {
    alt((tag("Credits"), tag("credits")))(input)
}

fn is(input: &str) -> IResult<&str, &str> {
    tag("is")(input)
}

fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn trailing_newline(input: &str) -> IResult<&str, &str> {
    preceded(space0, line_ending)(input)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|w| w.to_string()).collect()
    }

    fn assert_unknown(input: &str) {
        assert_eq!(parse_command(input), Command::Unknown, "input: {:?}", input);
    }

    #[test]
    fn test_numeral_update() {
        assert_eq!(
            parse_command("bork is I"),
            Command::NumeralUpdate {
                alien: "bork".to_string(),
                roman: 'I'
            }
        );
    }

    #[test]
    fn test_numeral_update_malformed() {
        assert_unknown("bork bork is I");
        assert_unknown("Bork is I");
        assert_unknown("bork is is I");
        assert_unknown("bork is II");
        assert_unknown("bork is Y");
        assert_unknown("bork is i");
        assert_unknown("bork is I?");
        assert_unknown("borkis I");
    }

    #[test]
    fn test_mineral_update() {
        let expected = Command::MineralUpdate {
            mineral: "Silver".to_string(),
            quantity: words(&["bork", "bork"]),
            total_price: Decimal::from(34),
        };
        assert_eq!(parse_command("bork bork Silver is 34 credits"), expected);
        assert_eq!(parse_command("bork bork Silver is 34 Credits"), expected);
        assert_eq!(parse_command("bork   bork\tSilver is 34credits"), expected);
    }

    #[test]
    fn test_mineral_update_malformed() {
        assert_unknown("bork Bork Silver is 34 credits");
        assert_unknown("bork bork silver is 34 credits");
        assert_unknown("bork bork Silver is many credits");
        assert_unknown("bork bork Silver is 34 CREDITS");
        assert_unknown("bork bork Silver is -34 credits");
        assert_unknown("bork bork Silver is 34 credits ?");
        assert_unknown("Silver is 34 credits");
        assert_unknown("bork bork SIlver is 34 credits");
    }

    #[test]
    fn test_mineral_update_wide_price() {
        assert_eq!(
            parse_command("bork Silver is 18446744073709551616 credits"),
            Command::MineralUpdate {
                mineral: "Silver".to_string(),
                quantity: words(&["bork"]),
                total_price: Decimal::from(u64::MAX) + Decimal::ONE,
            }
        );
        assert_eq!(
            parse_command("bork Silver is 79228162514264337593543950335 credits"),
            Command::MineralUpdate {
                mineral: "Silver".to_string(),
                quantity: words(&["bork"]),
                total_price: Decimal::MAX,
            }
        );
    }

    #[test]
    fn test_mineral_update_price_too_large() {
        assert_unknown("bork Silver is 999999999999999999999999999999 credits");
    }

    #[test]
    fn test_number_query() {
        assert_eq!(
            parse_command("how much is the fish?"),
            Command::NumberQuery {
                alien_number: words(&["the", "fish"])
            }
        );
        assert_eq!(
            parse_command("how much is gromp urx bork bork ?"),
            Command::NumberQuery {
                alien_number: words(&["gromp", "urx", "bork", "bork"])
            }
        );
    }

    #[test]
    fn test_number_query_malformed() {
        assert_unknown("how much is the Iron?");
        assert_unknown("how much is bork Silver ?");
        assert_unknown("how much is bork Bork Silver?");
        assert_unknown("how much is bork");
        assert_unknown("How much is bork ?");
        assert_unknown("how  much is bork ?");
        assert_unknown("how much is ?");
        assert_unknown("how much is bork ??");
    }

    #[test]
    fn test_mineral_query() {
        let expected = Command::MineralQuery {
            alien_number: words(&["bork", "bork"]),
            mineral: "Silver".to_string(),
        };
        assert_eq!(parse_command("how many credits is bork bork Silver?"), expected);
        assert_eq!(parse_command("how many Credits is bork bork Silver ?"), expected);
    }

    #[test]
    fn test_mineral_query_malformed() {
        assert_unknown("how many credits is bork bork fish?");
        assert_unknown("how many credits is bork Bork Silver?");
        assert_unknown("how many credits is Silver ?");
        assert_unknown("how many dollars is bork Silver ?");
        assert_unknown("how many credits is bork Silver Gold ?");
    }

    #[test]
    fn test_trailing_newline_is_ignored() {
        assert_eq!(
            parse_command("bork is I\n"),
            parse_command("bork is I")
        );
        assert_eq!(
            parse_command("how much is bork ?\r\n"),
            Command::NumberQuery {
                alien_number: words(&["bork"])
            }
        );
        assert_eq!(
            parse_command("bork bork Silver is 34 credits  \n"),
            parse_command("bork bork Silver is 34 credits")
        );
        assert_unknown("bork is I\n\n");
    }

    #[test]
    fn test_garbage() {
        assert_unknown("");
        assert_unknown("how much wood could a woodchuck chuck if a woodchuck could chuck wood ?");
        assert_unknown("?");
        assert_unknown("42");
    }

    mod proptests {
        use super::*;
        use crate::config::RoundingMode;
        use crate::registry::Registry;
        use proptest::prelude::*;

        fn taught() -> Registry {
            let mut registry = Registry::new();
            for (alien, roman) in [("bork", 'I'), ("kmar", 'V'), ("gromp", 'X'), ("urx", 'L')] {
                registry.define_numeral(alien, roman);
            }
            registry.define_mineral_price("Silver", Decimal::from(17));
            registry
        }

        proptest! {
            #[test]
            fn arbitrary_lines_never_panic(line in "[a-zA-Z ?0-9\n\t]{0,40}") {
                let mut registry = taught();
                let command = parse_command(&line);
                let output = command.execute(&mut registry, RoundingMode::default());
                if command == Command::Unknown {
                    prop_assert_eq!(output.as_deref(), Some(crate::commands::UNKNOWN_COMMAND_RESPONSE));
                }
            }

            #[test]
            fn huge_prices_never_panic(
                price in "[1-9][0-9]{0,28}",
                units in prop::sample::select(vec!["bork", "kmar", "gromp urx", "urx bork bork"]),
            ) {
                let mut registry = taught();
                parse_command(&format!("bork Gold is {} credits", price))
                    .execute(&mut registry, RoundingMode::HalfUp);
                let output = parse_command(&format!("how many credits is {} Gold ?", units))
                    .execute(&mut registry, RoundingMode::HalfUp);
                prop_assert!(output.is_some());
            }
        }
    }
}
