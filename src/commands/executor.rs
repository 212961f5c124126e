//! Command Executor
//!
//! Runs a parsed `Command` against a `Registry`. Definitions answer with
//! nothing, queries with one line of text. Failures never escape: an
//! unknown numeral, unknown mineral or malformed Roman numeral becomes the
//! error's message, which is what the user sees.

use rust_decimal::Decimal;
use tracing::warn;

use super::types::{Command, UNKNOWN_COMMAND_RESPONSE};
use crate::config::RoundingMode;
use crate::error::{MerchantError, Result};
use crate::registry::Registry;

impl Command {
    /// Execute the command and return its output, if any
    pub fn execute(&self, registry: &mut Registry, rounding: RoundingMode) -> Option<String> {
        let outcome = match self {
            Command::NumeralUpdate { alien, roman } => {
                registry.define_numeral(alien.as_str(), *roman);
                Ok(None)
            }
            Command::MineralUpdate {
                mineral,
                quantity,
                total_price,
            } => update_mineral(registry, mineral, quantity, *total_price).map(|_| None),
            Command::NumberQuery { alien_number } => query_number(registry, alien_number).map(Some),
            Command::MineralQuery {
                alien_number,
                mineral,
            } => query_mineral(registry, alien_number, mineral, rounding).map(Some),
            Command::Unknown => Ok(Some(UNKNOWN_COMMAND_RESPONSE.to_string())),
        };

        outcome.unwrap_or_else(|e| {
            warn!(command = %self, error = %e, "command failed");
            Some(e.to_string())
        })
    }
}

/// Store the per-unit price derived from a bulk price
fn update_mineral(
    registry: &mut Registry,
    mineral: &str,
    quantity: &[String],
    total_price: Decimal,
) -> Result<()> {
    let units = registry.evaluate_alien_number(quantity)?;
    if units == 0 {
        return Err(MerchantError::ZeroQuantity {
            mineral: mineral.to_string(),
        });
    }

    let per_unit = total_price / Decimal::from(units);
    registry.define_mineral_price(mineral, per_unit);
    Ok(())
}

fn query_number(registry: &Registry, alien_number: &[String]) -> Result<String> {
    let value = registry.evaluate_alien_number(alien_number)?;
    Ok(format!("{} is {}", alien_number.join(" "), value))
}

fn query_mineral(
    registry: &Registry,
    alien_number: &[String],
    mineral: &str,
    rounding: RoundingMode,
) -> Result<String> {
    let units = registry.evaluate_alien_number(alien_number)?;
    let per_unit = registry.lookup_mineral_price(mineral)?;
    let total = Decimal::from(units)
        .checked_mul(per_unit)
        .ok_or_else(|| MerchantError::PriceOverflow {
            mineral: mineral.to_string(),
            units,
        })?;
    let price = rounding.round(total).normalize();

    Ok(format!(
        "{} {} is {} Credits",
        alien_number.join(" "),
        mineral,
        price
    ))
}
