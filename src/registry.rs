//! Numeral and price registry
//!
//! Holds what the merchant has been taught so far: which Roman numeral
//! character each alien numeral stands for, and the per-unit price of each
//! mineral. Definitions are upserts; there is no removal short of `reset`.
//!
//! A `Registry` is a plain value owned by whoever drives the conversation
//! and is passed by reference into each command, so two conversations never
//! observe each other's definitions.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{MerchantError, Result};
use crate::roman;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    numerals: HashMap<String, char>,
    mineral_prices: HashMap<String, Decimal>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an alien numeral to a Roman numeral character
    ///
    /// The character is not validated here; a bad mapping only shows up
    /// when an alien number using it fails to evaluate.
    pub fn define_numeral(&mut self, alien: impl Into<String>, roman: char) {
        let alien = alien.into();
        let previous = self.numerals.insert(alien.clone(), roman);
        debug!(%alien, %roman, overwritten = previous.is_some(), "defined alien numeral");
    }

    pub fn define_mineral_price(&mut self, mineral: impl Into<String>, price_per_unit: Decimal) {
        let mineral = mineral.into();
        let previous = self.mineral_prices.insert(mineral.clone(), price_per_unit);
        debug!(%mineral, %price_per_unit, overwritten = previous.is_some(), "defined mineral price");
    }

    pub fn lookup_numeral(&self, alien: &str) -> Result<char> {
        self.numerals
            .get(alien)
            .copied()
            .ok_or_else(|| MerchantError::UnknownNumeral {
                numeral: alien.to_string(),
            })
    }

    pub fn lookup_mineral_price(&self, mineral: &str) -> Result<Decimal> {
        self.mineral_prices
            .get(mineral)
            .copied()
            .ok_or_else(|| MerchantError::UnknownMineral {
                mineral: mineral.to_string(),
            })
    }

    /// Translate an alien number into its Roman numeral string
    ///
    /// Fails on the first token that has no definition.
    pub fn to_roman_string(&self, alien_number: &[String]) -> Result<String> {
        alien_number
            .iter()
            .map(|token| self.lookup_numeral(token))
            .collect()
    }

    /// Decimal value of an alien number
    pub fn evaluate_alien_number(&self, alien_number: &[String]) -> Result<u32> {
        let roman = self.to_roman_string(alien_number)?;
        roman::evaluate(&roman)
    }

    pub fn numeral_count(&self) -> usize {
        self.numerals.len()
    }

    pub fn mineral_count(&self) -> usize {
        self.mineral_prices.len()
    }

    /// Forget every definition
    pub fn reset(&mut self) {
        self.numerals.clear();
        self.mineral_prices.clear();
    }
}
