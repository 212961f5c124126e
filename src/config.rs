//! Runtime configuration
//!
//! The only tunable is how mineral-price answers are rounded to whole
//! credits. It is read from `MERCHANT_ROUNDING` (a `.env` file works too,
//! the binary loads one with dotenvy before reading the environment).

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};

pub const ROUNDING_ENV_VAR: &str = "MERCHANT_ROUNDING";

/// How a fractional credit amount becomes a whole number of credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Banker's rounding: 2.5 -> 2, 3.5 -> 4
    #[default]
    HalfEven,
    /// Midpoint away from zero: 2.5 -> 3
    HalfUp,
}

impl RoundingMode {
    pub fn round(self, amount: Decimal) -> Decimal {
        let strategy = match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        };
        amount.round_dp_with_strategy(0, strategy)
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-even" | "bankers" | "even" => Ok(RoundingMode::HalfEven),
            "half-up" | "up" => Ok(RoundingMode::HalfUp),
            other => Err(format!(
                "unknown rounding mode '{}', expected half-even or half-up",
                other
            )),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfEven => write!(f, "half-even"),
            RoundingMode::HalfUp => write!(f, "half-up"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MerchantConfig {
    pub rounding: RoundingMode,
}

impl MerchantConfig {
    pub fn new(rounding: RoundingMode) -> Self {
        Self { rounding }
    }

    /// Build the configuration from `MERCHANT_ROUNDING`, defaulting when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(ROUNDING_ENV_VAR) {
            Ok(raw) => Self::from_rounding_str(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_rounding_str(raw: &str) -> Result<Self> {
        let rounding = raw
            .parse::<RoundingMode>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid {}", ROUNDING_ENV_VAR))?;
        Ok(Self { rounding })
    }
}
