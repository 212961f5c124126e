//! Error types for numeral evaluation, registry lookups and command execution
//!
//! Every variant renders as the exact line shown to the user, so commands
//! can turn a failure into their output with `to_string()`.

use thiserror::Error;

/// Failures raised while resolving alien numbers and mineral prices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerchantError {
    #[error("Unknown alien numeral '{numeral}'")]
    UnknownNumeral { numeral: String },

    #[error("Unknown mineral '{mineral}'")]
    UnknownMineral { mineral: String },

    #[error("Could not parse input '{input}' as Roman numerals")]
    InvalidRoman { input: String },

    #[error("Cannot derive a unit price for {mineral} from a quantity of zero")]
    ZeroQuantity { mineral: String },

    #[error("The price of {units} {mineral} is too large to compute")]
    PriceOverflow { mineral: String, units: u32 },

    #[error("{value} cannot be written as a Roman numeral")]
    OutOfRange { value: u32 },
}

pub type Result<T> = std::result::Result<T, MerchantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_user_contract() {
        let e = MerchantError::UnknownNumeral {
            numeral: "blork".to_string(),
        };
        assert_eq!(e.to_string(), "Unknown alien numeral 'blork'");

        let e = MerchantError::UnknownMineral {
            mineral: "Unobtainium".to_string(),
        };
        assert_eq!(e.to_string(), "Unknown mineral 'Unobtainium'");

        let e = MerchantError::InvalidRoman {
            input: "LL".to_string(),
        };
        assert_eq!(e.to_string(), "Could not parse input 'LL' as Roman numerals");

        let e = MerchantError::PriceOverflow {
            mineral: "Gold".to_string(),
            units: 2,
        };
        assert_eq!(e.to_string(), "The price of 2 Gold is too large to compute");
    }
}
