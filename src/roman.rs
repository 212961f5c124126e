//! Roman numeral evaluator
//!
//! Accepts exactly the canonical Roman numerals for 0-3999 with a nom
//! grammar that mirrors how the numerals are written:
//!
//! ```text
//! numeral  = thousands hundreds tens ones
//! thousands = "M"{0,3}
//! block(u, m, n) = u n | u m | m? u{0,3}     ; e.g. CM | CD | D? C{0,3}
//! ```
//!
//! Each block is tried subtractive-first (ordered choice) and the whole input
//! must be consumed, so `IIII`, `IM`, `IXI`, `VV` and anything with stray
//! characters or whitespace is rejected. The empty string evaluates to 0.

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, map, opt, value},
    multi::many_m_n,
    sequence::{pair, tuple},
    IResult,
};

use crate::error::{MerchantError, Result};

/// One of the seven Roman numeral characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomanDigit {
    I,
    V,
    X,
    L,
    C,
    D,
    M,
}

impl RomanDigit {
    pub const ALL: [RomanDigit; 7] = [
        RomanDigit::I,
        RomanDigit::V,
        RomanDigit::X,
        RomanDigit::L,
        RomanDigit::C,
        RomanDigit::D,
        RomanDigit::M,
    ];

    pub fn value(self) -> u32 {
        match self {
            RomanDigit::I => 1,
            RomanDigit::V => 5,
            RomanDigit::X => 10,
            RomanDigit::L => 50,
            RomanDigit::C => 100,
            RomanDigit::D => 500,
            RomanDigit::M => 1000,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            RomanDigit::I => 'I',
            RomanDigit::V => 'V',
            RomanDigit::X => 'X',
            RomanDigit::L => 'L',
            RomanDigit::C => 'C',
            RomanDigit::D => 'D',
            RomanDigit::M => 'M',
        }
    }
}

impl TryFrom<char> for RomanDigit {
    type Error = MerchantError;

    fn try_from(c: char) -> Result<Self> {
        RomanDigit::ALL
            .into_iter()
            .find(|d| d.symbol() == c)
            .ok_or_else(|| MerchantError::InvalidRoman {
                input: c.to_string(),
            })
    }
}

impl std::fmt::Display for RomanDigit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Grammar
// ============================================================================

/// The three symbols used by one decimal place below the thousands
#[derive(Debug, Clone, Copy)]
struct Scale {
    unit: RomanDigit,
    mid: RomanDigit,
    next: RomanDigit,
}

const HUNDREDS: Scale = Scale {
    unit: RomanDigit::C,
    mid: RomanDigit::D,
    next: RomanDigit::M,
};

const TENS: Scale = Scale {
    unit: RomanDigit::X,
    mid: RomanDigit::L,
    next: RomanDigit::C,
};

const ONES: Scale = Scale {
    unit: RomanDigit::I,
    mid: RomanDigit::V,
    next: RomanDigit::X,
};

fn symbol<'a>(digit: RomanDigit) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    char(digit.symbol())
}

fn thousands(input: &str) -> IResult<&str, u32> {
    map(many_m_n(0, 3, symbol(RomanDigit::M)), |ms: Vec<char>| {
        ms.len() as u32 * RomanDigit::M.value()
    })(input)
}

/// `CM` / `CD` and their counterparts at the other scales
fn subtractive<'a>(scale: Scale) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    alt((
        value(
            scale.next.value() - scale.unit.value(),
            pair(symbol(scale.unit), symbol(scale.next)),
        ),
        value(
            scale.mid.value() - scale.unit.value(),
            pair(symbol(scale.unit), symbol(scale.mid)),
        ),
    ))
}

/// Optional mid symbol followed by up to three unit symbols, e.g. `LXXX`
fn additive<'a>(scale: Scale) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    map(
        pair(opt(symbol(scale.mid)), many_m_n(0, 3, symbol(scale.unit))),
        move |(mid, units): (Option<char>, Vec<char>)| {
            mid.map_or(0, |_| scale.mid.value()) + units.len() as u32 * scale.unit.value()
        },
    )
}

fn block<'a>(scale: Scale) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    alt((subtractive(scale), additive(scale)))
}

fn numeral(input: &str) -> IResult<&str, u32> {
    map(
        tuple((thousands, block(HUNDREDS), block(TENS), block(ONES))),
        |(m, c, x, i)| m + c + x + i,
    )(input)
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluate a Roman numeral string
///
/// # Examples
///
/// ```
/// use merchants_guide::roman::evaluate;
///
/// assert_eq!(evaluate("MCMXLIV").unwrap(), 1944);
/// assert_eq!(evaluate("").unwrap(), 0);
/// assert!(evaluate("IIII").is_err());
/// ```
pub fn evaluate(text: &str) -> Result<u32> {
    all_consuming(numeral)(text)
        .map(|(_, value)| value)
        .map_err(|_| MerchantError::InvalidRoman {
            input: text.to_string(),
        })
}

/// Write a value as its canonical (shortest) Roman numeral
///
/// Zero becomes the empty string; values from 4000 up are rejected.
pub fn to_roman(value: u32) -> Result<String> {
    if value >= 4000 {
        return Err(MerchantError::OutOfRange { value });
    }

    let mut out = RomanDigit::M.to_string().repeat((value / 1000) as usize);
    let mut rest = value % 1000;

    for scale in [HUNDREDS, TENS, ONES] {
        let magnitude = scale.unit.value();
        let digit = rest / magnitude;
        rest %= magnitude;

        match digit {
            9 => {
                out.push(scale.unit.symbol());
                out.push(scale.next.symbol());
            }
            4 => {
                out.push(scale.unit.symbol());
                out.push(scale.mid.symbol());
            }
            _ => {
                if digit >= 5 {
                    out.push(scale.mid.symbol());
                }
                for _ in 0..digit % 5 {
                    out.push(scale.unit.symbol());
                }
            }
        }
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
