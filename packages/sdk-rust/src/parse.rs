//! Decimal string to base-unit conversion
//!
//! Human input is parsed as text only. No floating-point arithmetic happens
//! past the point where a numeric input has been rendered to its canonical
//! decimal string.

use std::borrow::Cow;

use num_bigint::BigInt;

use crate::config::Limits;
use crate::error::{FormatError, FormatReason};
use crate::format::check_decimals_option;

/// Signed arbitrary-precision amount in the token's smallest unit
pub type BaseUnits = BigInt;

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₩', '₽', '₿', '¢'];

/// Raw value handed to the parser
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput<'a> {
    Text(Cow<'a, str>),
    Float(f64),
    Integer(i128),
}

impl AmountInput<'_> {
    /// Canonical decimal string for this input
    fn canonical(&self) -> Result<Cow<'_, str>, FormatError> {
        match self {
            AmountInput::Text(text) => Ok(Cow::Borrowed(text.as_ref())),
            AmountInput::Float(value) if !value.is_finite() => {
                Err(FormatError::new(&value.to_string(), FormatReason::NotFinite))
            }
            // f64 Display is the shortest round-trip form and never uses an exponent
            AmountInput::Float(value) => Ok(Cow::Owned(value.to_string())),
            AmountInput::Integer(value) => Ok(Cow::Owned(value.to_string())),
        }
    }
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(value: &'a str) -> Self {
        AmountInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(value: &'a String) -> Self {
        AmountInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for AmountInput<'static> {
    fn from(value: String) -> Self {
        AmountInput::Text(Cow::Owned(value))
    }
}

impl From<f64> for AmountInput<'static> {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

macro_rules! integer_input {
    ($($ty:ty),*) => {
        $(impl From<$ty> for AmountInput<'static> {
            fn from(value: $ty) -> Self {
                AmountInput::Integer(i128::from(value))
            }
        })*
    };
}

integer_input!(i32, i64, u32, u64, i128);

/// Parse a human-readable amount into base units using default limits
///
/// # Example
/// ```
/// use amount_sdk::{parse_units, BaseUnits};
/// assert_eq!(parse_units("100", 6).unwrap(), BaseUnits::from(100_000_000));
/// assert_eq!(parse_units("-.5", 6).unwrap(), BaseUnits::from(-500_000));
/// assert!(parse_units("1,000", 6).is_err());
/// ```
pub fn parse_units<'a>(
    input: impl Into<AmountInput<'a>>,
    decimals: u32,
) -> Result<BaseUnits, FormatError> {
    parse_units_with(input.into(), decimals, &Limits::default())
}

pub(crate) fn parse_units_with(
    input: AmountInput<'_>,
    decimals: u32,
    limits: &Limits,
) -> Result<BaseUnits, FormatError> {
    check_decimals_option("decimals", decimals, limits.max_decimals_option)?;
    let raw = input.canonical()?;
    parse_decimal(&raw, decimals, limits.max_input_len)
}

fn parse_decimal(raw: &str, decimals: u32, max_len: usize) -> Result<BaseUnits, FormatError> {
    // Length first, so oversized input never reaches a character scan
    if raw.len() > max_len {
        return Err(FormatError::new(raw, FormatReason::TooLong { max: max_len }));
    }
    if raw.trim().is_empty() {
        return Err(FormatError::new(raw, FormatReason::Empty));
    }
    check_characters(raw)?;

    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let mut parts = body.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(FormatError::new(raw, FormatReason::MultipleDecimalPoints));
    }
    if integer.is_empty() && fraction.is_empty() {
        return Err(FormatError::new(raw, FormatReason::NoDigits));
    }
    if fraction.len() > decimals as usize {
        return Err(FormatError::new(
            raw,
            FormatReason::TooManyDecimals { max: decimals },
        ));
    }

    let mut digits = String::with_capacity(integer.len() + decimals as usize);
    digits.push_str(integer);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat_n('0', decimals as usize - fraction.len()));

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| FormatError::new(raw, FormatReason::NoDigits))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Reject everything outside `[0-9.-]`, with a specific reason for the
/// common human-formatting mistakes.
fn check_characters(raw: &str) -> Result<(), FormatError> {
    if raw.contains(',') {
        return Err(FormatError::new(raw, FormatReason::ThousandsSeparator));
    }
    if raw.contains(CURRENCY_SYMBOLS) {
        return Err(FormatError::new(raw, FormatReason::CurrencySymbol));
    }
    if raw.contains(char::is_whitespace) {
        return Err(FormatError::new(raw, FormatReason::Whitespace));
    }
    for (index, c) in raw.char_indices() {
        match c {
            '0'..='9' | '.' => {}
            '-' if index == 0 => {}
            '-' => return Err(FormatError::new(raw, FormatReason::MisplacedSign)),
            other => return Err(FormatError::new(raw, FormatReason::InvalidCharacter(other))),
        }
    }
    Ok(())
}
