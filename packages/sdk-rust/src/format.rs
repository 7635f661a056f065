//! Formatting utilities for converting between base units and display strings
//!
//! Amounts are split into integer and fractional digit strings with integer
//! division against `10^decimals`, so rendering never goes through `f64`.

use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

use crate::config::{Limits, TokenConfig};
use crate::error::{FormatError, FormatReason, ValidationError};
use crate::parse::{parse_units_with, AmountInput, BaseUnits};

/// Fractional digits kept in compact mode when `max_decimals` is unset
pub const COMPACT_DECIMALS: u32 = 2;

/// (power of ten, suffix), largest first
const COMPACT_TIERS: [(u32, &str); 4] = [(12, "T"), (9, "B"), (6, "M"), (3, "K")];

/// Display options for [`format_units`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Pad the fraction with zeros up to this many digits
    pub min_decimals: u32,
    /// Truncate (never round) the fraction to this many digits
    pub max_decimals: Option<u32>,
    /// Group the integer part with `,` every three digits
    pub commas: bool,
    pub prefix: String,
    pub suffix: String,
    /// Abbreviate magnitudes >= 1000 with K/M/B/T
    pub compact: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            min_decimals: 0,
            max_decimals: None,
            commas: true,
            prefix: String::new(),
            suffix: String::new(),
            compact: false,
        }
    }
}

impl FormatOptions {
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }

    pub fn with_min_decimals(mut self, min_decimals: u32) -> Self {
        self.min_decimals = min_decimals;
        self
    }

    pub fn with_max_decimals(mut self, max_decimals: u32) -> Self {
        self.max_decimals = Some(max_decimals);
        self
    }

    pub fn with_commas(mut self, commas: bool) -> Self {
        self.commas = commas;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    fn validate(&self, cap: u32) -> Result<(), FormatError> {
        check_decimals_option("minDecimals", self.min_decimals, cap)?;
        if let Some(max_decimals) = self.max_decimals {
            check_decimals_option("maxDecimals", max_decimals, cap)?;
        }
        Ok(())
    }
}

pub(crate) fn check_decimals_option(
    option: &'static str,
    value: u32,
    cap: u32,
) -> Result<(), FormatError> {
    if value > cap {
        return Err(FormatError::new(
            &value.to_string(),
            FormatReason::OptionOutOfRange { option, max: cap },
        ));
    }
    Ok(())
}

/// Parser and formatter bound to one token's decimal places
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmounts {
    ticker: String,
    decimals: u32,
    limits: Limits,
}

impl TokenAmounts {
    pub fn new(token: &TokenConfig, limits: Limits) -> Result<Self, ValidationError> {
        if token.decimals > limits.max_decimals_option {
            return Err(ValidationError::invalid_config(
                "token.decimals",
                format!("must be at most {}", limits.max_decimals_option),
            ));
        }
        Ok(Self {
            ticker: token.ticker.clone(),
            decimals: token.decimals,
            limits,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn parse<'a>(&self, input: impl Into<AmountInput<'a>>) -> Result<BaseUnits, FormatError> {
        parse_units_with(input.into(), self.decimals, &self.limits)
    }

    pub fn format(&self, amount: &BaseUnits, options: &FormatOptions) -> Result<String, FormatError> {
        format_units_with(amount, self.decimals, options, &self.limits)
    }
}

/// Format base units as a human-readable string using default limits
///
/// # Example
/// ```
/// use amount_sdk::{format_units, BaseUnits, FormatOptions};
/// let amount = BaseUnits::from(1_234_560_000_u64);
/// assert_eq!(format_units(&amount, 6, &FormatOptions::default()).unwrap(), "1,234.56");
/// assert_eq!(format_units(&amount, 6, &FormatOptions::compact()).unwrap(), "1.23K");
/// ```
pub fn format_units(
    amount: &BaseUnits,
    decimals: u32,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    format_units_with(amount, decimals, options, &Limits::default())
}

pub(crate) fn format_units_with(
    amount: &BaseUnits,
    decimals: u32,
    options: &FormatOptions,
    limits: &Limits,
) -> Result<String, FormatError> {
    check_decimals_option("decimals", decimals, limits.max_decimals_option)?;
    options.validate(limits.max_decimals_option)?;

    let magnitude = amount.abs();
    let unit = pow10(decimals);

    let (integer, fraction, tier_suffix) = match compact_tier(&magnitude, &unit, options) {
        Some((exponent, suffix)) => {
            let keep = options.max_decimals.unwrap_or(COMPACT_DECIMALS);
            let scaled = magnitude * pow10(keep) / pow10(exponent + decimals);
            let (integer, fraction) = split_digits(&scaled, keep);
            (integer, fraction, suffix)
        }
        None => {
            let (integer, fraction) = split_digits(&magnitude, decimals);
            let fraction = match options.max_decimals {
                Some(max) => truncate_digits(fraction, max),
                None => fraction,
            };
            let integer = if options.commas {
                add_commas(&integer)
            } else {
                integer
            };
            (integer, fraction, "")
        }
    };

    let fraction = pad_fraction(trim_fraction(fraction), options.min_decimals);
    let body = join_fixed(&integer, &fraction);

    Ok(assemble(
        amount.is_negative() && !is_all_zero(&body),
        &options.prefix,
        &body,
        tier_suffix,
        &options.suffix,
    ))
}

fn compact_tier(
    magnitude: &BigInt,
    unit: &BigInt,
    options: &FormatOptions,
) -> Option<(u32, &'static str)> {
    if !options.compact {
        return None;
    }
    let whole = magnitude / unit;
    COMPACT_TIERS
        .iter()
        .copied()
        .find(|(exponent, _)| whole >= pow10(*exponent))
}

pub(crate) fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

/// Split the decimal digits of a non-negative integer at `digits` places from the right
pub(crate) fn split_digits(value: &BigInt, digits: u32) -> (String, String) {
    let unit = pow10(digits);
    let integer = value / &unit;
    let remainder = value % &unit;
    let fraction = if digits == 0 {
        String::new()
    } else {
        format!("{:0>width$}", remainder.to_string(), width = digits as usize)
    };
    (integer.to_string(), fraction)
}

pub(crate) fn truncate_digits(mut fraction: String, max: u32) -> String {
    fraction.truncate(max as usize);
    fraction
}

pub(crate) fn trim_fraction(fraction: String) -> String {
    fraction.trim_end_matches('0').to_string()
}

pub(crate) fn pad_fraction(fraction: String, min: u32) -> String {
    format!("{:0<width$}", fraction, width = min as usize)
}

pub(crate) fn join_fixed(integer: &str, fraction: &str) -> String {
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    }
}

pub(crate) fn is_all_zero(body: &str) -> bool {
    body.chars().all(|c| !c.is_ascii_digit() || c == '0')
}

/// Sign first, then caller prefix, number, magnitude suffix, caller suffix
pub(crate) fn assemble(
    negative: bool,
    prefix: &str,
    body: &str,
    tier_suffix: &str,
    suffix: &str,
) -> String {
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}{}{}", sign, prefix, body, tier_suffix, suffix)
}

/// Add commas to an integer digit string
fn add_commas(digits: &str) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        result.push(c);
        let pos = len - i - 1;
        if pos > 0 && pos % 3 == 0 {
            result.push(',');
        }
    }

    result
}
