use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::error::{FormatError, FormatReason};
use crate::format::{
    assemble, check_decimals_option, is_all_zero, join_fixed, pad_fraction, pow10, split_digits,
    trim_fraction,
};

/// Display options for [`format_bps`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BpsFormatOptions {
    pub min_decimals: u32,
    pub prefix: String,
    pub suffix: String,
}

impl Default for BpsFormatOptions {
    fn default() -> Self {
        Self {
            min_decimals: 0,
            prefix: String::new(),
            suffix: "%".to_string(),
        }
    }
}

impl BpsFormatOptions {
    pub fn with_min_decimals(mut self, min_decimals: u32) -> Self {
        self.min_decimals = min_decimals;
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
}

/// Render basis points as a percentage (150 -> "1.5%")
///
/// Fractional basis points are kept exactly as written: the shortest decimal
/// form of `bps` is shifted two places, so `33.33` becomes `0.3333%`.
///
/// # Example
/// ```
/// use amount_sdk::{format_bps, BpsFormatOptions};
/// assert_eq!(format_bps(150.0, &BpsFormatOptions::default()).unwrap(), "1.5%");
/// assert_eq!(format_bps(5.0, &BpsFormatOptions::default().with_min_decimals(2)).unwrap(), "0.05%");
/// ```
pub fn format_bps(bps: f64, options: &BpsFormatOptions) -> Result<String, FormatError> {
    format_bps_with(bps, options, &Limits::default())
}

pub(crate) fn format_bps_with(
    bps: f64,
    options: &BpsFormatOptions,
    limits: &Limits,
) -> Result<String, FormatError> {
    check_decimals_option("minDecimals", options.min_decimals, limits.max_decimals_option)?;

    let (mantissa, scale) = percent_digits(bps)?;
    let (integer, fraction) = split_digits(&mantissa.abs(), scale);
    let fraction = pad_fraction(trim_fraction(fraction), options.min_decimals);
    let body = join_fixed(&integer, &fraction);

    Ok(assemble(
        mantissa.is_negative() && !is_all_zero(&body),
        &options.prefix,
        &body,
        "",
        &options.suffix,
    ))
}

/// `bps / 100` as an integer mantissa and a non-negative decimal scale
fn percent_digits(bps: f64) -> Result<(BigInt, u32), FormatError> {
    let raw = bps.to_string();
    if !bps.is_finite() {
        return Err(FormatError::new(&raw, FormatReason::NotFinite));
    }
    let value = BigDecimal::from_str(&raw).map_err(|_| FormatError::new(&raw, FormatReason::NotFinite))?;
    let (digits, exponent) = value.normalized().into_bigint_and_exponent();

    let scale = exponent + 2;
    if scale >= 0 {
        Ok((digits, scale as u32))
    } else {
        Ok((digits * pow10(scale.unsigned_abs() as u32), 0))
    }
}
