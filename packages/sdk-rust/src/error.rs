use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

/// Longest slice of the offending input kept inside a [`FormatError`].
const PREVIEW_CHARS: usize = 64;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Malformed or out-of-policy string / option input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value '{input}': {reason}")]
pub struct FormatError {
    /// Bounded preview of the rejected raw value
    pub input: String,
    pub reason: FormatReason,
}

impl FormatError {
    pub fn new(input: &str, reason: FormatReason) -> Self {
        let input = match input.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &input[..cut]),
            None => input.to_string(),
        };
        tracing::debug!(reason = %reason, input = %input, "rejected input");
        Self { input, reason }
    }
}

/// Stable reason attached to every [`FormatError`]. Match on this, not on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatReason {
    #[error("Input too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("Input is empty")]
    Empty,

    #[error("Commas are not allowed, please remove thousands separators")]
    ThousandsSeparator,

    #[error("Currency symbols are not allowed")]
    CurrencySymbol,

    #[error("Spaces are not allowed")]
    Whitespace,

    #[error("Invalid character '{0}' found")]
    InvalidCharacter(char),

    #[error("Minus sign is only allowed at the start")]
    MisplacedSign,

    #[error("Multiple decimal points found")]
    MultipleDecimalPoints,

    #[error("No digits found")]
    NoDigits,

    #[error("Too many decimals (max {max})")]
    TooManyDecimals { max: u32 },

    #[error("Number is not finite")]
    NotFinite,

    #[error("{option} must be between 0 and {max}")]
    OptionOutOfRange { option: &'static str, max: u32 },

    #[error("Invalid hex string")]
    InvalidHex,

    #[error("Hex string exceeds {width} bytes")]
    HexTooLong { width: usize },

    #[error("String exceeds {width} bytes")]
    TextTooLong { width: usize },
}

/// Semantically invalid numeric arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Reward amount must be non-negative")]
    NegativeAmount,

    #[error("{name} must be an integer")]
    NotAnInteger { name: &'static str },

    #[error("{name} must be between {min} and {max} bps")]
    OutOfRange {
        name: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Invalid address or transaction hash.")]
    InvalidAddressOrHash,

    #[error("Duration must be non-negative")]
    NegativeDuration,

    #[error("Duration must be an integer")]
    DurationNotInteger,

    #[error("Duration must be between {min} and {max} seconds")]
    DurationOutOfRange { min: i64, max: i64 },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ValidationError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = FormatError::new("1,000", FormatReason::ThousandsSeparator);
        assert_eq!(
            err.to_string(),
            "Invalid value '1,000': Commas are not allowed, please remove thousands separators"
        );
    }

    #[test]
    fn test_format_error_preview_is_bounded() {
        let huge = "9".repeat(10_000);
        let err = FormatError::new(&huge, FormatReason::TooLong { max: 32 });
        assert_eq!(err.input.len(), PREVIEW_CHARS + 3);
        assert!(err.input.ends_with("..."));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let input = "é".repeat(100);
        let err = FormatError::new(&input, FormatReason::InvalidCharacter('é'));
        assert_eq!(err.input.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::OutOfRange {
            name: "Guild fee",
            min: 0,
            max: 1500,
        };
        assert_eq!(err.to_string(), "Guild fee must be between 0 and 1500 bps");
        assert_eq!(
            ValidationError::NotAnInteger { name: "Guild fee" }.to_string(),
            "Guild fee must be an integer"
        );
    }

    #[test]
    fn test_sdk_error_wraps_sources() {
        let err: SdkError = ValidationError::NegativeAmount.into();
        assert_eq!(err.to_string(), "Reward amount must be non-negative");
        assert!(matches!(err, SdkError::Validation(_)));
    }
}
