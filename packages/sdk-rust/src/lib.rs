//! Amount SDK
//!
//! Fixed-point token amount arithmetic and formatting.
//!
//! This SDK provides:
//! - Exact decimal string <-> base unit conversion
//! - Display formatting with grouping, truncation and compact notation
//! - Basis point percentages
//! - Conservation-preserving fee splits and reserve calculations
//! - Fixed-width hex buffers for content hashes
//! - Address / transaction hash classification and explorer links
//!
//! # Example
//!
//! ```
//! use amount_sdk::{AmountEngine, EngineConfig, FormatOptions};
//!
//! let engine = AmountEngine::new(&EngineConfig::default()).unwrap();
//!
//! let reward = engine.amounts.parse("100").unwrap();
//! let split = engine.fees.split(&reward, 300).unwrap();
//!
//! let performer = engine.amounts.format(&split.performer, &FormatOptions::default()).unwrap();
//! assert_eq!(performer, "87");
//! ```

pub mod buffer;
pub mod config;
pub mod duration;
pub mod error;
pub mod explorer;
pub mod fees;
pub mod format;
pub mod parse;
pub mod percent;

pub use buffer::{random_bytes32, to_bytes32, to_fixed_hex, HexBuffer, HexCodec};
pub use config::{
    DurationLimits, EngineConfig, ExplorerConfig, FeeSchedule, Limits, TokenConfig,
};
pub use duration::{format_duration, is_expired, is_expired_at, DurationPolicy, DurationStyle};
pub use error::{FormatError, FormatReason, SdkError, SdkResult, ValidationError};
pub use explorer::{classify, format_address, truncate, Explorer, HexKind, TruncateOptions};
pub use fees::{BasisPoints, FeeCalculator, FeeSplit, RateInput, BPS_DENOMINATOR};
pub use format::{format_units, FormatOptions, TokenAmounts};
pub use parse::{parse_units, AmountInput, BaseUnits};
pub use percent::{format_bps, BpsFormatOptions};

/// Every component, built from one [`EngineConfig`]
///
/// Engines built from different configs are independent, so several tokens
/// or networks can be served side by side.
#[derive(Debug, Clone)]
pub struct AmountEngine {
    pub amounts: TokenAmounts,
    pub fees: FeeCalculator,
    pub explorer: Explorer,
    pub hex: HexCodec,
    pub durations: DurationPolicy,
    limits: Limits,
}

impl AmountEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            amounts: TokenAmounts::new(&config.token, config.limits)?,
            fees: FeeCalculator::new(&config.fees)?,
            explorer: Explorer::new(&config.explorer),
            hex: HexCodec::new(&config.limits),
            durations: DurationPolicy::new(config.durations)?,
            limits: config.limits,
        })
    }

    /// [`format_bps`] under this engine's option caps
    pub fn format_bps(&self, bps: f64, options: &BpsFormatOptions) -> Result<String, FormatError> {
        percent::format_bps_with(bps, options, &self.limits)
    }
}
