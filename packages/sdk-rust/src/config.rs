use serde::{Deserialize, Serialize};

use crate::error::SdkResult;

/// Engine configuration (from packages/sdk-rust/config.toml)
///
/// Every section falls back to its default when missing, so a file only
/// needs to carry the values a deployment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub token: TokenConfig,
    pub fees: FeeSchedule,
    pub explorer: ExplorerConfig,
    pub limits: Limits,
    pub durations: DurationLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub ticker: String,
    pub decimals: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ticker: "USDC".to_string(),
            decimals: 6,
        }
    }
}

/// Protocol fee rates in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub protocol_bps: u32,
    pub labs_bps: u32,
    pub resolver_bps: u32,
    pub max_guild_bps: u32,
    /// Dynamic Dispute Reserve
    pub ddr_bps: u32,
    /// Loser-Pays Penalty
    pub lpp_bps: u32,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            protocol_bps: 400,
            labs_bps: 400,
            resolver_bps: 200,
            max_guild_bps: 1500,
            ddr_bps: 500,
            lpp_bps: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub mainnet_url: String,
    pub testnet_url: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            mainnet_url: "https://basescan.org".to_string(),
            testnet_url: "https://sepolia.basescan.org".to_string(),
        }
    }
}

/// Per-call work bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Longest decimal string accepted by the parser
    pub max_input_len: usize,
    /// Upper bound for `min_decimals` / `max_decimals` style options
    pub max_decimals_option: u32,
    /// Widest buffer the hex codec will build
    pub max_buffer_width: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_len: 32,
            max_decimals_option: 100,
            max_buffer_width: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationLimits {
    pub min_secs: i64,
    pub max_secs: i64,
}

impl Default for DurationLimits {
    fn default() -> Self {
        Self {
            min_secs: 3600,
            max_secs: 30 * 24 * 3600,
        }
    }
}

impl EngineConfig {
    /// Load configuration from config.toml, then `AMOUNT_SDK__*` env overrides
    ///
    /// The file path can be overridden with `AMOUNT_SDK_CONFIG`; otherwise
    /// CARGO_MANIFEST_DIR is used so the path is stable regardless of where
    /// the binary is run from.
    pub fn load() -> SdkResult<Self> {
        let config_path = std::env::var("AMOUNT_SDK_CONFIG")
            .unwrap_or_else(|_| format!("{}/config.toml", env!("CARGO_MANIFEST_DIR")));

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&config_path).required(true))
            .add_source(
                config::Environment::with_prefix("AMOUNT_SDK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: EngineConfig = settings.try_deserialize()?;
        tracing::info!(path = %config_path, ticker = %config.token.ticker, "loaded engine config");
        Ok(config)
    }

    /// Parse an inline TOML document
    pub fn from_toml_str(contents: &str) -> SdkResult<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.token.decimals, 6);
        assert_eq!(config.fees.protocol_bps, 400);
        assert_eq!(config.fees.max_guild_bps, 1500);
        assert_eq!(config.limits.max_input_len, 32);
        assert_eq!(config.durations.max_secs, 2_592_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [token]
            ticker = "HRZN"
            decimals = 18

            [fees]
            max_guild_bps = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.token.ticker, "HRZN");
        assert_eq!(config.token.decimals, 18);
        assert_eq!(config.fees.max_guild_bps, 1000);
        assert_eq!(config.fees.labs_bps, 400);
        assert_eq!(config.explorer, ExplorerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = EngineConfig::from_toml_str("[token]\ndecimals = \"six\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_bundled_config_file() {
        let config = EngineConfig::load().unwrap();
        assert_eq!(config.token.ticker, "USDC");
        assert_eq!(config.fees, FeeSchedule::default());
    }
}
