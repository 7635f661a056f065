/// Shared fixtures for SDK integration tests
use amount_sdk::{AmountEngine, BaseUnits, EngineConfig, TokenConfig};

pub const ADDRESS: &str = "0x1234567890123456789012345678901234567890";
pub const TX_HASH: &str = "0x1234567890123456789012345678901234567890123456789012345678901234";

#[allow(dead_code)]
/// Engine with the bundled USDC defaults (6 decimals)
pub fn usdc_engine() -> AmountEngine {
    AmountEngine::new(&EngineConfig::default()).expect("default config is valid")
}

#[allow(dead_code)]
/// Engine for an 18-decimal token
pub fn wei_engine() -> AmountEngine {
    let config = EngineConfig {
        token: TokenConfig {
            ticker: "HRZN".to_string(),
            decimals: 18,
        },
        ..EngineConfig::default()
    };
    AmountEngine::new(&config).expect("18 decimals is valid")
}

#[allow(dead_code)]
pub fn units(value: i128) -> BaseUnits {
    BaseUnits::from(value)
}
