/// Fee split and reserve behaviour through the public engine API
mod helpers;

use amount_sdk::{
    format_bps, AmountEngine, BaseUnits, BpsFormatOptions, EngineConfig, FeeSchedule,
    FormatOptions, ValidationError,
};
use helpers::{units, usdc_engine};
use pretty_assertions::assert_eq;

#[test]
fn test_split_of_parsed_reward() {
    let engine = usdc_engine();
    let reward = engine.amounts.parse("100").unwrap();
    let split = engine.fees.split(&reward, 300).unwrap();

    let show = |value: &BaseUnits| engine.amounts.format(value, &FormatOptions::default()).unwrap();
    assert_eq!(show(&split.performer), "87");
    assert_eq!(show(&split.protocol), "4");
    assert_eq!(show(&split.labs), "4");
    assert_eq!(show(&split.resolver), "2");
    assert_eq!(show(&split.guild), "3");
    assert_eq!(show(&engine.fees.ddr(&reward).unwrap()), "5");
}

#[test]
fn test_conservation_for_awkward_rewards() {
    let engine = usdc_engine();
    let mut reward = units(1);
    // 1, 3, 9, ... up to ~3^60, well past u64
    for _ in 0..60 {
        for guild in [0_u32, 7, 333, 1500] {
            let split = engine.fees.split(&reward, guild).unwrap();
            assert_eq!(split.total(), reward);
        }
        reward = reward * 3_u32;
    }
}

#[test]
fn test_configured_schedule_is_used() {
    let config = EngineConfig {
        fees: FeeSchedule {
            protocol_bps: 250,
            labs_bps: 250,
            resolver_bps: 200,
            max_guild_bps: 1000,
            ddr_bps: 1000,
            lpp_bps: 0,
        },
        ..EngineConfig::default()
    };
    let engine = AmountEngine::new(&config).unwrap();

    let split = engine.fees.split(&units(10_000), 1000).unwrap();
    assert_eq!(split.protocol, units(250));
    assert_eq!(split.guild, units(1000));
    assert_eq!(split.performer, units(10_000 - 250 - 250 - 200 - 1000));
    assert_eq!(engine.fees.ddr(&units(10_000)).unwrap(), units(1000));
    assert_eq!(engine.fees.lpp(&units(10_000)).unwrap(), units(0));

    let err = engine.fees.split(&units(10_000), 1001).unwrap_err();
    assert_eq!(err.to_string(), "Guild fee must be between 0 and 1000 bps");
}

#[test]
fn test_invalid_schedule_rejected_by_engine() {
    let config = EngineConfig {
        fees: FeeSchedule {
            protocol_bps: 5_000,
            labs_bps: 5_000,
            ..FeeSchedule::default()
        },
        ..EngineConfig::default()
    };
    assert!(matches!(
        AmountEngine::new(&config),
        Err(ValidationError::InvalidConfig { .. })
    ));
}

#[test]
fn test_rates_render_as_percentages() {
    let schedule = FeeSchedule::default();
    let options = BpsFormatOptions::default();
    assert_eq!(format_bps(f64::from(schedule.protocol_bps), &options).unwrap(), "4%");
    assert_eq!(format_bps(f64::from(schedule.max_guild_bps), &options).unwrap(), "15%");
    assert_eq!(
        usdc_engine()
            .format_bps(f64::from(schedule.ddr_bps), &options.with_min_decimals(1))
            .unwrap(),
        "5.0%"
    );
}

#[test]
fn test_split_json_shape() {
    let split = usdc_engine().fees.split(&units(10_000), 300).unwrap();
    let json = serde_json::to_value(&split).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 5);
    for key in ["performer", "protocol", "labs", "resolver", "guild"] {
        assert!(keys.iter().any(|k| k == key), "missing {key}");
    }
}
