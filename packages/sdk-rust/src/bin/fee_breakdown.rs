use amount_sdk::{AmountEngine, BaseUnits, BpsFormatOptions, EngineConfig, FormatOptions};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Print the fee breakdown for a reward
///
/// Usage: fee_breakdown <amount> [guild_fee_bps]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let amount = args.next().unwrap_or_else(|| "100".to_string());
    let guild_bps: i64 = match args.next() {
        Some(raw) => raw.parse().context("guild_fee_bps must be an integer")?,
        None => 300,
    };

    let config = EngineConfig::load().context("Failed to load packages/sdk-rust/config.toml")?;
    let engine = AmountEngine::new(&config)?;
    let ticker = engine.amounts.ticker().to_string();

    let reward = engine.amounts.parse(amount.as_str())?;
    let split = engine.fees.split(&reward, guild_bps)?;
    let ddr = engine.fees.ddr(&reward)?;

    let opts = FormatOptions::default().with_min_decimals(2);
    let show = |value: &BaseUnits| engine.amounts.format(value, &opts);
    let rate = |bps: u32| engine.format_bps(f64::from(bps), &BpsFormatOptions::default());

    println!("💰 Reward: {} {}", show(&reward)?, ticker);
    println!("\n   Fee breakdown ({} guild fee):", rate(guild_bps as u32)?);
    println!("   • Performer: {} {}", show(&split.performer)?, ticker);
    println!("   • Protocol:  {} {} ({})", show(&split.protocol)?, ticker, rate(config.fees.protocol_bps)?);
    println!("   • Labs:      {} {} ({})", show(&split.labs)?, ticker, rate(config.fees.labs_bps)?);
    println!("   • Resolver:  {} {} ({})", show(&split.resolver)?, ticker, rate(config.fees.resolver_bps)?);
    println!("   • Guild:     {} {}", show(&split.guild)?, ticker);
    println!("\n   DDR (Dispute Reserve): {} {} per party", show(&ddr)?, ticker);

    Ok(())
}
