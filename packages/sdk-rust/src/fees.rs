//! Basis-point fee arithmetic
//!
//! Every share is `floor(amount * bps / 10_000)`. The performer receives the
//! remainder, so the five shares of a [`FeeSplit`] always sum to the reward.

use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

use crate::config::FeeSchedule;
use crate::error::ValidationError;
use crate::parse::BaseUnits;

/// 10,000 bps = 100%
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Integer rate in `[0, 10_000]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BasisPoints(u32);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);
    pub const MAX: BasisPoints = BasisPoints(BPS_DENOMINATOR);

    pub fn new(bps: u32) -> Result<Self, ValidationError> {
        if bps > BPS_DENOMINATOR {
            return Err(ValidationError::OutOfRange {
                name: "Basis points",
                min: 0,
                max: BPS_DENOMINATOR as i64,
            });
        }
        Ok(Self(bps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `floor(amount * self / 10_000)` for a non-negative amount
    pub fn apply(self, amount: &BaseUnits) -> BaseUnits {
        amount * BigInt::from(self.0) / BigInt::from(BPS_DENOMINATOR)
    }
}

impl TryFrom<u32> for BasisPoints {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BasisPoints> for u32 {
    fn from(value: BasisPoints) -> Self {
        value.0
    }
}

/// Caller-supplied rate before validation
///
/// Rates arriving from loosely typed sources (JSON, form fields) may be
/// fractional or negative; those are rejected rather than rounded or clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateInput {
    Integer(i64),
    Float(f64),
}

impl From<i64> for RateInput {
    fn from(value: i64) -> Self {
        RateInput::Integer(value)
    }
}

impl From<i32> for RateInput {
    fn from(value: i32) -> Self {
        RateInput::Integer(i64::from(value))
    }
}

impl From<u32> for RateInput {
    fn from(value: u32) -> Self {
        RateInput::Integer(i64::from(value))
    }
}

impl From<f64> for RateInput {
    fn from(value: f64) -> Self {
        RateInput::Float(value)
    }
}

impl From<BasisPoints> for RateInput {
    fn from(value: BasisPoints) -> Self {
        RateInput::Integer(i64::from(value.0))
    }
}

impl RateInput {
    fn validate(self, name: &'static str, max: u32) -> Result<BasisPoints, ValidationError> {
        let value = match self {
            RateInput::Integer(value) => value,
            RateInput::Float(value) if value.is_finite() && value.fract() == 0.0 => value as i64,
            RateInput::Float(_) => return Err(ValidationError::NotAnInteger { name }),
        };
        if value < 0 || value > i64::from(max) {
            return Err(ValidationError::OutOfRange {
                name,
                min: 0,
                max: i64::from(max),
            });
        }
        BasisPoints::new(value as u32)
    }
}

/// Breakdown of a mission reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub performer: BaseUnits,
    pub protocol: BaseUnits,
    pub labs: BaseUnits,
    pub resolver: BaseUnits,
    pub guild: BaseUnits,
}

impl FeeSplit {
    pub fn total(&self) -> BaseUnits {
        &self.performer + &self.protocol + &self.labs + &self.resolver + &self.guild
    }
}

/// Fee split and reserve calculations for one fee schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    protocol: BasisPoints,
    labs: BasisPoints,
    resolver: BasisPoints,
    max_guild: u32,
    ddr: BasisPoints,
    lpp: BasisPoints,
}

impl FeeCalculator {
    pub fn new(schedule: &FeeSchedule) -> Result<Self, ValidationError> {
        let rate = |field: &'static str, bps: u32| {
            BasisPoints::new(bps)
                .map_err(|_| ValidationError::invalid_config(field, "must be at most 10000 bps"))
        };

        let calculator = Self {
            protocol: rate("fees.protocol_bps", schedule.protocol_bps)?,
            labs: rate("fees.labs_bps", schedule.labs_bps)?,
            resolver: rate("fees.resolver_bps", schedule.resolver_bps)?,
            max_guild: rate("fees.max_guild_bps", schedule.max_guild_bps)?.get(),
            ddr: rate("fees.ddr_bps", schedule.ddr_bps)?,
            lpp: rate("fees.lpp_bps", schedule.lpp_bps)?,
        };

        let worst_case = schedule.protocol_bps
            + schedule.labs_bps
            + schedule.resolver_bps
            + schedule.max_guild_bps;
        if worst_case > BPS_DENOMINATOR {
            return Err(ValidationError::invalid_config(
                "fees",
                format!("fixed rates plus max guild fee total {worst_case} bps, above 10000"),
            ));
        }

        Ok(calculator)
    }

    pub fn max_guild_bps(&self) -> u32 {
        self.max_guild
    }

    /// Split `reward` between performer, protocol, labs, resolver and guild
    ///
    /// # Example
    /// ```
    /// use amount_sdk::{BaseUnits, FeeCalculator, FeeSchedule};
    /// let fees = FeeCalculator::new(&FeeSchedule::default()).unwrap();
    /// let split = fees.split(&BaseUnits::from(10_000), 300).unwrap();
    /// assert_eq!(split.performer, BaseUnits::from(8_700));
    /// assert_eq!(split.guild, BaseUnits::from(300));
    /// ```
    pub fn split(
        &self,
        reward: &BaseUnits,
        guild_fee_bps: impl Into<RateInput>,
    ) -> Result<FeeSplit, ValidationError> {
        ensure_non_negative(reward)?;
        let guild_rate = guild_fee_bps.into().validate("Guild fee", self.max_guild)?;

        let protocol = self.protocol.apply(reward);
        let labs = self.labs.apply(reward);
        let resolver = self.resolver.apply(reward);
        let guild = guild_rate.apply(reward);
        let performer = reward - &protocol - &labs - &resolver - &guild;

        tracing::trace!(
            reward = %reward,
            guild_bps = guild_rate.get(),
            performer = %performer,
            "computed fee split"
        );

        Ok(FeeSplit {
            performer,
            protocol,
            labs,
            resolver,
            guild,
        })
    }

    /// Single-rate deduction, `floor(reward * rate / 10_000)`
    pub fn reserve(
        &self,
        reward: &BaseUnits,
        rate: BasisPoints,
    ) -> Result<BaseUnits, ValidationError> {
        ensure_non_negative(reward)?;
        Ok(rate.apply(reward))
    }

    /// Dynamic Dispute Reserve each party deposits
    pub fn ddr(&self, reward: &BaseUnits) -> Result<BaseUnits, ValidationError> {
        self.reserve(reward, self.ddr)
    }

    /// Loser-Pays Penalty
    pub fn lpp(&self, reward: &BaseUnits) -> Result<BaseUnits, ValidationError> {
        self.reserve(reward, self.lpp)
    }
}

fn ensure_non_negative(reward: &BaseUnits) -> Result<(), ValidationError> {
    if reward.is_negative() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(())
}
