//! Mission duration helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DurationLimits;
use crate::error::ValidationError;

const UNITS: [(i64, &str, &str); 4] = [
    (86_400, "d", "day"),
    (3_600, "h", "hour"),
    (60, "m", "minute"),
    (1, "s", "second"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `1d 1h 1m 1s`
    #[default]
    Short,
    /// `1 day 1 hour 1 minute 1 second`
    Long,
}

/// Render a number of seconds as days / hours / minutes / seconds
pub fn format_duration(seconds: i64, style: DurationStyle) -> Result<String, ValidationError> {
    if seconds < 0 {
        return Err(ValidationError::NegativeDuration);
    }

    let mut remaining = seconds;
    let mut parts = Vec::new();
    for (size, short, long) in UNITS {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            parts.push(render_unit(count, short, long, style));
        }
    }

    if parts.is_empty() {
        parts.push(render_unit(0, "s", "second", style));
    }
    Ok(parts.join(" "))
}

fn render_unit(count: i64, short: &str, long: &str, style: DurationStyle) -> String {
    match style {
        DurationStyle::Short => format!("{count}{short}"),
        DurationStyle::Long if count == 1 => format!("{count} {long}"),
        DurationStyle::Long => format!("{count} {long}s"),
    }
}

/// Expiry timestamps bounded by the configured mission durations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationPolicy {
    limits: DurationLimits,
}

impl DurationPolicy {
    pub fn new(limits: DurationLimits) -> Result<Self, ValidationError> {
        if limits.min_secs < 0 || limits.min_secs > limits.max_secs {
            return Err(ValidationError::invalid_config(
                "durations",
                "min_secs must be non-negative and not above max_secs",
            ));
        }
        Ok(Self { limits })
    }

    /// Unix timestamp `duration_secs` from now
    pub fn expires_at(&self, duration_secs: i64) -> Result<i64, ValidationError> {
        self.expires_at_from(Utc::now(), duration_secs)
    }

    /// Same as [`expires_at`](Self::expires_at) for durations held as `f64`
    pub fn expires_at_f64(&self, duration_secs: f64) -> Result<i64, ValidationError> {
        if !duration_secs.is_finite() || duration_secs.fract() != 0.0 {
            return Err(ValidationError::DurationNotInteger);
        }
        self.expires_at(duration_secs as i64)
    }

    pub fn expires_at_from(
        &self,
        now: DateTime<Utc>,
        duration_secs: i64,
    ) -> Result<i64, ValidationError> {
        let DurationLimits { min_secs, max_secs } = self.limits;
        if !(min_secs..=max_secs).contains(&duration_secs) {
            return Err(ValidationError::DurationOutOfRange {
                min: min_secs,
                max: max_secs,
            });
        }
        now.timestamp()
            .checked_add(duration_secs)
            .ok_or(ValidationError::DurationOutOfRange {
                min: min_secs,
                max: max_secs,
            })
    }
}

/// True once the current time is strictly past `expires_at`
pub fn is_expired(expires_at: i64) -> bool {
    is_expired_at(Utc::now(), expires_at)
}

pub fn is_expired_at(now: DateTime<Utc>, expires_at: i64) -> bool {
    now.timestamp() > expires_at
}
