//! Smoke-free clock and savings accrual.
//!
//! Everything here is a pure function of `(Profile, now)`. Missing or zero
//! rates never fail; they contribute nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{ModalityRates, Profile};

pub const SECS_PER_DAY: u64 = 86_400;
pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_MINUTE: u64 = 60;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Elapsed smoke-free time split into calendar-free components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub days: u64,
    /// 0..24
    pub hours: u64,
    /// 0..60
    pub minutes: u64,
    /// 0..60
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_secs(elapsed_secs: u64) -> Self {
        Self {
            days: elapsed_secs / SECS_PER_DAY,
            hours: (elapsed_secs % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (elapsed_secs % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: elapsed_secs % SECS_PER_MINUTE,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Whole hours elapsed (`days * 24 + hours`), the "life regained" metric.
    pub fn total_hours(&self) -> u64 {
        self.days * 24 + self.hours
    }
}

/// Derived progress at one instant. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSnapshot {
    pub breakdown: DurationBreakdown,
    pub units_avoided: u64,
    pub money_saved: f64,
    pub at: DateTime<Utc>,
}

impl AccrualSnapshot {
    pub fn hours_of_life(&self) -> u64 {
        self.breakdown.total_hours()
    }
}

/// Milliseconds since `stop_date`, clamped at zero for future quit dates.
pub fn elapsed_ms(stop_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - stop_date).num_milliseconds().max(0)
}

/// `floor(elapsed_days * per_day)`, or 0 when the rate is unset.
pub fn units_avoided(elapsed_ms: i64, rates: &ModalityRates) -> u64 {
    let Some(per_day) = rates.per_day else {
        return 0;
    };
    let elapsed_days = elapsed_ms.max(0) as f64 / MS_PER_DAY;
    (elapsed_days * per_day).floor().max(0.0) as u64
}

/// `(units / per_pack) * price`, or 0 when pack size or price is unset,
/// or the pack size is zero.
pub fn money_saved(units: u64, rates: &ModalityRates) -> f64 {
    let (Some(per_pack), Some(price)) = (rates.per_pack, rates.price_per_pack) else {
        return 0.0;
    };
    if per_pack <= 0.0 {
        return 0.0;
    }
    ((units as f64 / per_pack) * price).max(0.0)
}

/// Compute the full snapshot for `profile` at `now`.
pub fn compute(profile: &Profile, now: DateTime<Utc>) -> AccrualSnapshot {
    let elapsed = elapsed_ms(profile.stop_date, now);
    let breakdown = DurationBreakdown::from_secs((elapsed / 1000) as u64);

    let mut units_total = 0;
    let mut money_total = 0.0;
    for rates in profile.active_rates() {
        let units = units_avoided(elapsed, &rates);
        units_total += units;
        money_total += money_saved(units, &rates);
    }

    AccrualSnapshot {
        breakdown,
        units_avoided: units_total,
        money_saved: money_total,
        at: now,
    }
}
