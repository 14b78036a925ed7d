//! How far a locked badge is from unlocking.

use serde::{Deserialize, Serialize};

use super::kind::Metric;
use super::model::Achievement;
use crate::accrual::AccrualSnapshot;

/// Time-based estimate; only day and hour metrics can be projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub total_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    /// Metric units still missing (0 once met).
    pub remaining: f64,
    pub estimate: Option<TimeEstimate>,
}

impl Countdown {
    pub fn for_achievement(achievement: &Achievement, snapshot: &AccrualSnapshot) -> Self {
        let remaining = (achievement.requirement - achievement.progress(snapshot)).max(0.0);
        let estimate = match achievement.kind.metric() {
            Metric::DaysElapsed => {
                let days = remaining.trunc();
                Some(TimeEstimate {
                    days: days as u64,
                    hours: ((remaining - days) * 24.0) as u64,
                    minutes: 0,
                    total_secs: (remaining * 86_400.0) as u64,
                })
            }
            Metric::HoursOfLife => {
                let hours = remaining.trunc();
                Some(TimeEstimate {
                    days: 0,
                    hours: hours as u64,
                    minutes: ((remaining - hours) * 60.0) as u64,
                    total_secs: (remaining * 3_600.0) as u64,
                })
            }
            Metric::UnitsAvoided | Metric::MoneySaved => None,
        };
        Self { remaining, estimate }
    }

    /// Human-readable countdown line.
    pub fn label(&self) -> String {
        match self.estimate {
            Some(t) if t.total_secs > 0 => {
                if t.days > 0 {
                    format!("{} days {} hrs", t.days, t.hours)
                } else if t.hours > 0 {
                    format!("{} hrs {} min", t.hours, t.minutes)
                } else if t.minutes > 0 {
                    format!("{} min", t.minutes)
                } else {
                    "Unlocking soon...".to_string()
                }
            }
            _ => "Keep going!".to_string(),
        }
    }
}
