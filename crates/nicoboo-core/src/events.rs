use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accrual::AccrualSnapshot;
use crate::achievement::{Achievement, RequirementKind};

/// Every state change of the progress engine produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Accrual values as of the latest tick.
    ProgressSnapshot {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
        units_avoided: u64,
        money_saved: f64,
        currency: String,
        unlocked_count: usize,
        total_count: usize,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        achievement_id: String,
        title: String,
        requirement: f64,
        requirement_kind: RequirementKind,
        at: DateTime<Utc>,
    },
    ProfileUpdated {
        stop_date: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    ProfileCleared {
        at: DateTime<Utc>,
    },
    /// The active partition changed and its achievements were loaded.
    PartitionSwitched {
        user_id: Option<String>,
        achievements: usize,
        at: DateTime<Utc>,
    },
    /// Achievement writes failed; they stay pending for the next tick.
    PersistFailed {
        pending: usize,
        message: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn progress(
        snapshot: &AccrualSnapshot,
        currency: &str,
        unlocked_count: usize,
        total_count: usize,
    ) -> Self {
        let b = snapshot.breakdown;
        Event::ProgressSnapshot {
            days: b.days,
            hours: b.hours,
            minutes: b.minutes,
            seconds: b.seconds,
            units_avoided: snapshot.units_avoided,
            money_saved: snapshot.money_saved,
            currency: currency.to_string(),
            unlocked_count,
            total_count,
            at: snapshot.at,
        }
    }

    pub fn unlocked(achievement: &Achievement) -> Self {
        Event::AchievementUnlocked {
            achievement_id: achievement.id.clone(),
            title: achievement.title.clone(),
            requirement: achievement.requirement,
            requirement_kind: achievement.kind,
            at: achievement.unlocked_at.unwrap_or_else(Utc::now),
        }
    }
}
