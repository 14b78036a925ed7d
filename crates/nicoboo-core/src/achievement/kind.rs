//! Requirement kinds and the metric each one reads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::accrual::AccrualSnapshot;
use crate::error::ValidationError;

/// Requirement tag stored with each achievement.
///
/// `DaysSmokeFree` and `LifeRegained` read the same metrics as `DaysWithout`
/// and `HoursOfLife`. Both spellings exist in stored data, so they stay
/// distinct tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementKind {
    CigarettesAvoided,
    DaysWithout,
    HoursOfLife,
    MoneySaved,
    DaysSmokeFree,
    LifeRegained,
}

/// The progress value a requirement is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    UnitsAvoided,
    DaysElapsed,
    HoursOfLife,
    MoneySaved,
}

impl RequirementKind {
    pub const ALL: [RequirementKind; 6] = [
        RequirementKind::CigarettesAvoided,
        RequirementKind::DaysWithout,
        RequirementKind::HoursOfLife,
        RequirementKind::MoneySaved,
        RequirementKind::DaysSmokeFree,
        RequirementKind::LifeRegained,
    ];

    pub fn metric(self) -> Metric {
        match self {
            RequirementKind::CigarettesAvoided => Metric::UnitsAvoided,
            RequirementKind::DaysWithout | RequirementKind::DaysSmokeFree => Metric::DaysElapsed,
            RequirementKind::HoursOfLife | RequirementKind::LifeRegained => Metric::HoursOfLife,
            RequirementKind::MoneySaved => Metric::MoneySaved,
        }
    }

    /// Tag as written to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            RequirementKind::CigarettesAvoided => "cigarettesAvoided",
            RequirementKind::DaysWithout => "daysWithout",
            RequirementKind::HoursOfLife => "hoursOfLife",
            RequirementKind::MoneySaved => "moneySaved",
            RequirementKind::DaysSmokeFree => "daysSmokeFree",
            RequirementKind::LifeRegained => "lifeRegained",
        }
    }

    /// Short motivational line shown next to an unlocked badge.
    pub fn encouragement(self) -> &'static str {
        match self.metric() {
            Metric::UnitsAvoided => {
                "Every cigarette you skip is a powerful choice for your future."
            }
            Metric::DaysElapsed => {
                "Every smoke-free day rewires your story toward strength and freedom."
            }
            Metric::HoursOfLife => {
                "You are literally adding more time to your life, one choice at a time."
            }
            Metric::MoneySaved => {
                "You are turning your willpower into real savings and new possibilities."
            }
        }
    }
}

impl Metric {
    pub fn read(self, snapshot: &AccrualSnapshot) -> f64 {
        match self {
            Metric::UnitsAvoided => snapshot.units_avoided as f64,
            Metric::DaysElapsed => snapshot.breakdown.days as f64,
            Metric::HoursOfLife => snapshot.hours_of_life() as f64,
            Metric::MoneySaved => snapshot.money_saved,
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequirementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownTag {
                kind: "requirement type",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accrual::DurationBreakdown;
    use chrono::Utc;

    #[test]
    fn kinds_map_to_their_metrics() {
        let expected = [
            Metric::UnitsAvoided,
            Metric::DaysElapsed,
            Metric::HoursOfLife,
            Metric::MoneySaved,
            Metric::DaysElapsed,
            Metric::HoursOfLife,
        ];
        for (kind, metric) in RequirementKind::ALL.into_iter().zip(expected) {
            assert_eq!(kind.metric(), metric, "{kind}");
        }
    }

    #[test]
    fn aliases_share_metrics() {
        assert_eq!(
            RequirementKind::DaysSmokeFree.metric(),
            RequirementKind::DaysWithout.metric()
        );
        assert_eq!(
            RequirementKind::LifeRegained.metric(),
            RequirementKind::HoursOfLife.metric()
        );
        assert_ne!(RequirementKind::DaysSmokeFree, RequirementKind::DaysWithout);
    }

    #[test]
    fn storage_tags_round_trip() {
        for kind in RequirementKind::ALL {
            assert_eq!(kind.as_str().parse::<RequirementKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!("cigarettes".parse::<RequirementKind>().is_err());
    }

    #[test]
    fn metrics_read_snapshot_fields() {
        let snap = AccrualSnapshot {
            breakdown: DurationBreakdown { days: 2, hours: 3, minutes: 10, seconds: 5 },
            units_avoided: 44,
            money_saved: 22.5,
            at: Utc::now(),
        };
        assert_eq!(Metric::UnitsAvoided.read(&snap), 44.0);
        assert_eq!(Metric::DaysElapsed.read(&snap), 2.0);
        assert_eq!(Metric::HoursOfLife.read(&snap), 51.0);
        assert_eq!(Metric::MoneySaved.read(&snap), 22.5);
    }
}
