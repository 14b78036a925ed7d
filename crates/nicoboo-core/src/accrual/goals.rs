//! Saving goals: what the accrued money could buy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::partition::Partition;
use crate::profile::Profile;

/// A preset goal offered to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalPreset {
    pub name: &'static str,
    pub amount: f64,
    pub image_name: &'static str,
}

pub const PRESET_GOALS: [GoalPreset; 10] = [
    GoalPreset { name: "MacBook Pro", amount: 2000.0, image_name: "laptopcomputer" },
    GoalPreset { name: "iPhone 15 Pro", amount: 999.0, image_name: "iphone" },
    GoalPreset { name: "Tesla Model 3", amount: 40000.0, image_name: "car.fill" },
    GoalPreset { name: "iPad Pro", amount: 1099.0, image_name: "ipad" },
    GoalPreset { name: "AirPods Pro", amount: 249.0, image_name: "airpods" },
    GoalPreset { name: "Apple Watch", amount: 399.0, image_name: "applewatch" },
    GoalPreset { name: "Gaming PC", amount: 1500.0, image_name: "desktopcomputer" },
    GoalPreset { name: "Vacation Trip", amount: 3000.0, image_name: "airplane" },
    GoalPreset { name: "New Car", amount: 25000.0, image_name: "car.fill" },
    GoalPreset { name: "Designer Bag", amount: 2000.0, image_name: "handbag.fill" },
];

/// Case-insensitive preset lookup by name.
pub fn find_preset(name: &str) -> Option<&'static GoalPreset> {
    PRESET_GOALS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub target_amount: f64,
    pub image_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Where a goal stands against the current savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub saved: f64,
    pub target: f64,
    /// 0.0 ..= 1.0
    pub fraction: f64,
    /// Whole days still needed at the current daily rate (0 once reached
    /// or when nothing is being saved).
    pub days_needed: u64,
    pub achieved: bool,
}

impl SavingGoal {
    pub fn new(
        partition: &Partition,
        name: &str,
        target_amount: f64,
        image_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name".into()));
        }
        if !target_amount.is_finite() || target_amount <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "target_amount".into(),
                message: format!("must be a positive number (got {target_amount})"),
            });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: partition.user_id().map(str::to_string),
            name: name.to_string(),
            target_amount,
            image_name,
            created_at,
        })
    }

    pub fn from_preset(
        partition: &Partition,
        preset: &GoalPreset,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            partition,
            preset.name,
            preset.amount,
            Some(preset.image_name.to_string()),
            created_at,
        )
    }

    pub fn partition(&self) -> Partition {
        Partition::from_user_id(self.user_id.as_deref())
    }

    pub fn progress(&self, money_saved: f64, profile: &Profile) -> GoalProgress {
        let saved = money_saved.max(0.0);
        let fraction = if self.target_amount > 0.0 {
            (saved / self.target_amount).min(1.0)
        } else {
            0.0
        };
        let daily = daily_savings(profile);
        let remaining = (self.target_amount - saved).max(0.0);
        let days_needed = if daily > 0.0 {
            (remaining / daily).ceil() as u64
        } else {
            0
        };
        GoalProgress {
            saved,
            target: self.target_amount,
            fraction,
            days_needed,
            achieved: remaining <= 0.0,
        }
    }
}

/// Money saved per smoke-free day across the active modalities.
pub fn daily_savings(profile: &Profile) -> f64 {
    profile
        .active_rates()
        .iter()
        .map(|rates| match (rates.per_day, rates.per_pack, rates.price_per_pack) {
            (Some(per_day), Some(per_pack), Some(price)) if per_pack > 0.0 && per_day > 0.0 => {
                (per_day / per_pack) * price
            }
            _ => 0.0,
        })
        .sum::<f64>()
        .max(0.0)
}
