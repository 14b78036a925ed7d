use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CatalogKey;
use super::kind::RequirementKind;
use crate::accrual::AccrualSnapshot;
use crate::partition::Partition;

/// One badge owned by one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    /// `None` for the guest partition.
    pub user_id: Option<String>,
    pub title: String,
    pub details: String,
    pub requirement: f64,
    #[serde(rename = "requirement_type")]
    pub kind: RequirementKind,
    pub image_name: String,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub order: u32,
}

impl Achievement {
    pub fn partition(&self) -> Partition {
        Partition::from_user_id(self.user_id.as_deref())
    }

    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(&self.title, self.requirement, self.kind)
    }

    /// Current value of the metric this badge is measured by.
    pub fn progress(&self, snapshot: &AccrualSnapshot) -> f64 {
        self.kind.metric().read(snapshot)
    }

    pub fn is_met_by(&self, snapshot: &AccrualSnapshot) -> bool {
        self.progress(snapshot) >= self.requirement
    }

    /// Flip to unlocked. Returns `false` (and changes nothing) when the
    /// badge was already unlocked.
    pub(crate) fn unlock(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_unlocked = true;
        self.unlocked_at = Some(at);
        true
    }
}
