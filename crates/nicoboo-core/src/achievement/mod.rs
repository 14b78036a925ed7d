//! Threshold badges and their unlock state machine.
//!
//! ```text
//! locked --(metric >= requirement)--> unlocked
//! ```
//!
//! `unlocked` is terminal. The unlock timestamp is written once, at the
//! evaluation that first saw the threshold crossed.

mod book;
mod catalog;
mod countdown;
mod kind;
mod model;

pub use book::{missing_from_catalog, AchievementBook};
pub use catalog::{CatalogEntry, CatalogKey, DEFAULT_CATALOG};
pub use countdown::{Countdown, TimeEstimate};
pub use kind::{Metric, RequirementKind};
pub use model::Achievement;
