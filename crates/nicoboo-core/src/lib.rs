//! # Nicoboo Core Library
//!
//! This library provides the progress engine behind the Nicoboo quit-smoking
//! tracker. All operations are available through the standalone CLI binary;
//! any GUI is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Accrual**: pure functions turning a quit date and consumption rates into
//!   elapsed time, units avoided and money saved
//! - **Achievements**: an ordered badge catalog with a one-way
//!   locked/unlocked state machine, seeded per user partition
//! - **Engine**: the owned application state that the caller ticks once a second
//! - **Storage**: SQLite persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ProgressEngine`]: tick driver owning profile, partition and achievements
//! - [`AchievementBook`]: in-memory achievement set with batched persistence
//! - [`Database`]: achievement, goal and profile persistence
//! - [`Config`]: application configuration management

pub mod accrual;
pub mod achievement;
pub mod engine;
pub mod error;
pub mod events;
pub mod partition;
pub mod profile;
pub mod storage;

pub use accrual::{compute, AccrualSnapshot, DurationBreakdown, SavingGoal};
pub use achievement::{Achievement, AchievementBook, Countdown, RequirementKind};
pub use engine::ProgressEngine;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use partition::Partition;
pub use profile::{Profile, SmokingType};
pub use storage::{AchievementStore, Config, Database, ProfileStore, SharedMirror};
