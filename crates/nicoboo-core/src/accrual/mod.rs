mod calculator;
mod goals;

pub use calculator::{
    compute, elapsed_ms, money_saved, units_avoided, AccrualSnapshot, DurationBreakdown,
    SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE,
};
pub use goals::{daily_savings, find_preset, GoalPreset, GoalProgress, SavingGoal, PRESET_GOALS};
