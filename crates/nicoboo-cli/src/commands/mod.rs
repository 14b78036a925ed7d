pub mod achievements;
pub mod config;
pub mod goals;
pub mod profile;
pub mod progress;
