mod config;
pub mod database;
pub mod migrations;
mod mirror;

pub use config::{Config, MirrorConfig, ProfileDefaults, TickConfig};
pub use database::Database;
pub use mirror::SharedMirror;

use std::path::PathBuf;

use crate::achievement::Achievement;
use crate::error::Result;
use crate::partition::Partition;
use crate::profile::{Profile, PROFILE_STORAGE_KEY};

/// Persisted achievement rows, partitioned by user.
///
/// `insert` and `update` only stage a write; nothing reaches storage until
/// `commit`, which applies every staged write in one transaction and returns
/// how many were written. Staged writes are dropped whether or not the
/// commit succeeds.
pub trait AchievementStore {
    /// Entries for `partition`, ascending by display order.
    fn fetch(&self, partition: &Partition) -> Result<Vec<Achievement>>;
    fn insert(&mut self, achievement: &Achievement);
    fn update(&mut self, achievement: &Achievement);
    fn commit(&mut self) -> Result<usize>;
}

/// Persisted profile, one per partition.
pub trait ProfileStore {
    fn load_profile(&self, partition: &Partition) -> Result<Option<Profile>>;
    fn save_profile(&mut self, partition: &Partition, profile: &Profile) -> Result<()>;
    fn clear_profile(&mut self, partition: &Partition) -> Result<()>;
}

/// Storage key of the profile for `partition`.
///
/// The guest profile lives under the bare key.
pub fn profile_key(partition: &Partition) -> String {
    match partition.user_id() {
        None => PROFILE_STORAGE_KEY.to_string(),
        Some(id) => format!("{PROFILE_STORAGE_KEY}/{id}"),
    }
}

/// Returns the data directory.
///
/// `NICOBOO_DATA_DIR` wins when set; otherwise `~/.config/nicoboo[-dev]/`
/// based on `NICOBOO_ENV` (set it to `dev` for the development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("NICOBOO_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("NICOBOO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("nicoboo-dev")
            } else {
                base_dir.join("nicoboo")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
