//! Profile copy in a shared directory for a companion display (widget).
//!
//! The companion reads the file on its own schedule and recomputes the
//! clock itself, so only the profile is mirrored.

use std::path::PathBuf;

use crate::error::Result;
use crate::profile::{Profile, PROFILE_STORAGE_KEY};

#[derive(Debug, Clone)]
pub struct SharedMirror {
    dir: PathBuf,
}

impl SharedMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{PROFILE_STORAGE_KEY}.json"))
    }

    /// Replace the mirrored profile. The write goes through a temp file so a
    /// reader never sees a partial document.
    pub fn write(&self, profile: &Profile) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(profile)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn read(&self) -> Result<Option<Profile>> {
        match std::fs::read(self.path()) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
