//! In-memory achievement set for one partition.
//!
//! The book is the only writer of unlock state. It remembers which entries
//! still need to reach storage and hands them to the store in one commit;
//! a failed commit leaves them pending for the next flush.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::catalog::DEFAULT_CATALOG;
use super::model::Achievement;
use crate::accrual::AccrualSnapshot;
use crate::error::Result;
use crate::partition::Partition;
use crate::storage::AchievementStore;

#[derive(Debug, Clone, Default)]
pub struct AchievementBook {
    partition: Partition,
    entries: Vec<Achievement>,
    /// Stored entries whose unlock state changed since the last commit.
    dirty: BTreeSet<String>,
    /// Entries that exist only in memory so far.
    unsaved: BTreeSet<String>,
}

/// Catalog entries with no stored counterpart, instantiated for `partition`.
pub fn missing_from_catalog(existing: &[Achievement], partition: &Partition) -> Vec<Achievement> {
    let present: HashSet<_> = existing.iter().map(Achievement::key).collect();
    DEFAULT_CATALOG
        .iter()
        .filter(|entry| !present.contains(&entry.key()))
        .map(|entry| entry.instantiate(partition))
        .collect()
}

impl AchievementBook {
    pub fn empty(partition: Partition) -> Self {
        Self {
            partition,
            ..Self::default()
        }
    }

    /// Wrap already-stored entries. They are assumed to be persisted.
    pub fn from_entries(partition: Partition, mut entries: Vec<Achievement>) -> Self {
        entries.sort_by_key(|a| a.order);
        Self {
            partition,
            entries,
            dirty: BTreeSet::new(),
            unsaved: BTreeSet::new(),
        }
    }

    /// Fetch the partition's entries and add any catalog badges it lacks.
    ///
    /// Seeding never touches existing unlock state. A failed seed commit is
    /// logged; the new entries stay pending and are written on a later flush.
    pub fn load<S>(store: &mut S, partition: Partition) -> Result<Self>
    where
        S: AchievementStore + ?Sized,
    {
        let stored = store.fetch(&partition)?;
        let was_empty = stored.is_empty();
        let mut book = Self::from_entries(partition, stored);
        let added = book.seed();
        if added > 0 {
            if was_empty {
                info!(partition = %book.partition, added, "seeded achievement catalog");
            } else {
                info!(partition = %book.partition, added, "added new catalog achievements");
            }
            if let Err(e) = book.flush(store) {
                warn!(partition = %book.partition, error = %e, "failed to persist seeded achievements");
            }
        }
        Ok(book)
    }

    /// Add missing catalog entries in memory. Returns how many were added.
    pub fn seed(&mut self) -> usize {
        let missing = missing_from_catalog(&self.entries, &self.partition);
        let added = missing.len();
        for achievement in missing {
            self.unsaved.insert(achievement.id.clone());
            self.entries.push(achievement);
        }
        if added > 0 {
            self.entries.sort_by_key(|a| a.order);
        }
        added
    }

    /// Unlock every locked entry whose metric meets its requirement.
    ///
    /// Returns the newly unlocked entries. Already-unlocked entries are never
    /// revisited, so calling this again with the same snapshot is a no-op.
    pub fn evaluate(&mut self, snapshot: &AccrualSnapshot, now: DateTime<Utc>) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for achievement in self.entries.iter_mut().filter(|a| !a.is_unlocked) {
            if achievement.is_met_by(snapshot) && achievement.unlock(now) {
                debug!(
                    id = %achievement.id,
                    title = %achievement.title,
                    requirement = achievement.requirement,
                    kind = %achievement.kind,
                    "achievement unlocked"
                );
                self.dirty.insert(achievement.id.clone());
                unlocked.push(achievement.clone());
            }
        }
        unlocked
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty() || !self.unsaved.is_empty()
    }

    /// Number of entries waiting to be written.
    pub fn pending_writes(&self) -> usize {
        self.unsaved.len() + self.dirty.difference(&self.unsaved).count()
    }

    /// Stage every pending entry and commit once.
    pub fn flush<S>(&mut self, store: &mut S) -> Result<usize>
    where
        S: AchievementStore + ?Sized,
    {
        if !self.is_dirty() {
            return Ok(0);
        }
        for achievement in &self.entries {
            if self.unsaved.contains(&achievement.id) {
                store.insert(achievement);
            } else if self.dirty.contains(&achievement.id) {
                store.update(achievement);
            }
        }
        let written = store.commit()?;
        self.unsaved.clear();
        self.dirty.clear();
        Ok(written)
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn find_by_order(&self, order: u32) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.order == order)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.is_unlocked).count()
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }
}
