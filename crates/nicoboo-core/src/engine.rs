//! Progress engine: the owned application state behind the 1 Hz tick.
//!
//! The engine holds the active partition, its profile, the achievement book
//! and the latest accrual snapshot. It has no internal thread; the caller
//! drives it by calling `tick()` once a second.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ProgressEngine::open(Database::open()?, Partition::Guest, None)?;
//! // In a loop:
//! for event in engine.tick(Utc::now()) { /* render */ }
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::accrual::{self, AccrualSnapshot};
use crate::achievement::{Achievement, AchievementBook, Countdown};
use crate::error::Result;
use crate::events::Event;
use crate::partition::Partition;
use crate::profile::Profile;
use crate::storage::{AchievementStore, ProfileStore, SharedMirror};

pub struct ProgressEngine<S> {
    store: S,
    mirror: Option<SharedMirror>,
    /// Partition whose profile the mirror file currently holds.
    mirrored: Option<Partition>,
    partition: Partition,
    profile: Option<Profile>,
    book: AchievementBook,
    snapshot: Option<AccrualSnapshot>,
}

impl<S> ProgressEngine<S>
where
    S: AchievementStore + ProfileStore,
{
    /// Load the partition's profile and achievements, seeding the catalog
    /// when the partition has none yet. The mirror is brought in line with
    /// the partition's profile.
    ///
    /// # Errors
    /// Returns an error if the stored profile or achievements cannot be read.
    pub fn open(mut store: S, partition: Partition, mirror: Option<SharedMirror>) -> Result<Self> {
        let profile = store.load_profile(&partition)?;
        let book = AchievementBook::load(&mut store, partition.clone())?;
        debug!(%partition, has_profile = profile.is_some(), "progress engine opened");
        let mut engine = Self {
            store,
            mirror,
            mirrored: None,
            partition,
            profile,
            book,
            snapshot: None,
        };
        engine.sync_mirror();
        Ok(engine)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Snapshot from the latest tick, `None` before the first tick or
    /// while no profile exists.
    pub fn snapshot(&self) -> Option<&AccrualSnapshot> {
        self.snapshot.as_ref()
    }

    /// Achievements of the active partition, ascending by display order.
    pub fn achievements(&self) -> &[Achievement] {
        self.book.entries()
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.book.get(id)
    }

    pub fn achievement_by_order(&self, order: u32) -> Option<&Achievement> {
        self.book.find_by_order(order)
    }

    pub fn unlocked_count(&self) -> usize {
        self.book.unlocked_count()
    }

    pub fn total_count(&self) -> usize {
        self.book.total_count()
    }

    /// Achievement writes not yet committed.
    pub fn pending_writes(&self) -> usize {
        self.book.pending_writes()
    }

    /// Countdown for a locked achievement. `None` when the id is unknown,
    /// the badge is already unlocked, or there is no snapshot yet.
    pub fn countdown(&self, id: &str) -> Option<Countdown> {
        let achievement = self.book.get(id).filter(|a| !a.is_unlocked)?;
        let snapshot = self.snapshot.as_ref()?;
        Some(Countdown::for_achievement(achievement, snapshot))
    }

    /// Progress event for the latest snapshot.
    pub fn progress_event(&self) -> Option<Event> {
        let snapshot = self.snapshot.as_ref()?;
        let currency = self
            .profile
            .as_ref()
            .map(|p| p.currency_code.as_str())
            .unwrap_or_default();
        Some(Event::progress(
            snapshot,
            currency,
            self.unlocked_count(),
            self.total_count(),
        ))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Compute, evaluate, persist.
    ///
    /// Returns the progress snapshot followed by one event per newly
    /// unlocked achievement. A failed commit is logged and reported as
    /// `PersistFailed`; the unlocks stay in memory and are retried on the
    /// next tick. Without a profile nothing is computed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let Some(profile) = self.profile.as_ref() else {
            self.snapshot = None;
            return Vec::new();
        };
        let snapshot = accrual::compute(profile, now);
        let unlocked = self.book.evaluate(&snapshot, now);
        self.snapshot = Some(snapshot);

        let mut events = Vec::with_capacity(unlocked.len() + 1);
        events.extend(self.progress_event());
        for achievement in &unlocked {
            info!(title = %achievement.title, partition = %self.partition, "achievement unlocked");
            events.push(Event::unlocked(achievement));
        }
        events.extend(self.persist(now));
        events
    }

    /// Replace the profile of the active partition and recompute.
    ///
    /// # Errors
    /// Returns an error if the profile is invalid or cannot be saved. The
    /// shared mirror is best effort and never fails the update.
    pub fn update_profile(&mut self, profile: Profile, now: DateTime<Utc>) -> Result<Vec<Event>> {
        profile.validate()?;
        self.store.save_profile(&self.partition, &profile)?;
        let mut events = vec![Event::ProfileUpdated {
            stop_date: profile.stop_date,
            at: now,
        }];
        self.profile = Some(profile);
        self.sync_mirror();
        events.extend(self.tick(now));
        Ok(events)
    }

    /// Remove the profile of the active partition. Unlocked achievements
    /// are kept. The mirror is only cleared when it holds this partition's
    /// profile.
    pub fn clear_profile(&mut self, now: DateTime<Utc>) -> Result<Event> {
        self.store.clear_profile(&self.partition)?;
        self.profile = None;
        self.snapshot = None;
        if self.mirrored.as_ref() == Some(&self.partition) {
            self.sync_mirror();
        }
        Ok(Event::ProfileCleared { at: now })
    }

    /// Make `partition` active: load (and seed) the new partition's
    /// achievements before returning, then replace the in-memory state.
    ///
    /// Pending writes of the outgoing partition get one last commit
    /// attempt; if that fails they are lost from memory but the stored
    /// rows are never re-locked.
    ///
    /// # Errors
    /// Returns an error if the new partition cannot be read. The outgoing
    /// partition then stays active with its state intact.
    pub fn switch_partition(
        &mut self,
        partition: Partition,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        if self.book.is_dirty() {
            if let Err(e) = self.book.flush(&mut self.store) {
                warn!(partition = %self.partition, error = %e, "failed to flush achievements before switch");
            }
        }

        let profile = self.store.load_profile(&partition)?;
        let book = AchievementBook::load(&mut self.store, partition.clone())?;
        if self.book.is_dirty() {
            warn!(
                partition = %self.partition,
                pending = self.book.pending_writes(),
                "dropping unsaved achievement writes on switch"
            );
        }
        info!(from = %self.partition, to = %partition, "switched partition");

        self.partition = partition;
        self.profile = profile;
        self.book = book;
        self.snapshot = None;
        self.sync_mirror();

        let mut events = vec![Event::PartitionSwitched {
            user_id: self.partition.user_id().map(str::to_string),
            achievements: self.book.total_count(),
            at: now,
        }];
        events.extend(self.tick(now));
        Ok(events)
    }

    /// Write the active profile to the mirror, or remove the mirror file
    /// when the active partition has no profile. Best effort.
    fn sync_mirror(&mut self) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        let result = match &self.profile {
            Some(profile) => mirror.write(profile).map(|()| Some(self.partition.clone())),
            None => mirror.clear().map(|()| None),
        };
        match result {
            Ok(mirrored) => self.mirrored = mirrored,
            Err(e) => {
                warn!(path = %mirror.path().display(), error = %e, "failed to sync mirrored profile");
            }
        }
    }

    fn persist(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.book.is_dirty() {
            return None;
        }
        match self.book.flush(&mut self.store) {
            Ok(written) => {
                debug!(written, "achievement writes committed");
                None
            }
            Err(e) => {
                let pending = self.book.pending_writes();
                warn!(pending, error = %e, "failed to persist achievements; will retry");
                Some(Event::PersistFailed {
                    pending,
                    message: e.to_string(),
                    at: now,
                })
            }
        }
    }
}
