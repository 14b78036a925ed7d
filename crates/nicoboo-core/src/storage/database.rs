//! SQLite-based storage.
//!
//! Provides persistent storage for:
//! - Per-partition achievements (staged writes, committed in one transaction)
//! - Saving goals
//! - Key-value store (profiles are kept here as JSON)

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{data_dir, migrations, profile_key, AchievementStore, ProfileStore};
use crate::accrual::SavingGoal;
use crate::achievement::{Achievement, RequirementKind};
use crate::error::{DatabaseError, Result};
use crate::partition::Partition;
use crate::profile::Profile;

#[derive(Debug, Clone)]
enum StagedWrite {
    Insert(Achievement),
    Update(Achievement),
}

/// SQLite database backing every store trait.
pub struct Database {
    conn: Connection,
    staged: Vec<StagedWrite>,
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_achievement(row: &Row<'_>) -> rusqlite::Result<Achievement> {
    let kind_raw: String = row.get(5)?;
    let kind = kind_raw
        .parse::<RequirementKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    let unlocked_at = row
        .get::<_, Option<String>>(8)?
        .map(|raw| parse_timestamp(8, &raw))
        .transpose()?;
    Ok(Achievement {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        details: row.get(3)?,
        requirement: row.get(4)?,
        kind,
        image_name: row.get(6)?,
        is_unlocked: row.get(7)?,
        unlocked_at,
        order: row.get(9)?,
    })
}

fn row_to_goal(row: &Row<'_>) -> rusqlite::Result<SavingGoal> {
    let created_raw: String = row.get(5)?;
    Ok(SavingGoal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        target_amount: row.get(3)?,
        image_name: row.get(4)?,
        created_at: parse_timestamp(5, &created_raw)?,
    })
}

impl Database {
    /// Open the database at `<data_dir>/nicoboo.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("nicoboo.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn,
            staged: Vec::new(),
        })
    }

    /// Writes staged since the last commit.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Saving goals ─────────────────────────────────────────────────

    pub fn add_goal(&self, goal: &SavingGoal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO saving_goals (id, user_id, name, target_amount, image_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                goal.id,
                goal.user_id,
                goal.name,
                goal.target_amount,
                goal.image_name,
                goal.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Goals for `partition`, newest first.
    pub fn list_goals(&self, partition: &Partition) -> Result<Vec<SavingGoal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, target_amount, image_name, created_at
             FROM saving_goals
             WHERE user_id IS ?1
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![partition.user_id()], row_to_goal)?;
        let goals = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(goals)
    }

    /// Remove a goal owned by `partition`. Returns `false` when nothing matched.
    pub fn remove_goal(&self, partition: &Partition, id: &str) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM saving_goals WHERE id = ?1 AND user_id IS ?2",
            params![id, partition.user_id()],
        )?;
        Ok(removed > 0)
    }
}

impl AchievementStore for Database {
    fn fetch(&self, partition: &Partition) -> Result<Vec<Achievement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, details, requirement, requirement_type,
                    image_name, is_unlocked, unlocked_at, sort_order
             FROM achievements
             WHERE user_id IS ?1
             ORDER BY sort_order ASC",
        )?;
        let rows = stmt.query_map(params![partition.user_id()], row_to_achievement)?;
        let achievements = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(achievements)
    }

    fn insert(&mut self, achievement: &Achievement) {
        self.staged.push(StagedWrite::Insert(achievement.clone()));
    }

    fn update(&mut self, achievement: &Achievement) {
        self.staged.push(StagedWrite::Update(achievement.clone()));
    }

    fn commit(&mut self) -> Result<usize> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        for write in &staged {
            match write {
                StagedWrite::Insert(a) => {
                    tx.execute(
                        "INSERT OR REPLACE INTO achievements
                            (id, user_id, title, details, requirement, requirement_type,
                             image_name, is_unlocked, unlocked_at, sort_order)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                        params![
                            a.id,
                            a.user_id,
                            a.title,
                            a.details,
                            a.requirement,
                            a.kind.as_str(),
                            a.image_name,
                            a.is_unlocked,
                            a.unlocked_at.map(|t| t.to_rfc3339()),
                            a.order,
                        ],
                    )?;
                }
                StagedWrite::Update(a) => {
                    // Unlock state only moves forward, even at the storage layer.
                    tx.execute(
                        "UPDATE achievements
                         SET is_unlocked = MAX(is_unlocked, ?2),
                             unlocked_at = COALESCE(unlocked_at, ?3)
                         WHERE id = ?1",
                        params![a.id, a.is_unlocked, a.unlocked_at.map(|t| t.to_rfc3339())],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(staged.len())
    }
}

impl ProfileStore for Database {
    fn load_profile(&self, partition: &Partition) -> Result<Option<Profile>> {
        match self.kv_get(&profile_key(partition))? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_profile(&mut self, partition: &Partition, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.kv_set(&profile_key(partition), &json)
    }

    fn clear_profile(&mut self, partition: &Partition) -> Result<()> {
        self.kv_delete(&profile_key(partition))
    }
}
