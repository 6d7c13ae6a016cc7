//! Laurel Storage Layer
//!
//! Implements the [`EventSource`] and [`ProgressStore`] traits over SQLite,
//! plus the narrow mutator surface the CRUD collaborator uses to write the
//! rows the evaluation core reads (habits, completions, gratitude entries,
//! mood logs).
//!
//! # Examples
//!
//! ```no_run
//! use laurel_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for event logging and progress tracking
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, NaiveDate, Utc};
use laurel_domain::traits::{EventSource, ProgressStore};
use laurel_domain::{DatedEvent, ProgressRecord, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row not found or not owned by the user
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format in a stored row
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of the storage seams
///
/// Stores the user's event logs and achievement progress. Progress writes
/// are transactional, so a failed batch leaves every record at its prior
/// value.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use laurel_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("laurel.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert a calendar date to its storage form
    fn date_to_text(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a stored date
    fn text_to_date(text: &str) -> Result<NaiveDate, StoreError> {
        text.parse()
            .map_err(|_| StoreError::InvalidData(format!("Invalid stored date: {}", text)))
    }

    /// Parse a stored earn timestamp (RFC 3339)
    fn text_to_timestamp(text: &str) -> Result<DateTime<Utc>, StoreError> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| StoreError::InvalidData(format!("Invalid stored timestamp: {}", text)))
    }

    // ---- Collaborator mutator surface ----

    /// Create a habit for the user, returning its id
    pub fn create_habit(&mut self, user: UserId, name: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO habits (user_id, habit_name) VALUES (?1, ?2)",
            params![user.value(), name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Activate or deactivate a habit
    ///
    /// Returns false if the habit does not exist or belongs to another user.
    pub fn set_habit_active(
        &mut self,
        habit_id: i64,
        user: UserId,
        active: bool,
    ) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE habits SET is_active = ?1 WHERE habit_id = ?2 AND user_id = ?3",
            params![active, habit_id, user.value()],
        )?;
        Ok(changed > 0)
    }

    /// Log a completion of a habit on a date
    ///
    /// Logging the same (habit, date) twice is a no-op: a day is either
    /// completed or not.
    pub fn log_completion(
        &mut self,
        habit_id: i64,
        user: UserId,
        completed_on: NaiveDate,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO habit_completions (habit_id, user_id, completed_on)
             VALUES (?1, ?2, ?3)",
            params![habit_id, user.value(), Self::date_to_text(completed_on)],
        )?;
        Ok(())
    }

    /// Remove a completion; returns false if none existed
    pub fn remove_completion(
        &mut self,
        habit_id: i64,
        user: UserId,
        completed_on: NaiveDate,
    ) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM habit_completions
             WHERE habit_id = ?1 AND user_id = ?2 AND completed_on = ?3",
            params![habit_id, user.value(), Self::date_to_text(completed_on)],
        )?;
        Ok(changed > 0)
    }

    /// Add a gratitude entry, returning its id
    pub fn add_gratitude_entry(
        &mut self,
        user: UserId,
        body: &str,
        category: Option<&str>,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO gratitude_entries (user_id, body, category) VALUES (?1, ?2, ?3)",
            params![user.value(), body, category],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Log a mood score for a date, returning the row id
    ///
    /// One log per (user, date); a second log for the same day is a
    /// constraint error, matching the collaborator's update-not-insert rule.
    pub fn log_mood(
        &mut self,
        user: UserId,
        logged_on: NaiveDate,
        mood_score: i32,
        note: Option<&str>,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO mood_logs (user_id, mood_score, logged_on, note)
             VALUES (?1, ?2, ?3, ?4)",
            params![user.value(), mood_score, Self::date_to_text(logged_on), note],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete a mood log; returns false if none existed
    pub fn delete_mood(&mut self, mood_id: i64, user: UserId) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM mood_logs WHERE mood_id = ?1 AND user_id = ?2",
            params![mood_id, user.value()],
        )?;
        Ok(changed > 0)
    }

    /// Delete every row the user owns, progress records included
    ///
    /// Progress records are never deleted except here, alongside the owning
    /// user.
    pub fn remove_user(&mut self, user: UserId) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for table in [
            "habit_completions",
            "habits",
            "gratitude_entries",
            "mood_logs",
            "user_achievements",
        ] {
            tx.execute(
                &format!("DELETE FROM {} WHERE user_id = ?1", table),
                params![user.value()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn count(&self, sql: &str, user: UserId) -> Result<u32, StoreError> {
        let count: i64 = self.conn.query_row(sql, params![user.value()], |row| row.get(0))?;
        Ok(count as u32)
    }
}

impl EventSource for SqliteStore {
    type Error = StoreError;

    fn habit_completion_dates(&self, user: UserId) -> Result<Vec<NaiveDate>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT completed_on FROM habit_completions
             WHERE user_id = ?1 ORDER BY completed_on",
        )?;
        let dates = stmt
            .query_map(params![user.value()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        dates.iter().map(|text| Self::text_to_date(text)).collect()
    }

    fn count_active_habits(&self, user: UserId) -> Result<u32, Self::Error> {
        self.count(
            "SELECT COUNT(*) FROM habits WHERE user_id = ?1 AND is_active = 1",
            user,
        )
    }

    fn count_all_habits(&self, user: UserId) -> Result<u32, Self::Error> {
        self.count("SELECT COUNT(*) FROM habits WHERE user_id = ?1", user)
    }

    fn count_completions(&self, user: UserId) -> Result<u32, Self::Error> {
        self.count(
            "SELECT COUNT(*) FROM habit_completions WHERE user_id = ?1",
            user,
        )
    }

    fn count_gratitude_entries(&self, user: UserId) -> Result<u32, Self::Error> {
        self.count(
            "SELECT COUNT(*) FROM gratitude_entries WHERE user_id = ?1",
            user,
        )
    }

    fn mood_events(
        &self,
        user: UserId,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DatedEvent>, Self::Error> {
        let mut sql = String::from(
            "SELECT logged_on, mood_score FROM mood_logs WHERE user_id = ?",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user.value())];

        if let Some(floor) = since {
            sql.push_str(" AND logged_on >= ?");
            sql_params.push(Box::new(Self::date_to_text(floor)));
        }
        sql.push_str(" ORDER BY logged_on");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = sql_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(&param_refs[..], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter()
            .map(|(text, score)| Ok(DatedEvent::scored(Self::text_to_date(text)?, *score)))
            .collect()
    }

    fn count_mood_logs(&self, user: UserId) -> Result<u32, Self::Error> {
        self.count("SELECT COUNT(*) FROM mood_logs WHERE user_id = ?1", user)
    }
}

impl ProgressStore for SqliteStore {
    type Error = StoreError;

    fn get_or_create_progress(
        &mut self,
        user: UserId,
        achievement_keys: &[&str],
    ) -> Result<Vec<ProgressRecord>, Self::Error> {
        let tx = self.conn.transaction()?;
        let mut records = Vec::with_capacity(achievement_keys.len());

        for &key in achievement_keys {
            tx.execute(
                "INSERT OR IGNORE INTO user_achievements (user_id, achievement_key)
                 VALUES (?1, ?2)",
                params![user.value(), key],
            )?;

            let record = tx
                .query_row(
                    "SELECT progress, unit_value, is_earned, earned_at
                     FROM user_achievements
                     WHERE user_id = ?1 AND achievement_key = ?2",
                    params![user.value(), key],
                    |row| {
                        Ok((
                            row.get::<_, u8>(0)?,
                            row.get::<_, u32>(1)?,
                            row.get::<_, bool>(2)?,
                            row.get::<_, Option<String>>(3)?,
                        ))
                    },
                )
                .optional()?;

            let Some((progress, unit_value, earned, earned_at_text)) = record else {
                return Err(StoreError::NotFound(format!(
                    "Progress record for user {} achievement {}",
                    user, key
                )));
            };

            let earned_at = earned_at_text
                .as_deref()
                .map(Self::text_to_timestamp)
                .transpose()?;

            records.push(ProgressRecord {
                user,
                achievement_key: key.to_string(),
                progress,
                unit_value,
                earned,
                earned_at,
            });
        }

        tx.commit()?;
        Ok(records)
    }

    fn persist_progress(&mut self, records: &[ProgressRecord]) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;

        for record in records {
            tx.execute(
                "INSERT INTO user_achievements
                     (user_id, achievement_key, progress, unit_value, is_earned, earned_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(user_id, achievement_key) DO UPDATE SET
                     progress = excluded.progress,
                     unit_value = excluded.unit_value,
                     is_earned = excluded.is_earned,
                     earned_at = excluded.earned_at",
                params![
                    record.user.value(),
                    record.achievement_key,
                    record.progress,
                    record.unit_value,
                    record.earned,
                    record.earned_at.map(|t| t.to_rfc3339()),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
