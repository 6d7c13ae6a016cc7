//! Trait definitions for external interactions
//!
//! These traits define the boundary between the evaluation core and the
//! storage/CRUD collaborator. Infrastructure implementations live in other
//! crates; the engine is generic over them.

use crate::event::DatedEvent;
use crate::progress::ProgressRecord;
use crate::user::UserId;
use chrono::NaiveDate;

/// Read access to a user's event logs and counts
///
/// The caller is a trusted internal collaborator: dates are valid calendar
/// dates and counts are non-negative, and the core does not re-validate.
pub trait EventSource {
    /// Error type for read operations
    type Error;

    /// Distinct dates with at least one habit completion, pooled across
    /// every habit of the user
    fn habit_completion_dates(&self, user: UserId) -> Result<Vec<NaiveDate>, Self::Error>;

    /// Number of currently-active habits
    fn count_active_habits(&self, user: UserId) -> Result<u32, Self::Error>;

    /// Number of habits ever created, active or not
    fn count_all_habits(&self, user: UserId) -> Result<u32, Self::Error>;

    /// Number of habit-completion rows across all habits
    ///
    /// Distinct from the pooled date set: several habits completed on the
    /// same day are one date but several rows.
    fn count_completions(&self, user: UserId) -> Result<u32, Self::Error>;

    /// Number of gratitude entries
    fn count_gratitude_entries(&self, user: UserId) -> Result<u32, Self::Error>;

    /// Scored mood events, optionally restricted to dates on or after
    /// `since`
    fn mood_events(
        &self,
        user: UserId,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DatedEvent>, Self::Error>;

    /// Number of mood log rows
    fn count_mood_logs(&self, user: UserId) -> Result<u32, Self::Error>;
}

/// Read-modify-write access to per-user achievement progress
///
/// Implemented by the infrastructure layer (laurel-store)
pub trait ProgressStore {
    /// Error type for store operations
    type Error;

    /// Fetch the user's progress records for the given achievement keys,
    /// creating missing ones at zero progress
    ///
    /// Must be idempotent: repeated calls never produce duplicate records.
    fn get_or_create_progress(
        &mut self,
        user: UserId,
        achievement_keys: &[&str],
    ) -> Result<Vec<ProgressRecord>, Self::Error>;

    /// Persist a batch of updated records as one all-or-nothing write
    fn persist_progress(&mut self, records: &[ProgressRecord]) -> Result<(), Self::Error>;
}
