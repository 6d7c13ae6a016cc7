//! Core engine implementation: domain-scoped evaluation passes

use crate::EngineError;
use chrono::{Local, NaiveDate, Utc};
use laurel_domain::traits::{EventSource, ProgressStore};
use laurel_domain::{
    compute_streaks, evaluate_achievement, AchievementCatalog, ProgressRecord, Trigger, UserId,
    UserSnapshot,
};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Today in the server's local calendar, the anchor for streaks and windows
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The achievement evaluation engine
///
/// Holds the immutable catalog injected at startup and runs evaluation
/// passes against any store implementing the [`EventSource`] and
/// [`ProgressStore`] seams. Reseeding the catalog means constructing a new
/// engine.
///
/// # Examples
///
/// ```no_run
/// use laurel_domain::traits::{EventSource, ProgressStore};
/// use laurel_domain::{AchievementCatalog, UserId};
/// use laurel_engine::{AchievementEngine, EngineError};
///
/// # fn after_completion_logged<S>(store: &mut S, user: UserId) -> Result<(), EngineError>
/// # where
/// #     S: EventSource + ProgressStore,
/// #     <S as EventSource>::Error: std::fmt::Display,
/// #     <S as ProgressStore>::Error: std::fmt::Display,
/// # {
/// let engine = AchievementEngine::new(AchievementCatalog::default_seed());
/// engine.initialize(store, user)?;
///
/// // ... the collaborator logs a habit completion, then:
/// let updated = engine.evaluate_streak_domain(store, user)?;
/// println!("{} achievements re-evaluated", updated.len());
/// # Ok(())
/// # }
/// ```
pub struct AchievementEngine {
    catalog: AchievementCatalog,
}

impl AchievementEngine {
    /// Create an engine over the given catalog
    pub fn new(catalog: AchievementCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine evaluates against
    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Ensure one progress record per catalog achievement exists for the
    /// user, at zero progress, unearned
    ///
    /// Idempotent: calling it again creates nothing and fails nothing.
    /// Invoked once at account creation and again after a catalog reseed.
    pub fn initialize<S>(&self, store: &mut S, user: UserId) -> Result<(), EngineError>
    where
        S: ProgressStore,
        S::Error: Display,
    {
        let keys = self.catalog.keys();
        store
            .get_or_create_progress(user, &keys)
            .map_err(|e| EngineError::Store(e.to_string()))?;
        tracing::debug!(user = %user, achievements = keys.len(), "progress records initialized");
        Ok(())
    }

    /// Re-evaluate achievements counting habits (created/updated/deleted)
    pub fn evaluate_habit_domain<S>(
        &self,
        store: &mut S,
        user: UserId,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: EventSource + ProgressStore,
        <S as EventSource>::Error: Display,
        <S as ProgressStore>::Error: Display,
    {
        let snapshot = self.snapshot(store, user)?;
        self.evaluate_trigger(store, user, Trigger::Habit, &snapshot)
    }

    /// Re-evaluate achievements counting completions, streaks, and tracked
    /// days after a completion is logged or removed
    pub fn evaluate_streak_domain<S>(
        &self,
        store: &mut S,
        user: UserId,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: EventSource + ProgressStore,
        <S as EventSource>::Error: Display,
        <S as ProgressStore>::Error: Display,
    {
        let snapshot = self.snapshot(store, user)?;
        self.evaluate_trigger(store, user, Trigger::Streak, &snapshot)
    }

    /// Re-evaluate achievements counting mood logs and tracked days after a
    /// mood entry is logged, updated, or deleted
    pub fn evaluate_mood_domain<S>(
        &self,
        store: &mut S,
        user: UserId,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: EventSource + ProgressStore,
        <S as EventSource>::Error: Display,
        <S as ProgressStore>::Error: Display,
    {
        let snapshot = self.snapshot(store, user)?;
        self.evaluate_trigger(store, user, Trigger::Mood, &snapshot)
    }

    /// Re-evaluate achievements counting gratitude entries
    pub fn evaluate_gratitude_domain<S>(
        &self,
        store: &mut S,
        user: UserId,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: EventSource + ProgressStore,
        <S as EventSource>::Error: Display,
        <S as ProgressStore>::Error: Display,
    {
        let snapshot = self.snapshot(store, user)?;
        self.evaluate_trigger(store, user, Trigger::Gratitude, &snapshot)
    }

    /// Run every domain pass; used once at account creation
    ///
    /// Returns the final record per achievement (an achievement touched by
    /// several passes appears once, with its last evaluation).
    pub fn evaluate_all<S>(
        &self,
        store: &mut S,
        user: UserId,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: EventSource + ProgressStore,
        <S as EventSource>::Error: Display,
        <S as ProgressStore>::Error: Display,
    {
        let mut merged = std::collections::BTreeMap::new();
        for records in [
            self.evaluate_gratitude_domain(store, user)?,
            self.evaluate_habit_domain(store, user)?,
            self.evaluate_streak_domain(store, user)?,
            self.evaluate_mood_domain(store, user)?,
        ] {
            for record in records {
                merged.insert(record.achievement_key.clone(), record);
            }
        }
        Ok(merged.into_values().collect())
    }

    /// One read-modify-write pass over the achievements responding to a
    /// trigger
    fn evaluate_trigger<S>(
        &self,
        store: &mut S,
        user: UserId,
        trigger: Trigger,
        snapshot: &UserSnapshot,
    ) -> Result<Vec<ProgressRecord>, EngineError>
    where
        S: ProgressStore,
        <S as ProgressStore>::Error: Display,
    {
        let keys: Vec<&str> = self
            .catalog
            .responding_to(trigger)
            .map(|a| a.key.as_str())
            .collect();
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = store
            .get_or_create_progress(user, &keys)
            .map_err(|e| EngineError::Store(e.to_string()))?;

        let now = Utc::now();
        for record in &mut records {
            // A record for a key no longer in the catalog is skipped, not a
            // failure; one stale row must not block the rest of the batch.
            let Some(achievement) = self.catalog.get(&record.achievement_key) else {
                tracing::debug!(
                    user = %user,
                    achievement = %record.achievement_key,
                    "no catalog entry for progress record, skipping"
                );
                continue;
            };

            let evaluation = evaluate_achievement(achievement, snapshot);
            if record.apply(&evaluation, now) {
                tracing::info!(
                    user = %user,
                    achievement = %record.achievement_key,
                    unit_value = evaluation.raw_value,
                    "achievement earned"
                );
            }
        }

        store
            .persist_progress(&records)
            .map_err(|e| EngineError::Store(e.to_string()))?;
        Ok(records)
    }

    /// Read every count a pass may need into one complete snapshot
    ///
    /// An achievement responding to a trigger can carry requirements from
    /// other domains, and every requirement is evaluated against the same
    /// snapshot, so all counts are read on every pass. Each is one cheap
    /// aggregate query. Days tracked pools completion dates and mood dates,
    /// deduplicated.
    fn snapshot<S>(&self, store: &S, user: UserId) -> Result<UserSnapshot, EngineError>
    where
        S: EventSource,
        S::Error: Display,
    {
        let completion_dates = self.read(store.habit_completion_dates(user))?;
        let streaks = compute_streaks(&completion_dates, today());

        let mut days: BTreeSet<NaiveDate> = completion_dates.iter().copied().collect();
        for event in self.read(store.mood_events(user, None))? {
            days.insert(event.date);
        }

        Ok(UserSnapshot {
            active_habits: self.read(store.count_active_habits(user))?,
            total_habits: self.read(store.count_all_habits(user))?,
            current_streak: streaks.current,
            total_completions: self.read(store.count_completions(user))?,
            gratitude_entries: self.read(store.count_gratitude_entries(user))?,
            mood_logs: self.read(store.count_mood_logs(user))?,
            days_tracked: days.len() as u32,
        })
    }

    fn read<T, E: Display>(&self, result: Result<T, E>) -> Result<T, EngineError> {
        result.map_err(|e| EngineError::Source(e.to_string()))
    }
}
