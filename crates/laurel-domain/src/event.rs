//! Dated events - the raw material streaks and statistics are computed from

use chrono::NaiveDate;

/// One dated occurrence from a user's logs
///
/// A habit completion is an unscored event on its completion date; a mood
/// log carries its 1-10 score. Events are owned by the storage layer and
/// passed into the core as immutable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedEvent {
    /// Calendar date the event was logged for
    pub date: NaiveDate,

    /// Scalar value attached to the event, if any (e.g. a mood score)
    pub score: Option<i32>,
}

impl DatedEvent {
    /// Create an unscored event (a habit completion)
    pub fn on(date: NaiveDate) -> Self {
        Self { date, score: None }
    }

    /// Create a scored event (a mood log)
    pub fn scored(date: NaiveDate, score: i32) -> Self {
        Self {
            date,
            score: Some(score),
        }
    }
}
