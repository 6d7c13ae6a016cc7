//! Per-user achievement progress with a one-way earn transition

use crate::evaluator::Evaluation;
use crate::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress of one user toward one achievement
///
/// The only mutable entity in the core. Exactly one record exists per
/// (user, achievement key) pair; records are created at user initialization
/// or lazily on first evaluation, and deleted only alongside the user.
///
/// `earned` is monotonic: once true it is never reset by the engine.
/// `progress` and `unit_value` are recomputed from scratch on every
/// evaluation and can decrease (e.g. after a habit deletion); only the
/// earn transition itself is sticky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Owner of this record
    pub user: UserId,

    /// Key of the achievement this record tracks
    pub achievement_key: String,

    /// Progress percentage, always in [0, 100]
    pub progress: u8,

    /// Last raw count computed, independent of the 0-100 scaling
    pub unit_value: u32,

    /// Whether the achievement has been earned
    pub earned: bool,

    /// When the earn transition fired; set exactly once
    pub earned_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A fresh record at zero progress, unearned
    pub fn new(user: UserId, achievement_key: impl Into<String>) -> Self {
        Self {
            user,
            achievement_key: achievement_key.into(),
            progress: 0,
            unit_value: 0,
            earned: false,
            earned_at: None,
        }
    }

    /// Apply a freshly computed evaluation to this record
    ///
    /// Progress and unit value are overwritten unconditionally. The earn
    /// transition fires the first time the evaluation reaches 100 and sets
    /// progress to exactly 100 in the same write; it never reverses.
    ///
    /// Returns true if this call earned the achievement.
    pub fn apply(&mut self, evaluation: &Evaluation, now: DateTime<Utc>) -> bool {
        self.progress = evaluation.progress_pct;
        self.unit_value = evaluation.raw_value;

        if evaluation.progress_pct >= 100 && !self.earned {
            self.progress = 100;
            self.earned = true;
            self.earned_at = Some(now);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_new_record_is_unearned_zero() {
        let record = ProgressRecord::new(UserId::new(1), "streak_master");
        assert_eq!(record.progress, 0);
        assert_eq!(record.unit_value, 0);
        assert!(!record.earned);
        assert!(record.earned_at.is_none());
    }

    #[test]
    fn test_earn_transition_fires_once() {
        let mut record = ProgressRecord::new(UserId::new(1), "streak_master");

        let earned = record.apply(
            &Evaluation {
                raw_value: 7,
                progress_pct: 100,
            },
            now(),
        );
        assert!(earned);
        assert!(record.earned);
        assert_eq!(record.progress, 100);
        assert_eq!(record.earned_at, Some(now()));

        // A second pass at 100 is not a new earn
        let earned_again = record.apply(
            &Evaluation {
                raw_value: 8,
                progress_pct: 100,
            },
            "2025-06-02T12:00:00Z".parse().unwrap(),
        );
        assert!(!earned_again);
        assert_eq!(record.earned_at, Some(now()), "earned_at is set exactly once");
    }

    #[test]
    fn test_earned_survives_a_smaller_recount() {
        let mut record = ProgressRecord::new(UserId::new(1), "streak_master");
        record.apply(
            &Evaluation {
                raw_value: 7,
                progress_pct: 100,
            },
            now(),
        );

        // The streak later drops to zero; displayed progress follows the
        // recount but the earn stays.
        record.apply(
            &Evaluation {
                raw_value: 0,
                progress_pct: 0,
            },
            now(),
        );
        assert!(record.earned);
        assert_eq!(record.progress, 0);
        assert_eq!(record.unit_value, 0);
    }

    #[test]
    fn test_progress_tracks_latest_count() {
        let mut record = ProgressRecord::new(UserId::new(3), "gratitude_pro");
        record.apply(
            &Evaluation {
                raw_value: 4,
                progress_pct: 40,
            },
            now(),
        );
        assert_eq!(record.progress, 40);
        assert_eq!(record.unit_value, 4);
        assert!(!record.earned);
    }
}
