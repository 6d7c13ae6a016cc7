//! Requirement evaluators
//!
//! One pure function per requirement kind, each mapping a snapshot of the
//! user's state to a raw count and a clamped 0-100 percentage. The kinds
//! are a closed enum, so a single match covers every evaluator and a new
//! kind cannot be added without one.

use crate::achievement::{Achievement, Requirement, RequirementKind};

/// A snapshot of the counts evaluators read
///
/// Assembled by the engine from the event source before a domain pass.
/// Every field must hold the user's real current count: an achievement can
/// mix requirement kinds from several domains, and each requirement is
/// evaluated against this same snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSnapshot {
    /// Currently-active habits
    pub active_habits: u32,

    /// Habits ever created, active or not
    pub total_habits: u32,

    /// Current completion streak, pooled across habits
    pub current_streak: u32,

    /// Habit-completion rows across all habits
    pub total_completions: u32,

    /// Gratitude entries
    pub gratitude_entries: u32,

    /// Mood log rows
    pub mood_logs: u32,

    /// Distinct days with at least one tracked event
    pub days_tracked: u32,
}

/// Result of evaluating one requirement against a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// The absolute count backing the percentage ("7" days)
    pub raw_value: u32,

    /// min(100, round(100 * raw / target)), always in [0, 100]
    ///
    /// Reaches 100 exactly when `raw_value >= target`: below the target the
    /// percentage is capped at 99 so nearest-rounding cannot fire an early
    /// earn transition.
    pub progress_pct: u8,
}

/// Evaluate a single requirement against a snapshot
pub fn evaluate_requirement(requirement: &Requirement, snapshot: &UserSnapshot) -> Evaluation {
    let raw_value = match requirement.kind {
        RequirementKind::HabitCount => snapshot.active_habits,
        RequirementKind::TotalHabits => snapshot.total_habits,
        RequirementKind::StreakDays => snapshot.current_streak,
        RequirementKind::GratitudeEntries => snapshot.gratitude_entries,
        RequirementKind::MoodLogs => snapshot.mood_logs,
        RequirementKind::TotalCompletions => snapshot.total_completions,
        RequirementKind::DaysTracked => snapshot.days_tracked,
    };

    Evaluation {
        raw_value,
        progress_pct: scale_progress(raw_value, requirement.target),
    }
}

/// Evaluate an achievement: all requirements, limited by the weakest
///
/// The achievement's percentage is the minimum across its requirements and
/// its raw value comes from that limiting requirement, so the earn fires
/// only when every requirement is satisfied. Single-requirement
/// achievements (the whole built-in seed) reduce to that requirement's
/// evaluation.
pub fn evaluate_achievement(achievement: &Achievement, snapshot: &UserSnapshot) -> Evaluation {
    achievement
        .requirements
        .iter()
        .map(|r| evaluate_requirement(r, snapshot))
        .min_by_key(|e| e.progress_pct)
        .unwrap_or(Evaluation {
            raw_value: 0,
            progress_pct: 0,
        })
}

/// min(100, round(100 * raw / target)); a zero target is already satisfied
///
/// 100 means earned, so below the target the result is capped at 99 even
/// when nearest-rounding would land on 100 (e.g. 199/200).
fn scale_progress(raw_value: u32, target: u32) -> u8 {
    if target == 0 || raw_value >= target {
        return 100;
    }
    let pct = (f64::from(raw_value) * 100.0 / f64::from(target)).round();
    pct.min(99.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            active_habits: 3,
            total_habits: 5,
            current_streak: 7,
            total_completions: 40,
            gratitude_entries: 4,
            mood_logs: 20,
            days_tracked: 12,
        }
    }

    #[test]
    fn test_each_kind_reads_its_count() {
        let s = snapshot();
        let cases = [
            (RequirementKind::HabitCount, 3),
            (RequirementKind::TotalHabits, 5),
            (RequirementKind::StreakDays, 7),
            (RequirementKind::GratitudeEntries, 4),
            (RequirementKind::MoodLogs, 20),
            (RequirementKind::TotalCompletions, 40),
            (RequirementKind::DaysTracked, 12),
        ];
        for (kind, expected) in cases {
            let req = Requirement::new(kind, 100, "units");
            assert_eq!(evaluate_requirement(&req, &s).raw_value, expected, "{}", kind);
        }
    }

    #[test]
    fn test_progress_scaling() {
        let req = Requirement::new(RequirementKind::GratitudeEntries, 10, "entries");
        let eval = evaluate_requirement(&req, &snapshot());
        assert_eq!(eval.raw_value, 4);
        assert_eq!(eval.progress_pct, 40);
    }

    #[test]
    fn test_progress_clamped_at_100() {
        let req = Requirement::new(RequirementKind::TotalCompletions, 25, "completions");
        let eval = evaluate_requirement(&req, &snapshot());
        assert_eq!(eval.raw_value, 40);
        assert_eq!(eval.progress_pct, 100);
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        // 1/3 of the way: 33.33.. -> 33; 2/3: 66.67 -> 67
        let s = UserSnapshot {
            mood_logs: 1,
            ..Default::default()
        };
        let req = Requirement::new(RequirementKind::MoodLogs, 3, "logs");
        assert_eq!(evaluate_requirement(&req, &s).progress_pct, 33);

        let s = UserSnapshot {
            mood_logs: 2,
            ..Default::default()
        };
        assert_eq!(evaluate_requirement(&req, &s).progress_pct, 67);
    }

    #[test]
    fn test_just_below_target_caps_at_99() {
        // 199/200 rounds to 100 but the target is not met
        let s = UserSnapshot {
            total_completions: 199,
            ..Default::default()
        };
        let req = Requirement::new(RequirementKind::TotalCompletions, 200, "completions");
        assert_eq!(evaluate_requirement(&req, &s).progress_pct, 99);
    }

    #[test]
    fn test_achievement_limited_by_weakest_requirement() {
        let achievement = Achievement {
            key: "well_rounded".to_string(),
            title: "Well Rounded".to_string(),
            description: String::new(),
            icon: String::new(),
            points: 0,
            requirements: vec![
                Requirement::new(RequirementKind::MoodLogs, 20, "logs"), // satisfied
                Requirement::new(RequirementKind::GratitudeEntries, 10, "entries"), // 40%
            ],
        };
        let eval = evaluate_achievement(&achievement, &snapshot());
        assert_eq!(eval.progress_pct, 40);
        assert_eq!(eval.raw_value, 4, "raw value follows the limiting requirement");
    }

    #[test]
    fn test_zero_snapshot_is_zero_progress() {
        let req = Requirement::new(RequirementKind::StreakDays, 7, "days");
        let eval = evaluate_requirement(&req, &UserSnapshot::default());
        assert_eq!(eval.raw_value, 0);
        assert_eq!(eval.progress_pct, 0);
    }
}
