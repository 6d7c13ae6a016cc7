//! Achievement definitions and their typed requirements

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of requirement kinds an achievement can depend on
///
/// Seed data names these in snake_case; parsing into a tagged enum makes an
/// unrecognized kind fail at catalog construction time instead of silently
/// never evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Number of currently-active habits
    HabitCount,

    /// Number of habits ever created, active or not
    TotalHabits,

    /// Current streak of consecutive days with at least one completion,
    /// pooled across every habit
    StreakDays,

    /// Number of gratitude entries
    GratitudeEntries,

    /// Number of mood log rows
    MoodLogs,

    /// Number of habit-completion rows across all habits
    TotalCompletions,

    /// Distinct calendar days with at least one tracked event
    /// (a habit completion or a mood log)
    DaysTracked,
}

impl RequirementKind {
    /// Parse a kind from its snake_case wire name
    pub fn from_str_name(s: &str) -> Result<Self, String> {
        match s {
            "habit_count" => Ok(Self::HabitCount),
            "total_habits" => Ok(Self::TotalHabits),
            "streak_days" => Ok(Self::StreakDays),
            "gratitude_entries" => Ok(Self::GratitudeEntries),
            "mood_logs" => Ok(Self::MoodLogs),
            "total_completions" => Ok(Self::TotalCompletions),
            "days_tracked" => Ok(Self::DaysTracked),
            _ => Err(format!("Unknown requirement kind: {}", s)),
        }
    }

    /// The snake_case wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HabitCount => "habit_count",
            Self::TotalHabits => "total_habits",
            Self::StreakDays => "streak_days",
            Self::GratitudeEntries => "gratitude_entries",
            Self::MoodLogs => "mood_logs",
            Self::TotalCompletions => "total_completions",
            Self::DaysTracked => "days_tracked",
        }
    }

    /// Whether a mutation in the given trigger domain can change this
    /// kind's raw value
    ///
    /// `DaysTracked` responds to both streak and mood triggers because a
    /// completion or a mood log can each add a new tracked day.
    pub fn responds_to(&self, trigger: Trigger) -> bool {
        match self {
            Self::HabitCount | Self::TotalHabits => trigger == Trigger::Habit,
            Self::StreakDays | Self::TotalCompletions => trigger == Trigger::Streak,
            Self::GratitudeEntries => trigger == Trigger::Gratitude,
            Self::MoodLogs => trigger == Trigger::Mood,
            Self::DaysTracked => trigger == Trigger::Streak || trigger == Trigger::Mood,
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutation domains that trigger re-evaluation
///
/// Each mutating CRUD operation in the external collaborator maps to one of
/// these and invokes the matching engine entry point after its own write
/// commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A habit was created, updated, or deleted
    Habit,

    /// A habit completion was logged or removed
    Streak,

    /// A mood entry was logged, updated, or deleted
    Mood,

    /// A gratitude entry was added or removed
    Gratitude,
}

/// One typed threshold an achievement requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// What is being counted
    pub kind: RequirementKind,

    /// Count at which the requirement is satisfied
    pub target: u32,

    /// Human unit label ("days", "entries", ...)
    pub unit: String,
}

impl Requirement {
    /// Create a requirement
    pub fn new(kind: RequirementKind, target: u32, unit: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            unit: unit.into(),
        }
    }
}

/// A declarative achievement definition
///
/// Defined once as seed data and read-only at runtime. Holds no per-user
/// state; per-user progress lives in [`crate::ProgressRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable key identifying the achievement ("streak_master")
    pub key: String,

    /// Human title
    pub title: String,

    /// Human description
    pub description: String,

    /// Display icon
    pub icon: String,

    /// Points awarded on earning
    pub points: u32,

    /// Ordered list of requirements; all must be satisfied to earn
    pub requirements: Vec<Requirement>,
}

impl Achievement {
    /// Whether any of this achievement's requirements responds to the
    /// given trigger domain
    pub fn responds_to(&self, trigger: Trigger) -> bool {
        self.requirements.iter().any(|r| r.kind.responds_to(trigger))
    }
}
