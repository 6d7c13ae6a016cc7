//! The immutable achievement catalog
//!
//! Loaded once at startup and injected into the engine; refreshed only by
//! constructing a new catalog (explicit reseed). Tests inject small fixture
//! catalogs instead of the full seed list.

use crate::achievement::{Achievement, Requirement, RequirementKind, Trigger};

/// An immutable, validated set of achievement definitions
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    achievements: Vec<Achievement>,
}

impl AchievementCatalog {
    /// Build a catalog from definitions, validating as a whole
    ///
    /// Rejects duplicate keys and achievements with no requirements, so a
    /// malformed seed fails at startup rather than silently never earning.
    pub fn new(achievements: Vec<Achievement>) -> Result<Self, String> {
        let mut seen = std::collections::HashSet::new();
        for achievement in &achievements {
            if !seen.insert(achievement.key.as_str()) {
                return Err(format!("Duplicate achievement key: {}", achievement.key));
            }
            if achievement.requirements.is_empty() {
                return Err(format!(
                    "Achievement {} has no requirements",
                    achievement.key
                ));
            }
        }
        Ok(Self { achievements })
    }

    /// Deserialize a catalog from a JSON definition list
    ///
    /// An unrecognized requirement kind is a deserialization error, not a
    /// runtime no-op.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let achievements: Vec<Achievement> =
            serde_json::from_str(json).map_err(|e| format!("Invalid catalog JSON: {}", e))?;
        Self::new(achievements)
    }

    /// The built-in seed catalog shipped with the tracker
    pub fn default_seed() -> Self {
        let achievements = vec![
            Achievement {
                key: "first_steps".to_string(),
                title: "First Steps".to_string(),
                description: "Created your first habit".to_string(),
                icon: "🌱".to_string(),
                points: 10,
                requirements: vec![Requirement::new(RequirementKind::HabitCount, 1, "habits")],
            },
            Achievement {
                key: "streak_master".to_string(),
                title: "Streak Master".to_string(),
                description: "Maintained a 7-day streak".to_string(),
                icon: "🔥".to_string(),
                points: 25,
                requirements: vec![Requirement::new(RequirementKind::StreakDays, 7, "days")],
            },
            Achievement {
                key: "gratitude_pro".to_string(),
                title: "Gratitude Pro".to_string(),
                description: "Logged 10 gratitude entries".to_string(),
                icon: "🙏".to_string(),
                points: 20,
                requirements: vec![Requirement::new(
                    RequirementKind::GratitudeEntries,
                    10,
                    "entries",
                )],
            },
            Achievement {
                key: "consistency_king".to_string(),
                title: "Consistency King".to_string(),
                description: "Tracked habits for 30 days".to_string(),
                icon: "👑".to_string(),
                points: 50,
                requirements: vec![Requirement::new(RequirementKind::DaysTracked, 30, "days")],
            },
            Achievement {
                key: "wellness_warrior".to_string(),
                title: "Wellness Warrior".to_string(),
                description: "Completed 100 habit checkmarks".to_string(),
                icon: "⚔️".to_string(),
                points: 75,
                requirements: vec![Requirement::new(
                    RequirementKind::TotalCompletions,
                    100,
                    "completions",
                )],
            },
            Achievement {
                key: "mood_tracker".to_string(),
                title: "Mood Tracker".to_string(),
                description: "Logged mood 20 times".to_string(),
                icon: "😊".to_string(),
                points: 20,
                requirements: vec![Requirement::new(RequirementKind::MoodLogs, 20, "logs")],
            },
            Achievement {
                key: "habit_collector".to_string(),
                title: "Habit Collector".to_string(),
                description: "Created 10 different habits".to_string(),
                icon: "📚".to_string(),
                points: 30,
                requirements: vec![Requirement::new(RequirementKind::TotalHabits, 10, "habits")],
            },
        ];

        // The built-in seed is known good
        Self { achievements }
    }

    /// Look up an achievement by key
    pub fn get(&self, key: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.key == key)
    }

    /// Iterate over every achievement
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }

    /// Keys of every achievement, in definition order
    pub fn keys(&self) -> Vec<&str> {
        self.achievements.iter().map(|a| a.key.as_str()).collect()
    }

    /// Achievements whose requirements respond to the given trigger
    pub fn responding_to(&self, trigger: Trigger) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(move |a| a.responds_to(trigger))
    }

    /// Number of achievements in the catalog
    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }
}
