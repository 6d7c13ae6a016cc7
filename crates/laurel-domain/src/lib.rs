//! Laurel Domain Layer
//!
//! This crate contains the core business logic and domain model for Laurel,
//! the achievement and streak evaluation engine of a habit/wellness tracker.
//! It is pure computation over value objects: no I/O, no clock access, no
//! storage. Infrastructure implementations live in other crates.
//!
//! ## Key Concepts
//!
//! - **DatedEvent**: one dated occurrence (a habit completion, a mood log)
//! - **Streaks**: consecutive-day runs computed over a set of dates
//! - **Achievement**: a declarative definition with typed requirements
//! - **ProgressRecord**: per-(user, achievement) progress with a one-way
//!   earn transition
//!
//! ## Architecture
//!
//! - Pure functions for streaks, statistics, and requirement evaluation
//! - An immutable, explicitly-constructed achievement catalog
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod achievement;
pub mod catalog;
pub mod evaluator;
pub mod event;
pub mod progress;
pub mod stats;
pub mod streak;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use achievement::{Achievement, Requirement, RequirementKind, Trigger};
pub use catalog::AchievementCatalog;
pub use evaluator::{evaluate_achievement, evaluate_requirement, Evaluation, UserSnapshot};
pub use event::DatedEvent;
pub use progress::ProgressRecord;
pub use stats::{compute_statistics, MoodStatistics};
pub use streak::{compute_streaks, StreakSummary};
pub use user::UserId;
