//! Laurel Achievement Engine
//!
//! Orchestrates achievement evaluation: after a mutating operation in the
//! external CRUD collaborator commits, the matching domain-scoped entry
//! point reads the user's current counts through the [`laurel_domain`]
//! trait seams, re-evaluates every achievement that responds to that
//! domain, and persists the updated progress as one batch.
//!
//! The engine is synchronous and idempotent: every entry point is a bounded
//! read-modify-write pass that is safe to invoke redundantly. A failed
//! persist leaves progress at its prior value to be recomputed on the next
//! triggering event.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod error;

pub use engine::AchievementEngine;
pub use error::EngineError;
