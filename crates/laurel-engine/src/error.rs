//! Error types for engine operations

use thiserror::Error;

/// Errors that can occur during an evaluation pass
#[derive(Error, Debug)]
pub enum EngineError {
    /// Event source read error
    #[error("Event source error: {0}")]
    Source(String),

    /// Progress store error
    #[error("Progress store error: {0}")]
    Store(String),
}
