//! Error types for RosterForge

use thiserror::Error;

/// Main error type for RosterForge operations
#[derive(Debug, Error)]
pub enum RosterForgeError {
    /// Error in the constraint configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fact snapshot violates a precondition (e.g. a shift ending before it starts)
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The incrementally maintained score drifted from a full recalculation
    #[error("Score corruption: incremental score {actual} does not match recalculated score {expected}")]
    ScoreCorruption { expected: String, actual: String },

    /// Invalid operation for the current scorer state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterForgeError>;
