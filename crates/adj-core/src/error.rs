//! # Error Types
//!
//! Validation failures raised when constructing domain primitives.

use thiserror::Error;

/// Error raised when a domain primitive fails validation at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Participant identifier was empty or whitespace.
    #[error("participant identifier must not be empty")]
    EmptyParticipantId,

    /// Session identifier was empty or whitespace.
    #[error("session identifier must not be empty")]
    EmptySessionId,

    /// Session identifier was a relative path component.
    #[error("session identifier must not be {0:?}")]
    ReservedSessionId(String),

    /// Quorum must require at least one argument.
    #[error("quorum must be at least 1, got {0}")]
    InvalidQuorum(usize),
}
