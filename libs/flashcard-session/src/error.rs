//! Error types for session management.

use std::time::Duration;
use thiserror::Error;

/// Failures of the persistence collaborators.
///
/// These never reach callers of the session manager: they are logged and the
/// manager falls back to in-memory operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store did not respond within {0:?}")]
    Timeout(Duration),
}

/// Errors reported to callers of the session manager.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("card already exists: {0}")]
    DuplicateContent(String),

    #[error("card not found: {0}")]
    NotFound(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
