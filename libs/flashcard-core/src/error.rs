//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when building core values from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid quality score {0}, expected 0-5")]
    InvalidQuality(u8),
}
