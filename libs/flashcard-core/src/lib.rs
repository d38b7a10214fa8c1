//! Core flashcard library shared by the session manager and its hosts.
//!
//! Provides:
//! - Shared types (Card, CardContent, SrsState, Quality)
//! - Spaced repetition algorithm (SM-2 variant)
//! - Review queue assembly (limits, lapse-first ordering, shuffling)

pub mod algorithm;
pub mod error;
pub mod queue;
pub mod types;

pub use algorithm::{
    sm2::{Sm2, MAX_INTERVAL_DAYS},
    SpacedRepetitionAlgorithm,
};
pub use error::{CoreError, Result};
pub use queue::{assemble_queue, prioritize_reviews, QueueLimits};
pub use types::{Card, CardContent, Quality, SrsState};
