//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Quality, SrsState};
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next scheduling state after a review.
    fn schedule(&self, state: &SrsState, quality: Quality, now: DateTime<Utc>) -> SrsState;

    /// Initial state for a newly created card.
    fn initial_state(&self, now: DateTime<Utc>) -> SrsState;
}
