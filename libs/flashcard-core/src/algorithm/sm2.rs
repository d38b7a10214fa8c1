//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2: the ease factor moves on every review, a lapse resets
//! the repetition streak and schedules a short retry, and successful reviews
//! grow the interval 1 -> 6 -> interval * ease.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Quality, SrsState};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Delay before a lapsed card becomes due again.
    pub retry_delay_minutes: i64,
    pub first_interval: u32,
    pub second_interval: u32,
    /// Upper bound on any computed interval, in days.
    pub maximum_interval: u32,
}

/// About a century; keeps due dates representable.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            retry_delay_minutes: 10,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: MAX_INTERVAL_DAYS,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> SrsState {
        SrsState {
            repetition_count: 0,
            ease_factor: self.initial_ease,
            interval: 0,
            next_review_date: now,
        }
    }

    fn schedule(&self, state: &SrsState, quality: Quality, now: DateTime<Utc>) -> SrsState {
        let ease_factor = self.next_ease(state.ease_factor, quality);

        let (repetition_count, interval) = if !quality.is_pass() {
            (0, 0)
        } else {
            match state.repetition_count {
                0 => (1, self.first_interval.min(self.maximum_interval)),
                1 => (2, self.second_interval.min(self.maximum_interval)),
                n => {
                    let grown = (f64::from(state.interval) * ease_factor)
                        .round()
                        .min(f64::from(self.maximum_interval));
                    (n.saturating_add(1), grown as u32)
                }
            }
        };

        let delay = if quality.is_pass() {
            Duration::try_days(i64::from(interval))
        } else {
            Duration::try_minutes(self.retry_delay_minutes)
        };
        let next_review_date = delay
            .and_then(|delay| now.checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SrsState {
            repetition_count,
            ease_factor,
            interval,
            next_review_date,
        }
    }
}

impl Sm2 {
    fn next_ease(&self, ease_factor: f64, quality: Quality) -> f64 {
        let miss = f64::from(5 - quality.value());
        let adjusted = ease_factor + 0.1 - miss * (0.08 + miss * 0.02);
        adjusted.max(self.minimum_ease)
    }
}
