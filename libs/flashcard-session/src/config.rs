//! Session configuration.

use flashcard_core::{QueueLimits, MAX_INTERVAL_DAYS};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Largest card count accepted for either session limit.
pub const MAX_CARD_LIMIT: usize = 10_000;

/// Tunables for session assembly and start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub new_card_limit: usize,
    pub review_card_limit: usize,
    pub horizon_days: i64,
    /// Upper bound on the initial collection load.
    pub load_timeout_ms: u64,
    /// Hour of day (0-23) when a new study day begins.
    pub daily_reset_hour: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            new_card_limit: 20,
            review_card_limit: 30,
            horizon_days: 7,
            load_timeout_ms: 3000,
            daily_reset_hour: 0,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `FLASHCARDS_*` environment variables.
    ///
    /// Recognized variables:
    /// - FLASHCARDS_NEW_CARD_LIMIT
    /// - FLASHCARDS_REVIEW_CARD_LIMIT
    /// - FLASHCARDS_HORIZON_DAYS
    /// - FLASHCARDS_LOAD_TIMEOUT_MS
    /// - FLASHCARDS_DAILY_RESET_HOUR
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, "FLASHCARDS_NEW_CARD_LIMIT", &mut config.new_card_limit);
        override_from(&lookup, "FLASHCARDS_REVIEW_CARD_LIMIT", &mut config.review_card_limit);
        override_from(&lookup, "FLASHCARDS_HORIZON_DAYS", &mut config.horizon_days);
        override_from(&lookup, "FLASHCARDS_LOAD_TIMEOUT_MS", &mut config.load_timeout_ms);

        config.new_card_limit =
            clamped("FLASHCARDS_NEW_CARD_LIMIT", config.new_card_limit, 0, MAX_CARD_LIMIT);
        config.review_card_limit =
            clamped("FLASHCARDS_REVIEW_CARD_LIMIT", config.review_card_limit, 0, MAX_CARD_LIMIT);
        config.horizon_days = clamped(
            "FLASHCARDS_HORIZON_DAYS",
            config.horizon_days,
            0,
            i64::from(MAX_INTERVAL_DAYS),
        );

        let mut reset_hour = config.daily_reset_hour;
        override_from(&lookup, "FLASHCARDS_DAILY_RESET_HOUR", &mut reset_hour);
        if reset_hour < 24 {
            config.daily_reset_hour = reset_hour;
        } else {
            tracing::warn!("Ignoring FLASHCARDS_DAILY_RESET_HOUR={}, expected 0-23", reset_hour);
        }

        config
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn queue_limits(&self) -> QueueLimits {
        QueueLimits {
            new_cards: self.new_card_limit,
            review_cards: self.review_card_limit,
            horizon_days: self.horizon_days,
        }
    }
}

fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!("Ignoring unparsable {}={:?}", key, raw),
    }
}

fn clamped<T>(key: &str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if value < min {
        tracing::warn!("{}={} is below {}, using {}", key, value, min, min);
        min
    } else if value > max {
        tracing::warn!("{}={} is above {}, using {}", key, value, max, max);
        max
    } else {
        value
    }
}
