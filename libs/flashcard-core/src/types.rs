//! Core types for flashcard application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Quality of a recall, on the SuperMemo 0-5 scale.
///
/// Scores below 3 count as a lapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    Blackout,
    Wrong,
    WrongFamiliar,
    Hard,
    Good,
    Perfect,
}

impl Quality {
    /// Convert to the numeric score (0-5).
    pub fn value(self) -> u8 {
        match self {
            Self::Blackout => 0,
            Self::Wrong => 1,
            Self::WrongFamiliar => 2,
            Self::Hard => 3,
            Self::Good => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from the numeric score.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Blackout),
            1 => Some(Self::Wrong),
            2 => Some(Self::WrongFamiliar),
            3 => Some(Self::Hard),
            4 => Some(Self::Good),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    /// Whether the recall counts as successful.
    pub fn is_pass(self) -> bool {
        self.value() >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(CoreError::InvalidQuality(value))
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

/// User-editable content of a card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardContent {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub meanings: Vec<String>,
}

impl CardContent {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            meanings: Vec::new(),
        }
    }

    pub fn with_meanings<I, S>(mut self, meanings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meanings = meanings.into_iter().map(Into::into).collect();
        self
    }

    /// Key used for duplicate detection: trimmed and lowercased word.
    pub fn normalized_word(&self) -> String {
        normalize_word(&self.word)
    }
}

/// Scheduling parameters of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsState {
    /// Consecutive successful reviews since the last lapse.
    pub repetition_count: u32,
    /// Never below 1.3.
    pub ease_factor: f64,
    /// Days; 0 means the card is in short-interval retry.
    pub interval: u32,
    pub next_review_date: DateTime<Utc>,
}

/// A learnable card: content plus its scheduling state.
///
/// Serialized as one flat object (`id`, `word`, `translation`, `meanings`,
/// `repetitionCount`, `easeFactor`, `interval`, `nextReviewDate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(flatten)]
    pub content: CardContent,
    #[serde(flatten)]
    pub srs: SrsState,
}

impl Card {
    pub fn new(id: impl Into<String>, content: CardContent, srs: SrsState) -> Self {
        Self {
            id: id.into(),
            content,
            srs,
        }
    }

    /// Never reviewed, or lapsed on the last review.
    pub fn is_new(&self) -> bool {
        self.srs.repetition_count == 0
    }

    pub fn is_lapsed(&self) -> bool {
        self.srs.interval == 0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.srs.next_review_date <= now
    }

    /// Case-insensitive comparison of the trimmed words.
    pub fn matches_word(&self, word: &str) -> bool {
        self.content.normalized_word() == normalize_word(word)
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
