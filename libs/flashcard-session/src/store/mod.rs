//! Persistence collaborators.
//!
//! The card collection lives behind the async [`CardStore`]; the lighter
//! session state (queue snapshot and completion guard) behind the synchronous
//! [`SessionStateStore`]. Both are saved whole, never patched.

pub mod json_file;
pub mod memory;

pub use json_file::{JsonFileCardStore, JsonFileSessionStore};
pub use memory::{MemoryCardStore, MemorySessionStore};

use crate::error::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashcard_core::Card;
use serde::{Deserialize, Serialize};

/// Store for the full card collection.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Load every card. A store that was never written yields an empty list.
    async fn load(&self) -> StoreResult<Vec<Card>>;

    /// Replace the stored collection.
    async fn save(&self, cards: &[Card]) -> StoreResult<()>;
}

/// Store for the resumable session and the completion guard.
pub trait SessionStateStore: Send + Sync {
    fn load_snapshot(&self) -> StoreResult<Option<SessionSnapshot>>;
    fn save_snapshot(&self, snapshot: &SessionSnapshot) -> StoreResult<()>;
    fn clear_snapshot(&self) -> StoreResult<()>;

    /// When the last session was fully completed, if one was.
    fn load_completed_at(&self) -> StoreResult<Option<DateTime<Utc>>>;
    fn save_completed_at(&self, at: DateTime<Utc>) -> StoreResult<()>;
    fn clear_completed_at(&self) -> StoreResult<()>;
}

/// Persisted form of an active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Remaining cards, front first.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Queue length at assembly.
    #[serde(default)]
    pub size: usize,
    /// Position of the current card in `cards`.
    #[serde(default)]
    pub index: usize,
    /// Whether the current card is shown word first.
    #[serde(default = "default_direction")]
    pub direction: bool,
}

fn default_direction() -> bool {
    true
}

impl SessionSnapshot {
    /// Whether the snapshot describes a session worth resuming.
    pub fn is_resumable(&self) -> bool {
        !self.cards.is_empty() && self.size > 0
    }
}
