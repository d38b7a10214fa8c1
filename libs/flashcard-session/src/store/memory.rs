//! In-memory persistence collaborators.

use super::{CardStore, SessionSnapshot, SessionStateStore};
use crate::error::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashcard_core::Card;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Card collection kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    cards: Mutex<Vec<Card>>,
    saves: AtomicUsize,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the stored collection.
    pub fn cards(&self) -> Vec<Card> {
        lock(&self.cards).clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn load(&self) -> StoreResult<Vec<Card>> {
        Ok(self.cards())
    }

    async fn save(&self, cards: &[Card]) -> StoreResult<()> {
        *lock(&self.cards) = cards.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Session state kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    snapshot: Mutex<Option<SessionSnapshot>>,
    completed_at: Mutex<Option<DateTime<Utc>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStateStore for MemorySessionStore {
    fn load_snapshot(&self) -> StoreResult<Option<SessionSnapshot>> {
        Ok(lock(&self.snapshot).clone())
    }

    fn save_snapshot(&self, snapshot: &SessionSnapshot) -> StoreResult<()> {
        *lock(&self.snapshot) = Some(snapshot.clone());
        Ok(())
    }

    fn clear_snapshot(&self) -> StoreResult<()> {
        *lock(&self.snapshot) = None;
        Ok(())
    }

    fn load_completed_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(*lock(&self.completed_at))
    }

    fn save_completed_at(&self, at: DateTime<Utc>) -> StoreResult<()> {
        *lock(&self.completed_at) = Some(at);
        Ok(())
    }

    fn clear_completed_at(&self) -> StoreResult<()> {
        *lock(&self.completed_at) = None;
        Ok(())
    }
}
