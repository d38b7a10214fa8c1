//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Harness wiring in-memory stores, a manual clock and a seeded RNG
//! - Card factories
//! - Card stores that fail or stall on purpose

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flashcard_core::{Card, CardContent, SrsState};
use flashcard_session::error::StoreResult;
use flashcard_session::{
    CardStore, ManualClock, MemoryCardStore, MemorySessionStore, SessionConfig, SessionManager,
    StoreError,
};

/// Fixed start time: Sunday 2024-03-10, noon UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

/// A never-reviewed card, due now.
pub fn new_card(id: &str) -> Card {
    Card::new(
        id,
        CardContent::new(id, format!("{} translated", id)),
        SrsState {
            repetition_count: 0,
            ease_factor: 2.5,
            interval: 0,
            next_review_date: now(),
        },
    )
}

/// A card in review, due `due_in_hours` from the start time.
pub fn review_card(id: &str, interval: u32, due_in_hours: i64) -> Card {
    Card::new(
        id,
        CardContent::new(id, format!("{} translated", id)),
        SrsState {
            repetition_count: 3,
            ease_factor: 2.5,
            interval,
            next_review_date: now() + Duration::hours(due_in_hours),
        },
    )
}

/// Test context: in-memory stores plus a manual clock.
///
/// Opening several managers from one harness simulates restarts against the
/// same storage.
pub struct Harness {
    pub cards: Arc<MemoryCardStore>,
    pub session: Arc<MemorySessionStore>,
    pub clock: Arc<ManualClock>,
    pub config: SessionConfig,
}

impl Harness {
    pub fn new(cards: Vec<Card>) -> Self {
        flashcard_session::logging::init_tracing();
        Self {
            cards: Arc::new(MemoryCardStore::with_cards(cards)),
            session: Arc::new(MemorySessionStore::new()),
            clock: Arc::new(ManualClock::new(now())),
            config: SessionConfig::default(),
        }
    }

    pub async fn open(&self) -> SessionManager {
        self.open_seeded(42).await
    }

    pub async fn open_seeded(&self, seed: u64) -> SessionManager {
        SessionManager::builder(self.cards.clone(), self.session.clone())
            .clock(self.clock.clone())
            .rng(StdRng::seed_from_u64(seed))
            .config(self.config.clone())
            .open()
            .await
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// Card store whose loads always fail.
#[derive(Default)]
pub struct UnavailableStore {
    pub save_attempts: AtomicUsize,
}

#[async_trait]
impl CardStore for UnavailableStore {
    async fn load(&self) -> StoreResult<Vec<Card>> {
        Err(StoreError::Unavailable("storage engine not ready".to_string()))
    }

    async fn save(&self, _cards: &[Card]) -> StoreResult<()> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Card store that answers loads only after a delay.
pub struct StallingStore {
    pub delay: StdDuration,
    pub cards: Vec<Card>,
}

#[async_trait]
impl CardStore for StallingStore {
    async fn load(&self) -> StoreResult<Vec<Card>> {
        tokio::time::sleep(self.delay).await;
        Ok(self.cards.clone())
    }

    async fn save(&self, _cards: &[Card]) -> StoreResult<()> {
        Ok(())
    }
}

/// Card store that loads fine but rejects every save.
pub struct ReadOnlyStore {
    pub cards: Vec<Card>,
    pub save_attempts: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            save_attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CardStore for ReadOnlyStore {
    async fn load(&self) -> StoreResult<Vec<Card>> {
        Ok(self.cards.clone())
    }

    async fn save(&self, _cards: &[Card]) -> StoreResult<()> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}
