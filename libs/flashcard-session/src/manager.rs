//! Session manager: owns the card collection and the review queue.
//!
//! Lifecycle:
//! - `open` loads the collection (bounded by the load timeout), then either
//!   resumes a persisted session or assembles a new one.
//! - `process_review` schedules the reviewed card, drops it from the queue on
//!   a pass and requeues it at the tail on a lapse.
//! - When the last card passes, the session completes and a completion
//!   timestamp blocks assembly for the rest of that study day.

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::date_utils::same_study_day;
use crate::defaults::default_cards;
use crate::error::{Result, SessionError, StoreError};
use crate::store::{CardStore, SessionSnapshot, SessionStateStore};
use chrono::{DateTime, Utc};
use flashcard_core::{
    assemble_queue, Card, CardContent, Quality, Sm2, SpacedRepetitionAlgorithm, SrsState,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

/// Where the manager is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoSession,
    Active,
    /// A session was finished earlier in the current study day.
    Completed,
}

/// The card to show next, with the side to show first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedCard {
    pub card: Card,
    pub front_to_back: bool,
}

/// Collection and session progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatistics {
    pub total_cards: usize,
    pub due_today: usize,
    pub total_in_session: usize,
    pub completed_in_session: usize,
}

/// Result of a single review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub card_id: String,
    pub new_state: SrsState,
    /// The card went back to the tail of the queue.
    pub requeued: bool,
    /// This review emptied the queue.
    pub session_completed: bool,
}

/// Builder collecting the manager's collaborators.
pub struct SessionManagerBuilder {
    card_store: Arc<dyn CardStore>,
    state_store: Arc<dyn SessionStateStore>,
    clock: Arc<dyn Clock>,
    rng: Option<Box<dyn RngCore + Send + Sync>>,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    config: SessionConfig,
    default_cards: Option<Vec<Card>>,
}

impl SessionManagerBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Randomness for shuffling and card direction. Seeded from entropy if
    /// not set.
    pub fn rng<R: RngCore + Send + Sync + 'static>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn algorithm<A: SpacedRepetitionAlgorithm + 'static>(mut self, algorithm: A) -> Self {
        self.algorithm = Box::new(algorithm);
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the built-in starter deck used when the store is empty or
    /// unavailable.
    pub fn default_cards(mut self, cards: Vec<Card>) -> Self {
        self.default_cards = Some(cards);
        self
    }

    /// Load the collection and resume or assemble a session.
    ///
    /// Never fails: an unreachable store leaves the manager running on the
    /// starter deck with saving disabled.
    pub async fn open(self) -> SessionManager {
        let mut manager = SessionManager {
            cards: Vec::new(),
            queue: VecDeque::new(),
            initial_size: 0,
            front_to_back: true,
            storage_failed: false,
            card_store: self.card_store,
            state_store: self.state_store,
            clock: self.clock,
            rng: match self.rng {
                Some(rng) => rng,
                None => Box::new(StdRng::from_entropy()),
            },
            algorithm: self.algorithm,
            config: self.config,
        };

        manager.load_collection(self.default_cards).await;

        if !manager.resume() {
            manager.refresh_session();
        }

        manager
    }
}

/// Owner of the card collection and the current review queue.
///
/// Every mutation of the collection is persisted in full. The queue always
/// operates on its front: the front card is the current card.
pub struct SessionManager {
    cards: Vec<Card>,
    queue: VecDeque<Card>,
    initial_size: usize,
    front_to_back: bool,
    storage_failed: bool,
    card_store: Arc<dyn CardStore>,
    state_store: Arc<dyn SessionStateStore>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RngCore + Send + Sync>,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn builder(
        card_store: Arc<dyn CardStore>,
        state_store: Arc<dyn SessionStateStore>,
    ) -> SessionManagerBuilder {
        SessionManagerBuilder {
            card_store,
            state_store,
            clock: Arc::new(SystemClock),
            rng: None,
            algorithm: Box::new(Sm2::default()),
            config: SessionConfig::default(),
            default_cards: None,
        }
    }

    // --- queries ---

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Remaining session cards, current card first.
    pub fn session_cards(&self) -> &VecDeque<Card> {
        &self.queue
    }

    pub fn current_card(&self) -> Option<PresentedCard> {
        self.queue.front().map(|card| PresentedCard {
            card: card.clone(),
            front_to_back: self.front_to_back,
        })
    }

    pub fn due_cards(&self) -> Vec<&Card> {
        let now = self.clock.now();
        self.cards.iter().filter(|c| c.is_due(now)).collect()
    }

    pub fn statistics(&self) -> SessionStatistics {
        SessionStatistics {
            total_cards: self.cards.len(),
            due_today: self.due_cards().len(),
            total_in_session: self.initial_size,
            completed_in_session: self.initial_size.saturating_sub(self.queue.len()),
        }
    }

    pub fn state(&self) -> SessionState {
        if !self.queue.is_empty() {
            SessionState::Active
        } else if self.completed_today() {
            SessionState::Completed
        } else {
            SessionState::NoSession
        }
    }

    /// Saving was disabled after a store failure.
    pub fn storage_failed(&self) -> bool {
        self.storage_failed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // --- session lifecycle ---

    /// Assemble a new session if none is active and no session was completed
    /// earlier today. Returns whether a non-empty session was assembled.
    pub fn refresh_session(&mut self) -> bool {
        if !self.queue.is_empty() || self.cards.is_empty() {
            return false;
        }
        if !self.guard_permits_assembly() {
            tracing::info!("Session already completed today, not assembling a new one");
            return false;
        }

        let now = self.clock.now();
        let queue = assemble_queue(&self.cards, now, &self.config.queue_limits(), &mut *self.rng);

        self.queue = queue.into();
        self.initial_size = self.queue.len();
        self.front_to_back = self.rng.gen_bool(0.5);

        if self.queue.is_empty() {
            tracing::info!("No cards due, nothing to assemble");
            log_store_error("clear session snapshot", self.state_store.clear_snapshot());
            return false;
        }

        tracing::info!("Assembled session with {} cards", self.initial_size);
        self.save_snapshot();
        true
    }

    /// Score a card and advance the session.
    ///
    /// The card's stored scheduling state is updated and the collection is
    /// saved. If the card is in the session it leaves the queue on a pass and
    /// moves to the tail on a lapse.
    pub async fn process_review(&mut self, card_id: &str, quality: Quality) -> Result<ReviewOutcome> {
        let now = self.clock.now();
        let stored_pos = self.cards.iter().position(|c| c.id == card_id);
        let session_pos = self.queue.iter().position(|c| c.id == card_id);

        let current = stored_pos
            .map(|i| &self.cards[i])
            .or_else(|| session_pos.and_then(|i| self.queue.get(i)))
            .map(|card| card.srs.clone())
            .ok_or_else(|| SessionError::NotFound(card_id.to_string()))?;

        let new_state = self.algorithm.schedule(&current, quality, now);
        tracing::debug!(
            "Reviewed {} with quality {}: interval {} -> {}",
            card_id,
            quality.value(),
            current.interval,
            new_state.interval
        );

        if let Some(i) = stored_pos {
            self.cards[i].srs = new_state.clone();
            self.persist_cards().await;
        }

        let mut requeued = false;
        let mut session_completed = false;

        if let Some(pos) = session_pos {
            if let Some(mut card) = self.queue.remove(pos) {
                if !quality.is_pass() {
                    card.srs = new_state.clone();
                    self.queue.push_back(card);
                    requeued = true;
                }
            }

            if self.queue.is_empty() {
                self.complete_session(now);
                session_completed = true;
            } else {
                self.front_to_back = self.rng.gen_bool(0.5);
                self.save_snapshot();
            }
        }

        Ok(ReviewOutcome {
            card_id: card_id.to_string(),
            new_state,
            requeued,
            session_completed,
        })
    }

    // --- collection edits ---

    /// Add a card with fresh scheduling state.
    ///
    /// Rejected if a card with the same word (trimmed, case-insensitive)
    /// already exists.
    pub async fn add_card(&mut self, content: CardContent) -> Result<Card> {
        if self.cards.iter().any(|c| c.matches_word(&content.word)) {
            return Err(SessionError::DuplicateContent(content.word.trim().to_string()));
        }

        let content = CardContent {
            word: content.word.trim().to_string(),
            ..content
        };
        let card = Card::new(
            Uuid::new_v4().to_string(),
            content,
            self.algorithm.initial_state(self.clock.now()),
        );

        self.cards.push(card.clone());
        self.persist_cards().await;
        Ok(card)
    }

    /// Replace a card's content. Scheduling state is kept as stored.
    ///
    /// The word is trimmed and must not collide with another card's word.
    pub async fn update_card(&mut self, id: &str, content: CardContent) -> Result<()> {
        if !self.cards.iter().any(|c| c.id == id) {
            return Err(SessionError::NotFound(id.to_string()));
        }
        if self
            .cards
            .iter()
            .any(|c| c.id != id && c.matches_word(&content.word))
        {
            return Err(SessionError::DuplicateContent(content.word.trim().to_string()));
        }

        let content = CardContent {
            word: content.word.trim().to_string(),
            ..content
        };
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        card.content = content.clone();

        if let Some(queued) = self.queue.iter_mut().find(|c| c.id == id) {
            queued.content = content;
        }

        self.persist_cards().await;
        if !self.queue.is_empty() {
            self.save_snapshot();
        }
        Ok(())
    }

    /// Remove a card from the collection and from the session.
    ///
    /// Emptying the session this way clears it without marking it completed.
    pub async fn delete_card(&mut self, id: &str) -> Result<()> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        self.cards.remove(pos);
        self.persist_cards().await;

        if let Some(queued) = self.queue.iter().position(|c| c.id == id) {
            self.queue.remove(queued);
            self.initial_size = self.initial_size.saturating_sub(1);

            if self.queue.is_empty() {
                self.clear_session();
            } else {
                self.save_snapshot();
            }
        }
        Ok(())
    }

    // --- internals ---

    async fn load_collection(&mut self, defaults: Option<Vec<Card>>) {
        let timeout = self.config.load_timeout();
        let loaded = match tokio::time::timeout(timeout, self.card_store.load()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(timeout)),
        };
        let defaults = defaults.unwrap_or_else(|| default_cards(self.clock.now()));

        match loaded {
            Ok(cards) if !cards.is_empty() => {
                tracing::info!("Loaded {} cards", cards.len());
                self.cards = cards;
            }
            Ok(_) => {
                tracing::info!("Card store is empty, seeding {} starter cards", defaults.len());
                self.cards = defaults;
                self.persist_cards().await;
            }
            Err(e) => {
                tracing::warn!("Card store unavailable, using starter deck without saving: {}", e);
                self.cards = defaults;
                self.storage_failed = true;
            }
        }
    }

    fn resume(&mut self) -> bool {
        let snapshot = match self.state_store.load_snapshot() {
            Ok(Some(snapshot)) if snapshot.is_resumable() => snapshot,
            Ok(_) => return false,
            Err(e) => {
                tracing::warn!("Failed to read session snapshot: {}", e);
                return false;
            }
        };

        let index = if snapshot.index < snapshot.cards.len() {
            snapshot.index
        } else {
            0
        };
        self.queue = snapshot.cards.into();
        self.queue.rotate_left(index);
        self.initial_size = snapshot.size;
        self.front_to_back = snapshot.direction;

        tracing::info!(
            "Resumed session: {} of {} cards remaining",
            self.queue.len(),
            self.initial_size
        );
        true
    }

    fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self.state_store.load_completed_at() {
            Ok(at) => at,
            Err(e) => {
                tracing::warn!("Failed to read completion time: {}", e);
                None
            }
        }
    }

    fn completed_today(&self) -> bool {
        self.completed_at().is_some_and(|at| {
            same_study_day(
                at,
                self.clock.now(),
                self.clock.utc_offset(),
                self.config.daily_reset_hour,
            )
        })
    }

    /// Blocks on the day a session was completed; clears a stale mark.
    fn guard_permits_assembly(&self) -> bool {
        if self.completed_at().is_none() {
            return true;
        }
        if self.completed_today() {
            return false;
        }
        log_store_error("clear completion time", self.state_store.clear_completed_at());
        true
    }

    fn complete_session(&mut self, now: DateTime<Utc>) {
        tracing::info!("Session completed ({} cards)", self.initial_size);
        log_store_error("clear session snapshot", self.state_store.clear_snapshot());
        log_store_error("save completion time", self.state_store.save_completed_at(now));
        self.initial_size = 0;
    }

    fn clear_session(&mut self) {
        log_store_error("clear session snapshot", self.state_store.clear_snapshot());
        log_store_error("clear completion time", self.state_store.clear_completed_at());
        self.initial_size = 0;
    }

    /// Persist the queue. An active session supersedes any completion mark.
    fn save_snapshot(&self) {
        let snapshot = SessionSnapshot {
            cards: self.queue.iter().cloned().collect(),
            size: self.initial_size,
            index: 0,
            direction: self.front_to_back,
        };
        log_store_error("save session snapshot", self.state_store.save_snapshot(&snapshot));
        log_store_error("clear completion time", self.state_store.clear_completed_at());
    }

    async fn persist_cards(&mut self) {
        if self.storage_failed {
            tracing::debug!("Card store marked failed, skipping save");
            return;
        }
        if let Err(e) = self.card_store.save(&self.cards).await {
            tracing::warn!("Failed to save cards, disabling further saves: {}", e);
            self.storage_failed = true;
        }
    }
}

fn log_store_error(action: &str, result: std::result::Result<(), StoreError>) {
    if let Err(e) = result {
        tracing::warn!("Failed to {}: {}", action, e);
    }
}
