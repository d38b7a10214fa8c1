//! Shared handle for hosts that drive the manager from several tasks.

use crate::error::Result;
use crate::manager::{PresentedCard, ReviewOutcome, SessionManager, SessionStatistics};
use flashcard_core::{Card, CardContent, Quality};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle; every call holds the lock for its whole duration, so
/// operations never interleave.
#[derive(Clone)]
pub struct SharedSessionManager {
    inner: Arc<Mutex<SessionManager>>,
}

impl SharedSessionManager {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Exclusive access for multi-step operations.
    pub async fn lock(&self) -> MutexGuard<'_, SessionManager> {
        self.inner.lock().await
    }

    pub async fn current_card(&self) -> Option<PresentedCard> {
        self.inner.lock().await.current_card()
    }

    pub async fn statistics(&self) -> SessionStatistics {
        self.inner.lock().await.statistics()
    }

    pub async fn process_review(&self, card_id: &str, quality: Quality) -> Result<ReviewOutcome> {
        self.inner.lock().await.process_review(card_id, quality).await
    }

    pub async fn add_card(&self, content: CardContent) -> Result<Card> {
        self.inner.lock().await.add_card(content).await
    }

    pub async fn update_card(&self, id: &str, content: CardContent) -> Result<()> {
        self.inner.lock().await.update_card(id, content).await
    }

    pub async fn delete_card(&self, id: &str) -> Result<()> {
        self.inner.lock().await.delete_card(id).await
    }
}
