//! Review session management on top of flashcard-core.
//!
//! Provides:
//! - SessionManager: owns the collection and the review queue, persists both
//! - Persistence collaborators (JSON files, in-memory)
//! - Injected clock and configuration
//! - SharedSessionManager for hosts that call in from several tasks

pub mod clock;
pub mod config;
pub mod date_utils;
pub mod defaults;
pub mod error;
pub mod handle;
pub mod logging;
pub mod manager;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use error::{SessionError, StoreError};
pub use handle::SharedSessionManager;
pub use manager::{
    PresentedCard, ReviewOutcome, SessionManager, SessionManagerBuilder, SessionState,
    SessionStatistics,
};
pub use store::{
    CardStore, JsonFileCardStore, JsonFileSessionStore, MemoryCardStore, MemorySessionStore,
    SessionSnapshot, SessionStateStore,
};
