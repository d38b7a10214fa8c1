//! JSON file implementations of the persistence collaborators.

use super::{CardStore, SessionSnapshot, SessionStateStore};
use crate::error::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashcard_core::Card;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "flashcards";
const CARDS_FILE: &str = "flashcards_data.json";
const SESSION_FILE: &str = "flashcards_active_session_state.json";
const COMPLETED_FILE: &str = "flashcards_session_completed_time.json";

fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Card collection stored as one JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileCardStore {
    path: PathBuf,
}

impl JsonFileCardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory, if one is known.
    pub fn in_default_location() -> Option<Self> {
        default_dir().map(|dir| Self::new(dir.join(CARDS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CardStore for JsonFileCardStore {
    async fn load(&self) -> StoreResult<Vec<Card>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, cards: &[Card]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a crash never leaves a truncated collection.
        let json = serde_json::to_vec_pretty(cards)?;
        let tmp = temp_path(&self.path);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Saved {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }
}

/// Session snapshot and completion guard, one small JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_default_location() -> Option<Self> {
        default_dir().map(Self::new)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Option<T>> {
        match std::fs::read_to_string(self.dir.join(file)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        let tmp = temp_path(&path);
        std::fs::write(&tmp, serde_json::to_vec(value)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, file: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.dir.join(file)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStateStore for JsonFileSessionStore {
    fn load_snapshot(&self) -> StoreResult<Option<SessionSnapshot>> {
        self.read(SESSION_FILE)
    }

    fn save_snapshot(&self, snapshot: &SessionSnapshot) -> StoreResult<()> {
        self.write(SESSION_FILE, snapshot)
    }

    fn clear_snapshot(&self) -> StoreResult<()> {
        self.remove(SESSION_FILE)
    }

    fn load_completed_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        self.read(COMPLETED_FILE)
    }

    fn save_completed_at(&self, at: DateTime<Utc>) -> StoreResult<()> {
        self.write(COMPLETED_FILE, &at)
    }

    fn clear_completed_at(&self) -> StoreResult<()> {
        self.remove(COMPLETED_FILE)
    }
}
