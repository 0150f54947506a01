//! Persistence boundary for finished games
//!
//! The engine never talks to storage itself; a [`GameArchive`] collaborator
//! accepts a [`GameSummary`] once a game ends (or is abandoned). The
//! in-memory implementation backs tests and demos and stores summaries as
//! JSON, the shape a real backend would persist.

use crate::error::{ArchiveError, ArchiveResult};
use crate::history::GameSummary;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Storage collaborator accepting finished game summaries.
#[async_trait]
pub trait GameArchive: Send + Sync {
    async fn store(&self, summary: &GameSummary) -> ArchiveResult<()>;
}

/// In-memory [`GameArchive`] keeping JSON-encoded summaries.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    entries: Mutex<Vec<(Uuid, String)>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a stored summary by game id.
    pub fn fetch(&self, game_id: Uuid) -> ArchiveResult<Option<GameSummary>> {
        let entries = self.entries.lock().map_err(|_| ArchiveError::Storage {
            message: "archive lock poisoned".to_string(),
        })?;
        match entries.iter().find(|(id, _)| *id == game_id) {
            Some((_, encoded)) => Ok(Some(serde_json::from_str(encoded)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl GameArchive for MemoryArchive {
    async fn store(&self, summary: &GameSummary) -> ArchiveResult<()> {
        let encoded = serde_json::to_string(summary)?;
        let mut entries = self.entries.lock().map_err(|_| ArchiveError::Storage {
            message: "archive lock poisoned".to_string(),
        })?;
        entries.push((summary.game_id, encoded));
        info!("[GAME] archived game {}", summary.game_id);
        Ok(())
    }
}
