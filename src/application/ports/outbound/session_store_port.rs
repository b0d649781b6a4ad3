//! Session store port - Interface for run persistence
//!
//! The application services depend on this trait, not on the concrete blob
//! store. Semantics are last-write-wins with no concurrency control: the UI
//! serializes interactions to one session at a time. A future multi-tab
//! scenario would need an optimistic-concurrency stamp here before save.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::GameSession;
use crate::domain::value_objects::{GameId, SessionId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which game and session the tracker is currently focused on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSelection {
    pub current_game_id: GameId,
    pub current_session_id: Option<SessionId>,
}

/// Port for persisting tracked runs and the app-level selection
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load a session by id
    async fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError>;

    /// Persist a session, overwriting any stored copy. Saving a session the
    /// store has never seen is a no-op.
    async fn save(&self, session: &GameSession) -> Result<(), StoreError>;

    /// Create and persist a fresh session with empty maps
    async fn create(&self, game_id: GameId, name: &str) -> Result<GameSession, StoreError>;

    /// Delete a session; clears the current-session selection if it pointed
    /// at the deleted id
    async fn delete(&self, id: SessionId) -> Result<(), StoreError>;

    /// Sessions belonging to one game
    async fn list_by_game(&self, game_id: &GameId) -> Result<Vec<GameSession>, StoreError>;

    /// Current game/session selection
    async fn load_selection(&self) -> Result<AppSelection, StoreError>;

    /// Persist the game/session selection
    async fn save_selection(&self, selection: &AppSelection) -> Result<(), StoreError>;
}
