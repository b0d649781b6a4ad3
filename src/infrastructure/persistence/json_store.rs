//! JSON blob store - File-backed implementation of the session store port
//!
//! The whole tracker state persists as one serialized blob, mirroring the
//! original browser-local storage model: `{current_game_id,
//! current_session_id, sessions}`. Last write wins; there is no concurrency
//! control beyond the in-process lock.
//!
//! Durability is best-effort. A failed write is logged and swallowed: the
//! in-memory state stays authoritative for the process lifetime, and the UI
//! is never surfaced a persistence error.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::application::ports::outbound::{AppSelection, SessionStorePort, StoreError};
use crate::domain::entities::GameSession;
use crate::domain::value_objects::{GameId, SessionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrackerState {
    current_game_id: GameId,
    #[serde(default)]
    current_session_id: Option<SessionId>,
    #[serde(default)]
    sessions: Vec<GameSession>,
}

pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<TrackerState>,
}

impl JsonFileStore {
    /// Open the blob at `path`, falling back to a fresh state focused on
    /// `default_game_id` when the file is missing or unreadable.
    pub async fn open(path: impl Into<PathBuf>, default_game_id: GameId) -> Self {
        let path = path.into();
        let mut state = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<TrackerState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Failed to parse tracker state from {}: {}", path.display(), e);
                    Self::default_state(default_game_id)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No tracker state at {}, starting fresh", path.display());
                Self::default_state(default_game_id)
            }
            Err(e) => {
                warn!("Failed to read tracker state from {}: {}", path.display(), e);
                Self::default_state(default_game_id)
            }
        };

        // migrate sessions written before the default map existed
        for session in &mut state.sessions {
            if session.default_exit_to_entrance_map.is_empty()
                && !session.exit_to_entrance_map.is_empty()
            {
                session.default_exit_to_entrance_map = session.exit_to_entrance_map.clone();
            }
        }

        Self {
            path,
            state: Mutex::new(state),
        }
    }

    fn default_state(default_game_id: GameId) -> TrackerState {
        TrackerState {
            current_game_id: default_game_id,
            current_session_id: None,
            sessions: Vec::new(),
        }
    }

    async fn persist(&self, state: &TrackerState) {
        let serialized = match serde_json::to_string_pretty(state) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to serialize tracker state: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, serialized).await {
            error!("Failed to save tracker state to {}: {}", self.path.display(), e);
        }
    }
}

#[async_trait]
impl SessionStorePort for JsonFileStore {
    async fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if let Some(stored) = state.sessions.iter_mut().find(|s| s.id == session.id) {
            *stored = session.clone();
            self.persist(&state).await;
        }
        Ok(())
    }

    async fn create(&self, game_id: GameId, name: &str) -> Result<GameSession, StoreError> {
        let session = GameSession::new(game_id, name);
        let mut state = self.state.lock().await;
        state.sessions.push(session.clone());
        self.persist(&state).await;
        Ok(session)
    }

    async fn delete(&self, id: SessionId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.sessions.retain(|s| s.id != id);
        if state.current_session_id == Some(id) {
            state.current_session_id = None;
        }
        self.persist(&state).await;
        Ok(())
    }

    async fn list_by_game(&self, game_id: &GameId) -> Result<Vec<GameSession>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| &s.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn load_selection(&self) -> Result<AppSelection, StoreError> {
        let state = self.state.lock().await;
        Ok(AppSelection {
            current_game_id: state.current_game_id.clone(),
            current_session_id: state.current_session_id,
        })
    }

    async fn save_selection(&self, selection: &AppSelection) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.current_game_id = selection.current_game_id.clone();
        state.current_session_id = selection.current_session_id;
        self.persist(&state).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("tracker-store-test-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn sessions_round_trip_across_reopen() {
        let path = temp_path();
        let store = JsonFileStore::open(&path, "smw".into()).await;

        let mut session = store.create("smw".into(), "first run").await.unwrap();
        session
            .exit_to_entrance_map
            .insert("e1".into(), "e2".into());
        store.save(&session).await.unwrap();

        let reopened = JsonFileStore::open(&path, "smw".into()).await;
        let loaded = reopened.load(session.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "first run");
        assert_eq!(
            loaded.exit_to_entrance_map.get(&"e1".into()),
            Some(&"e2".into())
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_default_map_is_backfilled_on_read() {
        let path = temp_path();
        let store = JsonFileStore::open(&path, "smw".into()).await;
        let mut session = store.create("smw".into(), "old run").await.unwrap();
        session
            .exit_to_entrance_map
            .insert("e1".into(), "e2".into());
        session.default_exit_to_entrance_map = HashMap::new();
        store.save(&session).await.unwrap();

        let reopened = JsonFileStore::open(&path, "smw".into()).await;
        let migrated = reopened.load(session.id).await.unwrap().unwrap();
        assert_eq!(
            migrated.default_exit_to_entrance_map,
            migrated.exit_to_entrance_map
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn deleting_the_current_session_clears_the_selection() {
        let path = temp_path();
        let store = JsonFileStore::open(&path, "smw".into()).await;
        let session = store.create("smw".into(), "run").await.unwrap();
        store
            .save_selection(&AppSelection {
                current_game_id: "smw".into(),
                current_session_id: Some(session.id),
            })
            .await
            .unwrap();

        store.delete(session.id).await.unwrap();
        let selection = store.load_selection().await.unwrap();
        assert_eq!(selection.current_session_id, None);
        assert!(store.load(session.id).await.unwrap().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn corrupt_blob_falls_back_to_fresh_state() {
        let path = temp_path();
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path, "hod".into()).await;
        let selection = store.load_selection().await.unwrap();
        assert_eq!(selection.current_game_id, "hod".into());
        assert!(store.list_by_game(&"hod".into()).await.unwrap().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn saving_an_unknown_session_is_a_no_op() {
        let path = temp_path();
        let store = JsonFileStore::open(&path, "smw".into()).await;
        let stray = GameSession::new("smw", "never created");
        store.save(&stray).await.unwrap();
        assert!(store.load(stray.id).await.unwrap().is_none());

        let _ = std::fs::remove_file(&path);
    }
}
