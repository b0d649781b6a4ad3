//! Session service - Use cases for creating and managing tracked runs

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{AppSelection, SessionStorePort};
use crate::domain::catalog::GameCatalog;
use crate::domain::entities::GameSession;
use crate::domain::services::mapping;
use crate::domain::value_objects::{GameId, SessionId};

pub struct SessionService {
    catalog: Arc<GameCatalog>,
    store: Arc<dyn SessionStorePort>,
}

impl SessionService {
    pub fn new(catalog: Arc<GameCatalog>, store: Arc<dyn SessionStorePort>) -> Self {
        Self { catalog, store }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Session name cannot be empty");
        }
        if name.len() > 255 {
            anyhow::bail!("Session name cannot exceed 255 characters");
        }
        Ok(())
    }

    /// Create a session for a game, seeding option selections and both the
    /// live and default assignment maps.
    ///
    /// Creating a session for a nonexistent game is a hard failure; no
    /// meaningful session can exist for one.
    #[instrument(skip(self), fields(game_id = %game_id, name = %name))]
    pub async fn create_session(&self, game_id: &GameId, name: &str) -> Result<GameSession> {
        Self::validate_name(name)?;
        let game = self
            .catalog
            .get(game_id)
            .ok_or_else(|| anyhow::anyhow!("Game not found: {}", game_id))?;

        let mut session = self
            .store
            .create(game_id.clone(), name)
            .await
            .context("Failed to create session in store")?;

        session.selected_options = mapping::initial_options(game);
        let default_map = mapping::initial_mapping(game);
        session.exit_to_entrance_map = default_map.clone();
        session.default_exit_to_entrance_map = default_map;

        self.store
            .save(&session)
            .await
            .context("Failed to persist initialized session")?;

        info!(session_id = %session.id, "Created session '{}' for game {}", session.name, game_id);
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn get_session(&self, id: SessionId) -> Result<Option<GameSession>> {
        debug!(session_id = %id, "Fetching session");
        self.store
            .load(id)
            .await
            .context("Failed to load session from store")
    }

    #[instrument(skip(self))]
    pub async fn list_sessions(&self, game_id: &GameId) -> Result<Vec<GameSession>> {
        debug!(game_id = %game_id, "Listing sessions for game");
        self.store
            .list_by_game(game_id)
            .await
            .context("Failed to list sessions from store")
    }

    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn rename_session(&self, id: SessionId, name: &str) -> Result<GameSession> {
        Self::validate_name(name)?;
        let mut session = self
            .store
            .load(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Session not found: {}", id))?;

        session.name = name.to_string();
        session.touch();
        self.store
            .save(&session)
            .await
            .context("Failed to persist renamed session")?;

        info!(session_id = %id, "Renamed session to '{}'", session.name);
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn delete_session(&self, id: SessionId) -> Result<()> {
        self.store
            .delete(id)
            .await
            .context("Failed to delete session from store")?;
        info!(session_id = %id, "Deleted session");
        Ok(())
    }

    /// The game/session the tracker is currently focused on
    pub async fn selection(&self) -> Result<AppSelection> {
        self.store
            .load_selection()
            .await
            .context("Failed to load app selection")
    }

    /// Switch focus. Switching to another game clears the session selection;
    /// a supplied session must exist and belong to the chosen game.
    #[instrument(skip(self))]
    pub async fn set_selection(
        &self,
        game_id: GameId,
        session_id: Option<SessionId>,
    ) -> Result<AppSelection> {
        if self.catalog.get(&game_id).is_none() {
            anyhow::bail!("Game not found: {}", game_id);
        }
        let session_id = match session_id {
            Some(id) => {
                let session = self
                    .store
                    .load(id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Session not found: {}", id))?;
                if session.game_id != game_id {
                    anyhow::bail!("Session {} does not belong to game {}", id, game_id);
                }
                Some(id)
            }
            None => None,
        };

        let selection = AppSelection {
            current_game_id: game_id,
            current_session_id: session_id,
        };
        self.store
            .save_selection(&selection)
            .await
            .context("Failed to persist app selection")?;
        Ok(selection)
    }
}
