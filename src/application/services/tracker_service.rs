//! Tracker service - Use cases for recording and projecting a run
//!
//! Orchestrates the pure domain services over a persisted session: every
//! mutation loads the session, applies the domain rule, and saves. Reads are
//! pull-based projections; nothing is cached or pushed.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::SessionStorePort;
use crate::domain::catalog::GameCatalog;
use crate::domain::entities::{Game, GameSession};
use crate::domain::services::{graph, mapping, resolver, visibility};
use crate::domain::value_objects::{GameId, LocationId, OptionId, SessionId};

/// One dropdown row of the selection grid
#[derive(Debug, Clone)]
pub struct ExitRow {
    pub exit_id: LocationId,
    pub exit_name: String,
    pub assigned: Option<LocationId>,
    pub choices: Vec<DestinationChoice>,
    /// Destinations already used by other exits; the UI disables or hides
    /// these for games without swap-on-duplicate
    pub unavailable: Vec<LocationId>,
}

/// A selectable destination with its display metadata
#[derive(Debug, Clone)]
pub struct DestinationChoice {
    pub id: LocationId,
    pub name: String,
    pub tags: Vec<String>,
}

/// Visible exits clustered by UI group, in order of first appearance
#[derive(Debug, Clone)]
pub struct ExitGroup {
    pub name: String,
    pub rows: Vec<ExitRow>,
}

/// Everything the selection UI needs to render one session
#[derive(Debug, Clone)]
pub struct SessionBoard {
    pub session_id: SessionId,
    pub game_id: GameId,
    pub start_unselected: bool,
    pub allow_swap_on_duplicate: bool,
    pub hide_disabled_options: bool,
    pub groups: Vec<ExitGroup>,
}

/// Composed graph text plus whether the map panel should be shown
#[derive(Debug, Clone)]
pub struct SessionGraph {
    pub graph: String,
    pub show_map: bool,
}

pub struct TrackerService {
    catalog: Arc<GameCatalog>,
    store: Arc<dyn SessionStorePort>,
}

impl TrackerService {
    pub fn new(catalog: Arc<GameCatalog>, store: Arc<dyn SessionStorePort>) -> Self {
        Self { catalog, store }
    }

    async fn require_session(&self, id: SessionId) -> Result<GameSession> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Session not found: {}", id))
    }

    /// Record that `exit_id` leads to `destination` (or clear the slot).
    ///
    /// Legality is advisory: the UI only offers ids from
    /// [`Self::valid_destinations`], but the write path does not re-check.
    #[instrument(skip(self), fields(session_id = %session_id, exit_id = %exit_id))]
    pub async fn set_mapping(
        &self,
        session_id: SessionId,
        exit_id: &LocationId,
        destination: Option<&LocationId>,
    ) -> Result<GameSession> {
        let mut session = self.require_session(session_id).await?;
        let Some(game) = self.catalog.get(&session.game_id) else {
            warn!(game_id = %session.game_id, "Mapping write for unknown game ignored");
            return Ok(session);
        };

        if mapping::apply_mapping(game, &mut session, exit_id, destination) {
            session.touch();
            self.store
                .save(&session)
                .await
                .context("Failed to persist mapping change")?;
            debug!(
                destination = destination.map(|d| d.as_str()).unwrap_or("<cleared>"),
                "Updated mapping"
            );
        }
        Ok(session)
    }

    /// Select a value for a game option. Visibility and legality are derived
    /// at read time, so nothing else is recomputed here.
    #[instrument(skip(self), fields(session_id = %session_id, option_id = %option_id))]
    pub async fn set_option(
        &self,
        session_id: SessionId,
        option_id: &OptionId,
        value: &str,
    ) -> Result<GameSession> {
        let mut session = self.require_session(session_id).await?;
        session
            .selected_options
            .insert(option_id.clone(), value.to_string());
        session.touch();
        self.store
            .save(&session)
            .await
            .context("Failed to persist option change")?;
        Ok(session)
    }

    /// Restore the default assignment, respecting currently-active options
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn reset_session(&self, session_id: SessionId) -> Result<GameSession> {
        let mut session = self.require_session(session_id).await?;
        let Some(game) = self.catalog.get(&session.game_id) else {
            warn!(game_id = %session.game_id, "Reset for unknown game ignored");
            return Ok(session);
        };

        mapping::reset(game, &mut session);
        session.touch();
        self.store
            .save(&session)
            .await
            .context("Failed to persist reset session")?;
        Ok(session)
    }

    /// Legal destinations for one exit under the session's current options
    pub async fn valid_destinations(
        &self,
        session_id: SessionId,
        exit_id: &LocationId,
    ) -> Result<Vec<LocationId>> {
        let session = self.require_session(session_id).await?;
        let Some(game) = self.catalog.get(&session.game_id) else {
            return Ok(Vec::new());
        };
        Ok(resolver::valid_destinations(
            game,
            exit_id,
            &session.selected_options,
        ))
    }

    /// The full dropdown-grid model for a session
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn board(&self, session_id: SessionId) -> Result<SessionBoard> {
        let session = self.require_session(session_id).await?;
        let Some(game) = self.catalog.get(&session.game_id) else {
            warn!(game_id = %session.game_id, "Board requested for unknown game");
            return Ok(SessionBoard {
                session_id,
                game_id: session.game_id.clone(),
                start_unselected: false,
                allow_swap_on_duplicate: false,
                hide_disabled_options: false,
                groups: Vec::new(),
            });
        };

        Ok(SessionBoard {
            session_id,
            game_id: game.id.clone(),
            start_unselected: game.config.start_unselected,
            allow_swap_on_duplicate: game.config.allow_swap_on_duplicate,
            hide_disabled_options: game.config.hide_disabled_options,
            groups: Self::build_groups(game, &session),
        })
    }

    /// The composed graph description plus map visibility
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn graph(&self, session_id: SessionId) -> Result<SessionGraph> {
        let session = self.require_session(session_id).await?;
        let Some(game) = self.catalog.get(&session.game_id) else {
            warn!(game_id = %session.game_id, "Graph requested for unknown game");
            return Ok(SessionGraph {
                graph: String::new(),
                show_map: false,
            });
        };

        Ok(SessionGraph {
            graph: graph::compose_graph(game, &session),
            show_map: visibility::map_visibility(game, &session),
        })
    }

    /// Cluster visible exits by UI group, preserving order of first
    /// appearance, and resolve each exit's destination choices.
    fn build_groups(game: &Game, session: &GameSession) -> Vec<ExitGroup> {
        const DEFAULT_GROUP: &str = "All Exits";

        let mut groups: Vec<ExitGroup> = Vec::new();
        for exit in visibility::visible_exits(game, session) {
            let group_name = exit.ui_group.as_deref().unwrap_or(DEFAULT_GROUP);

            let choices = resolver::valid_destinations(game, &exit.id, &session.selected_options)
                .into_iter()
                .filter_map(|id| {
                    // a choice referencing no known location is silently
                    // dropped rather than rendered without a name
                    game.location(&id).map(|location| DestinationChoice {
                        id,
                        name: location.name.clone(),
                        tags: location.tags.clone(),
                    })
                })
                .collect();

            let unavailable = if game.config.allow_swap_on_duplicate {
                Vec::new()
            } else {
                visibility::taken_destinations(session, &exit.id)
            };

            let row = ExitRow {
                exit_id: exit.id.clone(),
                exit_name: exit.name.clone(),
                assigned: session.destination_of(&exit.id).cloned(),
                choices,
                unavailable,
            };

            match groups.iter_mut().find(|g| g.name == group_name) {
                Some(group) => group.rows.push(row),
                None => groups.push(ExitGroup {
                    name: group_name.to_string(),
                    rows: vec![row],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntranceRestriction, GameConfig, LocationReference};
    use crate::domain::services::mapping as mapping_rules;

    fn grouped_game() -> Game {
        Game::new("g", "Game")
            .with_exits(vec![
                LocationReference::new("a1", "A One").with_ui_group("Area A"),
                LocationReference::new("b1", "B One").with_ui_group("Area B"),
                LocationReference::new("a2", "A Two").with_ui_group("Area A"),
                LocationReference::new("free", "Free"),
            ])
            .with_entrances(vec![
                LocationReference::new("a1", "A One"),
                LocationReference::new("b1", "B One"),
                LocationReference::new("a2", "A Two"),
                LocationReference::new("free", "Free"),
            ])
            .with_restrictions(vec![EntranceRestriction::new("g", "a1", ["b1", "a2"])])
    }

    fn session_for(game: &Game) -> GameSession {
        let mut session = GameSession::new(game.id.clone(), "run");
        session.selected_options = mapping_rules::initial_options(game);
        session
    }

    #[test]
    fn groups_preserve_order_of_first_appearance() {
        let game = grouped_game();
        let session = session_for(&game);
        let groups = TrackerService::build_groups(&game, &session);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Area A", "Area B", "All Exits"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[0].rows[1].exit_id, LocationId::new("a2"));
    }

    #[test]
    fn rows_carry_restricted_choices() {
        let game = grouped_game();
        let session = session_for(&game);
        let groups = TrackerService::build_groups(&game, &session);

        let a1 = &groups[0].rows[0];
        let choice_ids: Vec<&str> = a1.choices.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(choice_ids, ["b1", "a2"]);

        // unrestricted exits see every entrance
        let free = &groups[2].rows[0];
        assert_eq!(free.choices.len(), game.entrances.len());
    }

    #[test]
    fn unavailable_lists_taken_destinations_for_non_swap_games() {
        let game = grouped_game();
        let mut session = session_for(&game);
        mapping_rules::apply_mapping(&game, &mut session, &"b1".into(), Some(&"free".into()));

        let groups = TrackerService::build_groups(&game, &session);
        let a1 = &groups[0].rows[0];
        assert_eq!(a1.unavailable, vec![LocationId::new("free")]);
    }

    #[test]
    fn swap_games_disable_nothing() {
        let mut game = grouped_game();
        game.config = GameConfig {
            allow_swap_on_duplicate: true,
            ..GameConfig::default()
        };
        let mut session = session_for(&game);
        mapping_rules::apply_mapping(&game, &mut session, &"b1".into(), Some(&"free".into()));

        let groups = TrackerService::build_groups(&game, &session);
        assert!(groups.iter().all(|g| g.rows.iter().all(|r| r.unavailable.is_empty())));
    }
}
