//! Game catalog API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::{Game, GameOption};
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct GameSummaryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Game> for GameSummaryResponse {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.to_string(),
            name: game.name.clone(),
            description: game.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameConfigResponse {
    pub show_map: bool,
    pub start_unselected: bool,
    pub allow_swap_on_duplicate: bool,
    pub hide_disabled_options: bool,
}

#[derive(Debug, Serialize)]
pub struct GameOptionValueResponse {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GameOptionResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<GameOptionValueResponse>,
    pub default_value: Option<String>,
}

impl From<&GameOption> for GameOptionResponse {
    fn from(option: &GameOption) -> Self {
        Self {
            id: option.id.to_string(),
            name: option.name.clone(),
            description: option.description.clone(),
            values: option
                .values
                .iter()
                .map(|v| GameOptionValueResponse {
                    id: v.id.clone(),
                    description: v.description.clone(),
                })
                .collect(),
            default_value: option.default_selection().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameDetailResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub config: GameConfigResponse,
    pub options: Vec<GameOptionResponse>,
}

impl From<&Game> for GameDetailResponse {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.to_string(),
            name: game.name.clone(),
            description: game.description.clone(),
            config: GameConfigResponse {
                show_map: game.config.show_map,
                start_unselected: game.config.start_unselected,
                allow_swap_on_duplicate: game.config.allow_swap_on_duplicate,
                hide_disabled_options: game.config.hide_disabled_options,
            },
            options: game.options.iter().map(GameOptionResponse::from).collect(),
        }
    }
}

/// List all registered games
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Vec<GameSummaryResponse>> {
    Json(
        state
            .catalog
            .games()
            .iter()
            .map(GameSummaryResponse::from)
            .collect(),
    )
}

/// Get one game's definition (config and options)
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GameDetailResponse>, (StatusCode, String)> {
    let game = state
        .catalog
        .get(&id.as_str().into())
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Game not found".to_string()))?;

    Ok(Json(GameDetailResponse::from(game)))
}
