//! App state routes - Which game and session the tracker is focused on

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::outbound::AppSelection;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub current_game_id: String,
    pub current_session_id: Option<String>,
}

impl From<AppSelection> for SelectionResponse {
    fn from(selection: AppSelection) -> Self {
        Self {
            current_game_id: selection.current_game_id.to_string(),
            current_session_id: selection.current_session_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetSelectionRequest {
    pub game_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Get the current game/session selection
pub async fn get_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionResponse>, (StatusCode, String)> {
    let selection = state
        .session_service
        .selection()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(SelectionResponse::from(selection)))
}

/// Switch the current game/session selection
pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetSelectionRequest>,
) -> Result<Json<SelectionResponse>, (StatusCode, String)> {
    let session_id = match req.session_id {
        Some(raw) => Some(
            Uuid::parse_str(&raw)
                .map(SessionId::from_uuid)
                .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?,
        ),
        None => None,
    };

    let selection = state
        .session_service
        .set_selection(req.game_id.as_str().into(), session_id)
        .await
        .map_err(|e| {
            if e.to_string().contains("not found") {
                (StatusCode::NOT_FOUND, e.to_string())
            } else if e.to_string().contains("does not belong") {
                (StatusCode::BAD_REQUEST, e.to_string())
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        })?;

    Ok(Json(SelectionResponse::from(selection)))
}
