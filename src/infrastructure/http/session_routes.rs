//! Session API routes - CRUD plus the tracking operations

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::tracker_service::{
    DestinationChoice, ExitGroup, ExitRow, SessionBoard, SessionGraph,
};
use crate::domain::entities::GameSession;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub selected_options: HashMap<String, String>,
    pub exit_to_entrance_map: HashMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GameSession> for SessionResponse {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id.to_string(),
            game_id: session.game_id.to_string(),
            name: session.name,
            selected_options: session
                .selected_options
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            exit_to_entrance_map: session
                .exit_to_entrance_map
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
}

impl From<DestinationChoice> for ChoiceResponse {
    fn from(choice: DestinationChoice) -> Self {
        Self {
            id: choice.id.to_string(),
            name: choice.name,
            tags: choice.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExitRowResponse {
    pub exit_id: String,
    pub exit_name: String,
    pub assigned: Option<String>,
    pub choices: Vec<ChoiceResponse>,
    pub unavailable: Vec<String>,
}

impl From<ExitRow> for ExitRowResponse {
    fn from(row: ExitRow) -> Self {
        Self {
            exit_id: row.exit_id.to_string(),
            exit_name: row.exit_name,
            assigned: row.assigned.map(|id| id.to_string()),
            choices: row.choices.into_iter().map(ChoiceResponse::from).collect(),
            unavailable: row.unavailable.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExitGroupResponse {
    pub name: String,
    pub rows: Vec<ExitRowResponse>,
}

impl From<ExitGroup> for ExitGroupResponse {
    fn from(group: ExitGroup) -> Self {
        Self {
            name: group.name,
            rows: group.rows.into_iter().map(ExitRowResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub session_id: String,
    pub game_id: String,
    pub start_unselected: bool,
    pub allow_swap_on_duplicate: bool,
    pub hide_disabled_options: bool,
    pub groups: Vec<ExitGroupResponse>,
}

impl From<SessionBoard> for BoardResponse {
    fn from(board: SessionBoard) -> Self {
        Self {
            session_id: board.session_id.to_string(),
            game_id: board.game_id.to_string(),
            start_unselected: board.start_unselected,
            allow_swap_on_duplicate: board.allow_swap_on_duplicate,
            hide_disabled_options: board.hide_disabled_options,
            groups: board.groups.into_iter().map(ExitGroupResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub graph: String,
    pub show_map: bool,
}

impl From<SessionGraph> for GraphResponse {
    fn from(graph: SessionGraph) -> Self {
        Self {
            graph: graph.graph,
            show_map: graph.show_map,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetMappingRequest {
    pub exit_id: String,
    /// Absent, null, or empty clears the slot
    #[serde(default)]
    pub destination_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetOptionRequest {
    pub option_id: String,
    pub value: String,
}

fn parse_session_id(raw: &str) -> Result<SessionId, (StatusCode, String)> {
    Uuid::parse_str(raw)
        .map(SessionId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))
}

fn map_service_error(e: anyhow::Error) -> (StatusCode, String) {
    let message = e.to_string();
    if message.contains("not found") {
        (StatusCode::NOT_FOUND, message)
    } else if message.contains("cannot") || message.contains("does not belong") {
        (StatusCode::BAD_REQUEST, message)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// List sessions tracked for a game
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<SessionResponse>>, (StatusCode, String)> {
    let sessions = state
        .session_service
        .list_sessions(&game_id.as_str().into())
        .await
        .map_err(map_service_error)?;

    Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}

/// Create a session for a game
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, String)> {
    let session = state
        .session_service
        .create_session(&game_id.as_str().into(), &req.name)
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// Get a session by ID
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .session_service
        .get_session(session_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Session not found".to_string()))?;

    Ok(Json(SessionResponse::from(session)))
}

/// Rename a session
pub async fn rename_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RenameSessionRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .session_service
        .rename_session(session_id, &req.name)
        .await
        .map_err(map_service_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Delete a session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    state
        .session_service
        .delete_session(session_id)
        .await
        .map_err(map_service_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record one exit→destination assignment (or clear it)
pub async fn set_mapping(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetMappingRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let destination = req
        .destination_id
        .filter(|d| !d.is_empty())
        .map(|d| d.as_str().into());

    let session = state
        .tracker_service
        .set_mapping(session_id, &req.exit_id.as_str().into(), destination.as_ref())
        .await
        .map_err(map_service_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Select a value for a game option
pub async fn set_option(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetOptionRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .tracker_service
        .set_option(session_id, &req.option_id.as_str().into(), &req.value)
        .await
        .map_err(map_service_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Reset a session's assignment to its defaults
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .tracker_service
        .reset_session(session_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// The dropdown-grid model for a session
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BoardResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let board = state
        .tracker_service
        .board(session_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(BoardResponse::from(board)))
}

/// The composed graph text for a session
pub async fn get_graph(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GraphResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let graph = state
        .tracker_service
        .graph(session_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(GraphResponse::from(graph)))
}

/// Legal destinations for one exit under the session's current options
pub async fn get_valid_destinations(
    State(state): State<Arc<AppState>>,
    Path((id, exit_id)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let destinations = state
        .tracker_service
        .valid_destinations(session_id, &exit_id.as_str().into())
        .await
        .map_err(map_service_error)?;

    Ok(Json(destinations.into_iter().map(|d| d.to_string()).collect()))
}
