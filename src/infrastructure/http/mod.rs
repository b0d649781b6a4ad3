//! HTTP REST API routes

mod game_routes;
mod session_routes;
mod state_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use game_routes::*;
pub use session_routes::*;
pub use state_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Game catalog routes
        .route("/api/games", get(game_routes::list_games))
        .route("/api/games/{id}", get(game_routes::get_game))
        // Session CRUD routes
        .route(
            "/api/games/{game_id}/sessions",
            get(session_routes::list_sessions),
        )
        .route(
            "/api/games/{game_id}/sessions",
            post(session_routes::create_session),
        )
        .route("/api/sessions/{id}", get(session_routes::get_session))
        .route("/api/sessions/{id}", delete(session_routes::delete_session))
        .route(
            "/api/sessions/{id}/name",
            put(session_routes::rename_session),
        )
        // Tracking operations
        .route(
            "/api/sessions/{id}/mappings",
            post(session_routes::set_mapping),
        )
        .route(
            "/api/sessions/{id}/options",
            post(session_routes::set_option),
        )
        .route(
            "/api/sessions/{id}/reset",
            post(session_routes::reset_session),
        )
        // Projections
        .route("/api/sessions/{id}/board", get(session_routes::get_board))
        .route("/api/sessions/{id}/graph", get(session_routes::get_graph))
        .route(
            "/api/sessions/{id}/exits/{exit_id}/destinations",
            get(session_routes::get_valid_destinations),
        )
        // App selection
        .route("/api/state", get(state_routes::get_selection))
        .route("/api/state", put(state_routes::set_selection))
}
