//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::Roster,
    infrastructure::dto::http::{PresenceDetailDto, PresenceResponse},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of connected sessions
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<PresenceResponse> {
    let members = state.connect_user_usecase.build_presence_list().await;

    // Domain Model から DTO への変換
    let details: Vec<PresenceDetailDto> =
        members.into_iter().map(PresenceDetailDto::from).collect();

    Json(PresenceResponse {
        count: details.len(),
        members: details,
    })
}

/// Debug endpoint to get current roster state (for testing purposes)
pub async fn debug_roster(State(state): State<Arc<AppState>>) -> Json<Roster> {
    let roster = state.repository.get_roster().await;
    Json(roster)
}
