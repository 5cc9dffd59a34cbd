//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{LeaderboardDto, PlazaStateDto},
    ui::state::AppState,
};
use plaza_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Summary of who is online and what the shared registries hold
pub async fn get_plaza_state(State(state): State<Arc<AppState>>) -> Json<PlazaStateDto> {
    let overview = state.get_plaza_state_usecase.overview().await;

    // Domain Model から DTO への変換
    Json(PlazaStateDto {
        online: overview.sessions.len(),
        players: overview.sessions.into_iter().map(Into::into).collect(),
        houses: overview.houses.into_iter().map(Into::into).collect(),
        art_count: overview.art_count,
        chat_count: overview.chat_count,
        checked_at: timestamp_to_rfc3339(overview.checked_at.value()),
    })
}

pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<LeaderboardDto> {
    let entries = state.get_plaza_state_usecase.leaderboard().await;
    Json(LeaderboardDto {
        entries: entries.into_iter().map(Into::into).collect(),
    })
}
