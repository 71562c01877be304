//! Music catalog endpoint.

use axum::{Json, extract::State};

use crate::{models::music::MusicOverview, state::AppState};

/// `GET /api/music` - artist, albums and top tracks. Never fails; falls back
/// to demo content.
pub async fn overview(State(state): State<AppState>) -> Json<MusicOverview> {
    Json(state.catalog.overview().await)
}
