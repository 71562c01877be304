//! Liveness and content readiness probe.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// `readable` once the content document parses.
    pub content_store: &'static str,

    pub events: usize,
    pub sponsors: usize,

    /// Whether `/api/music` talks to the live catalog or serves fallback data.
    pub music_catalog: &'static str,

    pub timestamp: DateTime<Utc>,
}

/// `GET /health`
///
/// ```json
/// {
///   "status": "healthy",
///   "content_store": "readable",
///   "events": 3,
///   "sponsors": 1,
///   "music_catalog": "fallback",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// A missing or corrupt content document answers with the standard
/// `storage_error` response instead.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let document = state.content.read().await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        content_store: "readable",
        events: document.events.len(),
        sponsors: document.sponsors.len(),
        music_catalog: if state.catalog.has_credentials() {
            "spotify"
        } else {
            "fallback"
        },
        timestamp: Utc::now(),
    }))
}
