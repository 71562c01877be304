//! Read-only public API endpoints.
//!
//! - GET /api/events
//! - GET /api/sponsors
//! - GET /api/test-env
//!
//! The list endpoints always answer with their list key so public pages can
//! render an empty section instead of an error.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn list_events(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.content.read().await {
        Ok(document) => (StatusCode::OK, Json(json!({ "events": document.events }))),
        Err(e) => {
            tracing::error!(error = %e, "failed to load events");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "events": [] })),
            )
        }
    }
}

pub async fn list_sponsors(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.content.read().await {
        Ok(document) => (
            StatusCode::OK,
            Json(json!({ "sponsors": document.sponsors })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to load sponsors");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "sponsors": [] })),
            )
        }
    }
}

/// Which secrets are configured. Reports presence only.
pub async fn test_env(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "hasAdminPassword": state.credentials.has_admin_password(),
        "hasJwtSecret": state.config.jwt_secret.as_deref().is_some_and(|s| !s.is_empty()),
    }))
}
