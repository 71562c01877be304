//! Whole-document content handlers.
//!
//! This module implements:
//! - GET /api/admin/content - Read the full content document (public)
//! - POST /api/admin/content - Replace the full content document (admin)

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::content::ContentDocument,
    services::credential_service::{self, Verdict},
    state::AppState,
};

/// Return the whole content document.
///
/// This path is on the gate's public list, so anyone can read it.
pub async fn get_content(State(state): State<AppState>) -> Result<Json<ContentDocument>, AppError> {
    let document = state.content.read().await?;
    Ok(Json(document))
}

/// Replace the whole content document.
///
/// # Authentication
///
/// The gate lets this path through, so the credential is checked here.
///
/// # Concurrency
///
/// The submitted document replaces the file in full. Two editors who loaded
/// the same version and save one after the other lose the first save.
pub async fn replace_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let token = credential_service::token_from_headers(&headers);
    if state.credentials.verify(token.as_deref()) != Verdict::Authorized {
        return Err(AppError::Unauthorized);
    }

    let document: ContentDocument = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid content document: {e}")))?;

    state.content.write(&document).await?;
    tracing::info!("content document replaced");

    Ok(Json(json!({ "success": true })))
}
