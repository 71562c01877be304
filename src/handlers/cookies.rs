//! Cookie preference endpoints.
//!
//! Consent is kept client-side; the server only acknowledges actions.

use axum::{Json, body::Bytes};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct PreferenceAction {
    action: String,
}

/// `GET /api/cookies/preferences`
pub async fn get_preferences() -> Json<Value> {
    Json(json!({
        "message": "Privacy-first cookie management active",
        "features": [
            "Daily data wiping",
            "Essential-first approach",
            "Non-intrusive consent",
            "User-controlled preferences"
        ]
    }))
}

/// `POST /api/cookies/preferences`
///
/// Accepts `{"action": "wipe"}` or `{"action": "update_preferences", "preferences": {...}}`.
pub async fn update_preferences(body: Bytes) -> Result<Json<Value>, AppError> {
    let request: PreferenceAction = serde_json::from_slice(&body)
        .map_err(|_| AppError::Validation("Invalid request".to_string()))?;

    let message = match request.action.as_str() {
        "wipe" => "Data wiping initiated",
        "update_preferences" => "Preferences updated",
        _ => return Err(AppError::InvalidAction),
    };

    Ok(Json(json!({ "success": true, "message": message })))
}
