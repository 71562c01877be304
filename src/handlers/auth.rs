//! Admin login and logout handlers.
//!
//! This module implements:
//! - POST /api/auth/login - Exchange the admin password for a credential cookie
//! - POST /api/auth/logout - Clear the credential cookie

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    error::AppError,
    models::credential::LoginRequest,
    services::{
        credential_service::{self, PasswordCheck},
        rate_limiter::Decision,
    },
    state::AppState,
};

/// Log in as admin.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Request Body
///
/// ```json
/// { "password": "..." }
/// ```
///
/// # Order of checks
///
/// 1. Count the attempt for the caller identity; over the limit → 429
///    without looking at the password
/// 2. Malformed body → 400
/// 3. No admin password configured → 500
/// 4. Wrong password → 401
/// 5. Issue a 24-hour credential in an HTTP-only `admin_token` cookie → 200
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let identity = credential_service::caller_identity(&headers);
    if state.login_limiter.register(&identity) == Decision::Limited {
        tracing::warn!(%identity, "login rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    let request: LoginRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::Validation("Invalid login request".to_string()))?;

    match state.credentials.check_password(&request.password) {
        PasswordCheck::Unconfigured => {
            return Err(AppError::Configuration(
                "Admin password not set".to_string(),
            ));
        }
        PasswordCheck::Mismatch => {
            tracing::info!(%identity, "admin login failed");
            return Err(AppError::InvalidPassword);
        }
        PasswordCheck::Match => {}
    }

    let token = state
        .credentials
        .issue()
        .map_err(|e| AppError::Configuration(format!("failed to sign credential: {e}")))?;

    let secure = credential_service::is_https(&headers);
    tracing::info!(%identity, secure, "admin login succeeded");

    Ok((
        [(SET_COOKIE, credential_service::session_cookie(&token, secure))],
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// Log out by expiring the credential cookie.
///
/// The token itself stays valid until it expires; only the browser copy is
/// removed.
pub async fn logout(headers: HeaderMap) -> impl IntoResponse {
    let secure = credential_service::is_https(&headers);
    (
        [(SET_COOKIE, credential_service::cleared_cookie(secure))],
        Json(json!({ "success": true })),
    )
}
