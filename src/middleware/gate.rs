//! Request gate middleware.
//!
//! This middleware intercepts every request to:
//! 1. Classify the path as public, admin or ordinary site
//! 2. For admin paths, verify the `admin_token` cookie
//! 3. Redirect admin UI requests without a valid credential to the login page
//! 4. Reject admin API requests without a valid credential with HTTP 401
//!
//! The gate keeps no state between requests.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::services::credential_service::{self, Verdict};
use crate::state::AppState;

/// Admin UI root.
pub const ADMIN_UI_ROOT: &str = "/studio-portal-2024";

/// Where unauthenticated admin UI requests are sent.
pub const LOGIN_PAGE: &str = "/studio-portal-2024/login";

/// Prefixes that pass without a credential.
///
/// `/api/upload` and `/api/admin/content` verify the credential in their
/// handlers for the operations that need it.
const PUBLIC_PREFIXES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/logout",
    "/api/test-env",
    "/api/admin/content",
    "/api/events",
    "/api/sponsors",
    "/api/upload",
    "/api/cookies/preferences",
    "/api/music",
    "/privacy-policy",
    "/terms-of-use",
    "/cookie-policy",
    "/favicon.ico",
    "/uploads",
    LOGIN_PAGE,
];

const ADMIN_UI_PREFIXES: &[&str] = &[ADMIN_UI_ROOT];

const ADMIN_API_PREFIXES: &[&str] = &["/api/admin"];

/// How the gate treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Explicitly public, never checked.
    Public,
    AdminUi,
    AdminApi,
    /// Everything else: the public website.
    Site,
}

/// Classify a request path.
///
/// Public prefixes win over admin prefixes, so `/studio-portal-2024/login`
/// and `/api/admin/content` are public.
pub fn classify(path: &str) -> PathClass {
    if PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        PathClass::Public
    } else if ADMIN_UI_PREFIXES.iter().any(|p| path.starts_with(p)) {
        PathClass::AdminUi
    } else if ADMIN_API_PREFIXES.iter().any(|p| path.starts_with(p)) {
        PathClass::AdminApi
    } else {
        PathClass::Site
    }
}

/// Request gate middleware function.
///
/// # Flow
///
/// 1. Classify `request.uri().path()`
/// 2. `Public` and `Site` requests go straight to the next handler
/// 3. Admin requests: read `admin_token` from the `Cookie` header and verify it
/// 4. Verified: call next handler
/// 5. Not verified: redirect (admin UI) or 401 (admin API)
pub async fn request_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let class = classify(&path);
    tracing::debug!(%path, method = %request.method(), ?class, "request gate");

    if matches!(class, PathClass::Public | PathClass::Site) {
        return next.run(request).await;
    }

    let token = credential_service::token_from_headers(request.headers());
    match state.credentials.verify(token.as_deref()) {
        Verdict::Authorized => next.run(request).await,
        Verdict::Unauthorized if class == PathClass::AdminUi => {
            tracing::debug!(%path, "no valid admin credential, redirecting to login");
            Redirect::to(LOGIN_PAGE).into_response()
        }
        Verdict::Unauthorized => AppError::Unauthorized.into_response(),
    }
}
