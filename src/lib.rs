//! Artist site server.
//!
//! Backend for a single-artist promotional website with a password-gated
//! content panel. Public endpoints serve the site content; the admin panel
//! edits that content and uploads images.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: one JSON document on disk, replaced atomically on write
//! - **Authentication**: shared admin password, signed 24-hour JWT in an HTTP-only cookie
//! - **Authorization**: a request gate middleware in front of every route

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::upload::UPLOAD_BODY_LIMIT;
use crate::state::AppState;

/// Build the HTTP router with every route and middleware.
pub fn build_router(state: AppState) -> Router {
    // Section editors, reachable only through the request gate's admin check
    let admin_api = Router::new()
        .route("/api/admin/hero", put(handlers::editors::update_hero))
        .route("/api/admin/about", put(handlers::editors::update_about))
        .route("/api/admin/contact", put(handlers::editors::update_contact))
        .route(
            "/api/admin/services",
            put(handlers::editors::replace_services),
        )
        .route("/api/admin/events", post(handlers::editors::create_event))
        .route(
            "/api/admin/events/{id}",
            put(handlers::editors::update_event).delete(handlers::editors::delete_event),
        )
        .route(
            "/api/admin/sponsors",
            post(handlers::editors::create_sponsor),
        )
        .route(
            "/api/admin/sponsors/{id}",
            put(handlers::editors::update_sponsor).delete(handlers::editors::delete_sponsor),
        );

    let admin_ui = Router::new()
        .route("/studio-portal-2024", get(handlers::pages::admin_shell))
        .route("/studio-portal-2024/login", get(handlers::pages::login_page))
        .route(
            "/studio-portal-2024/{*section}",
            get(handlers::pages::admin_shell),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Authentication
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Content
        .route(
            "/api/admin/content",
            get(handlers::content::get_content).post(handlers::content::replace_content),
        )
        .route("/api/events", get(handlers::public::list_events))
        .route("/api/sponsors", get(handlers::public::list_sponsors))
        .route("/api/test-env", get(handlers::public::test_env))
        .route(
            "/api/cookies/preferences",
            get(handlers::cookies::get_preferences).post(handlers::cookies::update_preferences),
        )
        .route("/api/music", get(handlers::music::overview))
        .route(
            "/api/upload",
            post(handlers::upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .merge(admin_api)
        .merge(admin_ui)
        // Uploaded images and the rest of the static site
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .fallback_service(ServeDir::new(&state.config.public_dir))
        // The gate wraps every route above, fallback included
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::request_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
