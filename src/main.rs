//! Artist Site Server - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables (refuses to start a
//!    production deployment without its secrets)
//! 2. Check the content document can be read
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use artist_site_server::{build_router, config::Config, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(env = ?config.app_env, "Configuration loaded");

    if config.admin_password.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("ADMIN_PASSWORD not set, admin login is disabled");
    }
    if config.spotify_credentials().is_none() {
        tracing::info!("Spotify credentials not set, music pages use fallback content");
    }

    let state = AppState::from_config(config);

    // A missing or broken document is reported but does not stop the public site
    match state.content.read().await {
        Ok(_) => tracing::info!(path = %state.content.path().display(), "Content document loaded"),
        Err(e) => tracing::error!(
            path = %state.content.path().display(),
            error = %e,
            "Content document unavailable"
        ),
    }

    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
