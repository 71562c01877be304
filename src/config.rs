//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct,
//! then checks that the secrets required for the current environment are present.

use std::path::PathBuf;

use serde::Deserialize;

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Production,
    #[default]
    Development,
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `APP_ENV` (optional): `production` or `development`, defaults to development
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ADMIN_PASSWORD` (required in production): shared admin password
/// - `JWT_SECRET` (required in production): credential signing secret
/// - `CONTENT_PATH` (optional): site content JSON file
/// - `PUBLIC_DIR` / `UPLOAD_DIR` (optional): static root and upload directory
/// - `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_ARTIST_ID` (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app_env: AppEnv,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub admin_password: Option<String>,

    pub jwt_secret: Option<String>,

    #[serde(default = "default_content_path")]
    pub content_path: PathBuf,

    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    pub spotify_client_id: Option<String>,

    pub spotify_client_secret: Option<String>,

    pub spotify_artist_id: Option<String>,

    /// Maximum number of caller identities the login limiter tracks at once.
    #[serde(default = "default_limiter_capacity")]
    pub login_limiter_capacity: usize,
}

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("{0} environment variable is required in production")]
    MissingSecret(&'static str),
}

fn default_port() -> u16 {
    3000
}

fn default_content_path() -> PathBuf {
    PathBuf::from("data/site-content.json")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("public/uploads")
}

fn default_limiter_capacity() -> usize {
    10_000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Environment variable values cannot be parsed into expected types
    /// - A secret required in production is missing
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // Field names are converted automatically: admin_password -> ADMIN_PASSWORD
        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Refuse to run a production deployment without its secrets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_production() {
            return Ok(());
        }
        if is_blank(&self.admin_password) {
            return Err(ConfigError::MissingSecret("ADMIN_PASSWORD"));
        }
        if is_blank(&self.jwt_secret) {
            return Err(ConfigError::MissingSecret("JWT_SECRET"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Signing secret for credentials.
    ///
    /// Development deployments without `JWT_SECRET` get a random secret that
    /// lives only as long as the process, so restarting logs everyone out.
    pub fn signing_secret(&self) -> Vec<u8> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                tracing::warn!("JWT_SECRET not set, using an ephemeral signing secret");
                let bytes: [u8; 32] = rand::random();
                hex::encode(bytes).into_bytes()
            }
        }
    }

    /// Both halves of the catalog client credentials, if configured.
    pub fn spotify_credentials(&self) -> Option<(String, String)> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.clone(), secret.clone()))
            }
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: AppEnv::Development,
            server_port: default_port(),
            admin_password: None,
            jwt_secret: None,
            content_path: default_content_path(),
            public_dir: default_public_dir(),
            upload_dir: default_upload_dir(),
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_artist_id: None,
            login_limiter_capacity: default_limiter_capacity(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
