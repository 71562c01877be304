//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::services::asset_service::AssetUploader;
use crate::services::content_store::ContentStore;
use crate::services::credential_service::CredentialService;
use crate::services::music_catalog::MusicCatalog;
use crate::services::rate_limiter::LoginRateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<CredentialService>,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub content: ContentStore,
    pub uploads: AssetUploader,
    pub catalog: MusicCatalog,
}

impl AppState {
    /// Wire every service from a validated configuration.
    pub fn from_config(config: Config) -> Self {
        let credentials =
            CredentialService::new(&config.signing_secret(), config.admin_password.clone());
        let catalog =
            MusicCatalog::new(config.spotify_credentials(), config.spotify_artist_id.clone());

        Self {
            credentials: Arc::new(credentials),
            login_limiter: Arc::new(LoginRateLimiter::new(config.login_limiter_capacity)),
            content: ContentStore::new(config.content_path.clone()),
            uploads: AssetUploader::new(config.upload_dir.clone()),
            catalog,
            config: Arc::new(config),
        }
    }
}
