//! Music catalog - artist data from the Spotify Web API.
//!
//! Uses the client-credentials flow. When credentials are not configured,
//! or any upstream call fails, the built-in demo overview is returned so
//! public pages never show an error.

use std::time::Duration;

use crate::models::music::{
    AccessToken, Album, AlbumPage, Artist, CatalogSource, Followers, MusicOverview, TopTracks,
    Track,
};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

/// Failures talking to the catalog. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog credentials are not configured")]
    CredentialsMissing,

    #[error("no artist configured")]
    ArtistMissing,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct MusicCatalog {
    client: reqwest::Client,
    credentials: Option<(String, String)>,
    artist_id: Option<String>,
}

impl MusicCatalog {
    pub fn new(credentials: Option<(String, String)>, artist_id: Option<String>) -> Self {
        // Upstream calls are bounded so a slow catalog cannot hold up public pages.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            credentials,
            artist_id: artist_id.filter(|id| !id.is_empty()),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Artist profile, albums and top tracks, or the demo fallback.
    pub async fn overview(&self) -> MusicOverview {
        match self.fetch_overview().await {
            Ok(overview) => overview,
            Err(CatalogError::CredentialsMissing) => {
                tracing::debug!("catalog credentials missing, serving fallback music content");
                fallback_overview()
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog unavailable, serving fallback music content");
                fallback_overview()
            }
        }
    }

    async fn fetch_overview(&self) -> Result<MusicOverview, CatalogError> {
        let token = self.access_token().await?;
        let artist_id = self.artist_id.as_deref().ok_or(CatalogError::ArtistMissing)?;

        let artist: Artist = self
            .get(&format!("{API_BASE}/artists/{artist_id}"), &token)
            .await?;
        let albums: AlbumPage = self
            .get(
                &format!(
                    "{API_BASE}/artists/{artist_id}/albums?include_groups=album,single&market=US&limit=10"
                ),
                &token,
            )
            .await?;
        let top: TopTracks = self
            .get(
                &format!("{API_BASE}/artists/{artist_id}/top-tracks?market=US"),
                &token,
            )
            .await?;

        Ok(MusicOverview {
            source: CatalogSource::Spotify,
            artist,
            albums: albums.items,
            top_tracks: top.tracks,
        })
    }

    async fn access_token(&self) -> Result<String, CatalogError> {
        let (client_id, client_secret) =
            self.credentials.as_ref().ok_or(CatalogError::CredentialsMissing)?;

        let token: AccessToken = self
            .client
            .post(TOKEN_URL)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(token.access_token)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, CatalogError> {
        Ok(self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Demo content shown when the catalog is unavailable.
pub fn fallback_overview() -> MusicOverview {
    let album = |id: &str, name: &str, album_type: &str, release_date: &str, total_tracks| Album {
        id: id.to_string(),
        name: name.to_string(),
        album_type: album_type.to_string(),
        release_date: release_date.to_string(),
        total_tracks,
        images: Vec::new(),
    };
    let track = |id: &str, name: &str, duration_ms| Track {
        id: id.to_string(),
        name: name.to_string(),
        duration_ms,
        preview_url: None,
        album: None,
    };

    MusicOverview {
        source: CatalogSource::Fallback,
        artist: Artist {
            id: "demo".to_string(),
            name: "Featured Artist".to_string(),
            genres: vec!["house".to_string(), "techno".to_string()],
            followers: Followers { total: 0 },
            popularity: 0,
            images: Vec::new(),
        },
        albums: vec![
            album("demo-album-1", "Midnight Sessions", "album", "2024-01-01", 10),
            album("demo-single-1", "Afterglow", "single", "2024-06-01", 1),
        ],
        top_tracks: vec![
            track("demo-track-1", "Afterglow", 215_000),
            track("demo-track-2", "Midnight Drive", 242_000),
        ],
    }
}
