//! Music catalog models.
//!
//! This module defines:
//! - Wire types for the subset of the Spotify Web API the site reads
//! - `MusicOverview`: the response body of `GET /api/music`

use serde::{Deserialize, Serialize};

/// Where a `MusicOverview` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Spotify,
    Fallback,
}

/// Client-credentials token response.
#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub items: Vec<Album>,
}

#[derive(Debug, Deserialize)]
pub struct TopTracks {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Body of `GET /api/music`.
#[derive(Debug, Clone, Serialize)]
pub struct MusicOverview {
    pub source: CatalogSource,
    pub artist: Artist,
    pub albums: Vec<Album>,
    pub top_tracks: Vec<Track>,
}
