//! Request bodies accepted by the section editors.
//!
//! Single-record sections take partial updates: any field left out keeps its
//! current value. List entries are sent whole, without an id on creation.

use serde::Deserialize;
use serde_json::Map;

use crate::models::content::{Event, Social, Sponsor};

/// `PUT /api/admin/hero`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub background_video: Option<String>,
}

/// `PUT /api/admin/about`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUpdate {
    pub title: Option<String>,
    pub bio: Option<String>,
    pub about_image: Option<String>,
}

/// `PUT /api/admin/contact`
///
/// `social` replaces the links that are present in it; links it leaves out
/// keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct ContactUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub management: Option<String>,
    pub booking: Option<String>,
    pub press: Option<String>,
    pub social: Option<SocialUpdate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SocialUpdate {
    pub spotify: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub tiktok: Option<String>,
}

impl SocialUpdate {
    pub fn apply(self, social: &mut Social) {
        let fields = [
            (self.spotify, &mut social.spotify),
            (self.instagram, &mut social.instagram),
            (self.youtube, &mut social.youtube),
            (self.twitter, &mut social.twitter),
            (self.facebook, &mut social.facebook),
            (self.tiktok, &mut social.tiktok),
        ];
        for (update, slot) in fields {
            if let Some(value) = update {
                *slot = value;
            }
        }
    }
}

/// Event body for add and edit. The id comes from the server or the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub location: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl EventInput {
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            description: self.description,
            location: non_empty(self.location),
            link: non_empty(self.link),
            image: non_empty(self.image),
            extra: Map::new(),
        }
    }
}

/// Sponsor body for add and edit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SponsorInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub logo: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub color: String,
}

impl SponsorInput {
    pub fn into_sponsor(self, id: String) -> Sponsor {
        Sponsor {
            id,
            name: self.name,
            description: self.description,
            logo: non_empty(self.logo),
            link: self.link,
            color: self.color,
            extra: Map::new(),
        }
    }
}

/// Forms submit empty strings for untouched optional inputs.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
