//! Content document model.
//!
//! The whole editable state of the site lives in one JSON document. This
//! module defines its typed shape:
//! - `ContentDocument`: top-level document with one field per section
//! - `Hero`, `About`, `Contact`: single-record sections
//! - `Service`, `Event`, `Sponsor`: entries of the list sections
//!
//! Field names are camelCase on disk. Optional fields that are absent stay
//! absent when the document is written back. Unknown keys, at the top level
//! or inside any section or list entry, are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The single JSON record holding all editable site content.
///
/// # JSON Example
///
/// ```json
/// {
///   "hero": { "title": "...", "subtitle": "..." },
///   "about": { "title": "...", "bio": "..." },
///   "contact": { "email": "booking@example.com", "social": { ... } },
///   "businessServices": [ ... ],
///   "events": [ ... ],
///   "sponsors": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default)]
    pub hero: Hero,

    #[serde(default)]
    pub about: About,

    #[serde(default)]
    pub contact: Contact,

    #[serde(default)]
    pub business_services: Vec<Service>,

    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default)]
    pub sponsors: Vec<Sponsor>,

    /// Top-level keys this server does not manage.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Landing banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,

    /// Keys this server does not manage, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contact details and social profile links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press: Option<String>,

    #[serde(default)]
    pub social: Social,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Social profile URLs. Empty string means "not linked".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub spotify: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub tiktok: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Social {
    /// Links paired with their network name, in display order.
    pub fn links(&self) -> [(&'static str, &str); 6] {
        [
            ("spotify", &self.spotify),
            ("instagram", &self.instagram),
            ("youtube", &self.youtube),
            ("twitter", &self.twitter),
            ("facebook", &self.facebook),
            ("tiktok", &self.tiktok),
        ]
    }
}

/// One offering in the business services list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub features: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A scheduled show or appearance.
///
/// `id` must be unique within the events list for edit and delete to
/// target the right record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub link: String,
    pub color: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Records addressed by a caller-visible id.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

impl Identified for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

impl Identified for Sponsor {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}
