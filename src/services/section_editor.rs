//! Section editors - validated mutations of one section of the document.
//!
//! Every editor follows the same steps:
//! 1. Validate the submitted fields (no I/O yet)
//! 2. Inside `ContentStore::update`, merge them into the current section
//! 3. Re-validate the merged section where a partial update could leave it
//!    incomplete
//! 4. Write the whole document back
//!
//! A validation failure at any step leaves the file untouched.
//!
//! # Identifiers
//!
//! Events and sponsors get server-assigned ids: the current Unix time in
//! milliseconds, bumped past the largest numeric id already in the list.

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::content::{About, Contact, Event, Hero, Identified, Service, Sponsor};
use crate::models::editor::{AboutUpdate, ContactUpdate, EventInput, HeroUpdate, SponsorInput};
use crate::services::content_store::ContentStore;

pub async fn update_hero(store: &ContentStore, update: HeroUpdate) -> Result<Hero, AppError> {
    reject_blank_if_present(&[("title", &update.title), ("subtitle", &update.subtitle)])?;

    store
        .update(|doc| {
            let hero = &mut doc.hero;
            merge(&mut hero.title, update.title);
            merge(&mut hero.subtitle, update.subtitle);
            merge_optional(&mut hero.background_image, update.background_image);
            merge_optional(&mut hero.background_video, update.background_video);
            require(&[("title", &hero.title), ("subtitle", &hero.subtitle)])?;
            Ok(hero.clone())
        })
        .await
}

pub async fn update_about(store: &ContentStore, update: AboutUpdate) -> Result<About, AppError> {
    reject_blank_if_present(&[("title", &update.title), ("bio", &update.bio)])?;

    store
        .update(|doc| {
            let about = &mut doc.about;
            merge(&mut about.title, update.title);
            merge(&mut about.bio, update.bio);
            merge_optional(&mut about.about_image, update.about_image);
            require(&[("title", &about.title), ("bio", &about.bio)])?;
            Ok(about.clone())
        })
        .await
}

pub async fn update_contact(
    store: &ContentStore,
    update: ContactUpdate,
) -> Result<Contact, AppError> {
    store
        .update(|doc| {
            let mut contact = doc.contact.clone();
            merge(&mut contact.email, update.email);
            merge(&mut contact.phone, update.phone);
            merge(&mut contact.address, update.address);
            merge_optional(&mut contact.location, update.location);
            merge_optional(&mut contact.management, update.management);
            merge_optional(&mut contact.booking, update.booking);
            merge_optional(&mut contact.press, update.press);
            if let Some(social) = update.social {
                social.apply(&mut contact.social);
            }

            validate_contact(&contact)?;
            doc.contact = contact.clone();
            Ok(contact)
        })
        .await
}

/// Replace the whole business services list.
pub async fn replace_services(
    store: &ContentStore,
    services: Vec<Service>,
) -> Result<Vec<Service>, AppError> {
    let services = services
        .into_iter()
        .enumerate()
        .map(|(i, mut service)| {
            require(&[
                ("title", &service.title),
                ("description", &service.description),
                ("icon", &service.icon),
            ])
            .map_err(|e| match e {
                AppError::Validation(msg) => AppError::Validation(format!("service {}: {msg}", i + 1)),
                other => other,
            })?;
            service.features.retain(|f| !f.trim().is_empty());
            Ok(service)
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    store
        .update(|doc| {
            doc.business_services = services.clone();
            Ok(services)
        })
        .await
}

pub async fn add_event(store: &ContentStore, input: EventInput) -> Result<Event, AppError> {
    validate_event(&input)?;
    store
        .update(|doc| Ok(add_entry(&mut doc.events, |id| input.into_event(id))))
        .await
}

pub async fn edit_event(
    store: &ContentStore,
    id: &str,
    input: EventInput,
) -> Result<Event, AppError> {
    validate_event(&input)?;
    store
        .update(|doc| edit_entry(&mut doc.events, id, "Event", input.into_event(id.to_string())))
        .await
}

/// Remove an event. Returns whether anything was removed; a missing id is
/// not an error.
pub async fn delete_event(store: &ContentStore, id: &str) -> Result<bool, AppError> {
    store.update(|doc| Ok(delete_entry(&mut doc.events, id))).await
}

pub async fn add_sponsor(store: &ContentStore, input: SponsorInput) -> Result<Sponsor, AppError> {
    validate_sponsor(&input)?;
    store
        .update(|doc| Ok(add_entry(&mut doc.sponsors, |id| input.into_sponsor(id))))
        .await
}

pub async fn edit_sponsor(
    store: &ContentStore,
    id: &str,
    input: SponsorInput,
) -> Result<Sponsor, AppError> {
    validate_sponsor(&input)?;
    store
        .update(|doc| {
            edit_entry(
                &mut doc.sponsors,
                id,
                "Sponsor",
                input.into_sponsor(id.to_string()),
            )
        })
        .await
}

pub async fn delete_sponsor(store: &ContentStore, id: &str) -> Result<bool, AppError> {
    store.update(|doc| Ok(delete_entry(&mut doc.sponsors, id))).await
}

fn add_entry<T, F>(list: &mut Vec<T>, build: F) -> T
where
    T: Identified + Clone,
    F: FnOnce(String) -> T,
{
    let entry = build(next_id(list, Utc::now().timestamp_millis()));
    list.push(entry.clone());
    entry
}

fn edit_entry<T>(list: &mut [T], id: &str, kind: &str, replacement: T) -> Result<T, AppError>
where
    T: Identified + Clone,
{
    let slot = list
        .iter_mut()
        .find(|entry| entry.id() == id)
        .ok_or_else(|| AppError::NotFound(kind.to_string()))?;

    // Keys the editor form does not know about survive the edit.
    let mut replacement = replacement;
    for (key, value) in std::mem::take(slot.extra_mut()) {
        replacement.extra_mut().entry(key).or_insert(value);
    }
    *slot = replacement.clone();
    Ok(replacement)
}

fn delete_entry<T: Identified>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id() != id);
    list.len() != before
}

/// Millisecond timestamp id, unique among the numeric ids already present.
fn next_id<T: Identified>(list: &[T], now_millis: i64) -> String {
    let candidate = u64::try_from(now_millis).unwrap_or_default();
    let newest = list.iter().filter_map(|entry| entry.id().parse::<u64>().ok()).max();
    match newest {
        Some(newest) if newest >= candidate => match newest.checked_add(1) {
            Some(next) => next.to_string(),
            // Numeric ids are exhausted; a UUID cannot collide with them.
            None => Uuid::new_v4().to_string(),
        },
        _ => candidate.to_string(),
    }
}

fn merge(slot: &mut String, update: Option<String>) {
    if let Some(value) = update {
        *slot = value;
    }
}

/// An empty string clears an optional field.
fn merge_optional(slot: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        *slot = Some(value).filter(|v| !v.trim().is_empty());
    }
}

fn require(fields: &[(&str, &String)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

fn reject_blank_if_present(fields: &[(&str, &Option<String>)]) -> Result<(), AppError> {
    let present: Vec<(&str, &String)> = fields
        .iter()
        .filter_map(|&(name, value)| value.as_ref().map(|v| (name, v)))
        .collect();
    require(&present)
}

fn validate_event(input: &EventInput) -> Result<(), AppError> {
    require(&[
        ("title", &input.title),
        ("date", &input.date),
        ("description", &input.description),
    ])
}

fn validate_sponsor(input: &SponsorInput) -> Result<(), AppError> {
    require(&[
        ("name", &input.name),
        ("description", &input.description),
        ("link", &input.link),
        ("color", &input.color),
    ])
}

fn validate_contact(contact: &Contact) -> Result<(), AppError> {
    if !looks_like_email(&contact.email) {
        return Err(AppError::Validation("Invalid email address.".to_string()));
    }
    let phone_ok = contact
        .phone
        .chars()
        .all(|c| c.is_ascii_digit() || " -()+".contains(c));
    if !phone_ok {
        return Err(AppError::Validation("Invalid phone number.".to_string()));
    }
    for (network, link) in contact.social.links() {
        if !link.is_empty() && !is_http_url(link) {
            return Err(AppError::Validation(format!("Invalid URL for {network}.")));
        }
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and a dot in the domain.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ContentDocument;
    use crate::models::editor::SocialUpdate;

    async fn store() -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("site-content.json"));
        let mut doc = ContentDocument::default();
        doc.hero.title = "DJ Nova".to_string();
        doc.hero.subtitle = "House".to_string();
        doc.contact.email = "booking@example.com".to_string();
        store.write(&doc).await.unwrap();
        (dir, store)
    }

    fn event_input(title: &str) -> EventInput {
        EventInput {
            title: title.to_string(),
            date: "2025-07-04".to_string(),
            description: "Rooftop".to_string(),
            ..EventInput::default()
        }
    }

    fn sponsor_input(name: &str) -> SponsorInput {
        SponsorInput {
            name: name.to_string(),
            description: "Audio gear".to_string(),
            link: "https://example.com".to_string(),
            color: "#ff0066".to_string(),
            ..SponsorInput::default()
        }
    }

    #[tokio::test]
    async fn hero_partial_update_keeps_other_fields() {
        let (_dir, store) = store().await;
        let hero = update_hero(
            &store,
            HeroUpdate {
                subtitle: Some("Techno".to_string()),
                background_image: Some("/uploads/a.jpg".to_string()),
                ..HeroUpdate::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(hero.title, "DJ Nova");
        assert_eq!(hero.subtitle, "Techno");
        assert_eq!(store.read().await.unwrap().hero, hero);
    }

    #[tokio::test]
    async fn hero_blank_title_is_rejected() {
        let (_dir, store) = store().await;
        let result = update_hero(
            &store,
            HeroUpdate {
                title: Some("  ".to_string()),
                ..HeroUpdate::default()
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.read().await.unwrap().hero.title, "DJ Nova");
    }

    #[tokio::test]
    async fn about_requires_bio_after_merge() {
        let (_dir, store) = store().await;
        let result = update_about(
            &store,
            AboutUpdate {
                title: Some("About".to_string()),
                ..AboutUpdate::default()
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn contact_validation() {
        let (_dir, store) = store().await;

        let bad_email = ContactUpdate {
            email: Some("not-an-email".to_string()),
            ..ContactUpdate::default()
        };
        assert!(update_contact(&store, bad_email).await.is_err());

        let bad_phone = ContactUpdate {
            phone: Some("call me".to_string()),
            ..ContactUpdate::default()
        };
        assert!(update_contact(&store, bad_phone).await.is_err());

        let bad_link = ContactUpdate {
            social: Some(SocialUpdate {
                instagram: Some("instagram.com/nova".to_string()),
                ..SocialUpdate::default()
            }),
            ..ContactUpdate::default()
        };
        assert!(update_contact(&store, bad_link).await.is_err());

        let good = ContactUpdate {
            phone: Some("+1 (555) 010-0100".to_string()),
            social: Some(SocialUpdate {
                instagram: Some("https://instagram.com/nova".to_string()),
                ..SocialUpdate::default()
            }),
            ..ContactUpdate::default()
        };
        let contact = update_contact(&store, good).await.unwrap();
        assert_eq!(contact.email, "booking@example.com");
        assert_eq!(contact.social.instagram, "https://instagram.com/nova");
    }

    #[tokio::test]
    async fn services_drop_blank_features_and_require_fields() {
        let (_dir, store) = store().await;
        let service = Service {
            title: "Festivals".to_string(),
            description: "Main stage sets".to_string(),
            icon: "Star".to_string(),
            color: "gold".to_string(),
            features: vec!["Visuals".to_string(), " ".to_string()],
            ..Service::default()
        };
        let saved = replace_services(&store, vec![service.clone()]).await.unwrap();
        assert_eq!(saved[0].features, vec!["Visuals".to_string()]);

        let untitled = Service {
            title: String::new(),
            ..service
        };
        let result = replace_services(&store, vec![untitled]).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.starts_with("service 1")));
        assert_eq!(store.read().await.unwrap().business_services.len(), 1);
    }

    #[tokio::test]
    async fn event_add_edit_delete() {
        let (_dir, store) = store().await;

        let added = add_event(&store, event_input("Opening")).await.unwrap();
        assert!(!added.id.is_empty());

        let edited = edit_event(&store, &added.id, event_input("Opening (moved)"))
            .await
            .unwrap();
        assert_eq!(edited.id, added.id);

        let doc = store.read().await.unwrap();
        assert_eq!(doc.events.len(), 1);
        assert_eq!(doc.events[0].title, "Opening (moved)");

        assert!(delete_event(&store, &added.id).await.unwrap());
        assert!(store.read().await.unwrap().events.is_empty());
    }

    #[tokio::test]
    async fn add_then_delete_restores_document() {
        let (_dir, store) = store().await;
        let before = store.read().await.unwrap();

        let added = add_event(&store, event_input("Pop-up")).await.unwrap();
        delete_event(&store, &added.id).await.unwrap();

        assert_eq!(store.read().await.unwrap(), before);
    }

    #[tokio::test]
    async fn deleting_unknown_event_changes_nothing() {
        let (_dir, store) = store().await;
        add_event(&store, event_input("Keep me")).await.unwrap();
        let before = store.read().await.unwrap();

        assert!(!delete_event(&store, "does-not-exist").await.unwrap());
        assert_eq!(store.read().await.unwrap(), before);
    }

    #[tokio::test]
    async fn editing_unknown_event_is_not_found() {
        let (_dir, store) = store().await;
        let result = edit_event(&store, "missing", event_input("Ghost")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn event_missing_fields_never_reaches_store() {
        let (_dir, store) = store().await;
        let before = tokio::fs::read(store.path()).await.unwrap();

        let result = add_event(&store, EventInput::default()).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("title")));
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn sponsor_requires_all_fields() {
        let (_dir, store) = store().await;
        let mut input = sponsor_input("");
        input.color = String::new();
        let result = add_sponsor(&store, input).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("name") && msg.contains("color")));
        assert!(store.read().await.unwrap().sponsors.is_empty());
    }

    #[tokio::test]
    async fn sponsor_lifecycle() {
        let (_dir, store) = store().await;
        let sponsor = add_sponsor(&store, sponsor_input("Acme Audio")).await.unwrap();
        let renamed = edit_sponsor(&store, &sponsor.id, sponsor_input("Acme Pro Audio"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Acme Pro Audio");
        assert!(delete_sponsor(&store, &sponsor.id).await.unwrap());
        assert!(!delete_sponsor(&store, &sponsor.id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_adds_to_different_sections_are_both_kept() {
        let (_dir, store) = store().await;
        let (event, sponsor) = tokio::join!(
            add_event(&store, event_input("Concurrent")),
            add_sponsor(&store, sponsor_input("Concurrent Co")),
        );
        event.unwrap();
        sponsor.unwrap();

        let doc = store.read().await.unwrap();
        assert_eq!(doc.events.len(), 1);
        assert_eq!(doc.sponsors.len(), 1);
    }

    #[test]
    fn ids_are_unique_within_a_list() {
        let mut events = vec![Event {
            id: "5000".to_string(),
            ..Event::default()
        }];
        assert_eq!(next_id(&events, 1000), "5001");
        events.push(Event {
            id: "5001".to_string(),
            ..Event::default()
        });
        assert_eq!(next_id(&events, 1000), "5002");
        assert_eq!(next_id(&events, 9000), "9000");
    }

    #[test]
    fn largest_numeric_id_does_not_overflow() {
        let mut events = vec![Event {
            id: u64::MAX.to_string(),
            ..Event::default()
        }];
        let id = next_id(&events, 1000);
        assert_ne!(id, u64::MAX.to_string());
        assert!(Uuid::parse_str(&id).is_ok());

        events.push(Event {
            id,
            ..Event::default()
        });
        let again = next_id(&events, 1000);
        assert!(events.iter().all(|e| e.id != again));
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.co"));
        assert!(!looks_like_email("a@@b.co"));
    }
}
