//! Section editor HTTP handlers.
//!
//! All routes here live under `/api/admin` and are only reached with a valid
//! credential (checked by the request gate).
//!
//! - PUT /api/admin/hero
//! - PUT /api/admin/about
//! - PUT /api/admin/contact
//! - PUT /api/admin/services
//! - POST /api/admin/events, PUT|DELETE /api/admin/events/{id}
//! - POST /api/admin/sponsors, PUT|DELETE /api/admin/sponsors/{id}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::{
        content::{About, Contact, Event, Hero, Service, Sponsor},
        editor::{AboutUpdate, ContactUpdate, EventInput, HeroUpdate, SponsorInput},
    },
    services::section_editor,
    state::AppState,
};

pub async fn update_hero(
    State(state): State<AppState>,
    Json(update): Json<HeroUpdate>,
) -> Result<Json<Hero>, AppError> {
    let hero = section_editor::update_hero(&state.content, update).await?;
    tracing::info!("hero section updated");
    Ok(Json(hero))
}

pub async fn update_about(
    State(state): State<AppState>,
    Json(update): Json<AboutUpdate>,
) -> Result<Json<About>, AppError> {
    let about = section_editor::update_about(&state.content, update).await?;
    tracing::info!("about section updated");
    Ok(Json(about))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Json(update): Json<ContactUpdate>,
) -> Result<Json<Contact>, AppError> {
    let contact = section_editor::update_contact(&state.content, update).await?;
    tracing::info!("contact section updated");
    Ok(Json(contact))
}

pub async fn replace_services(
    State(state): State<AppState>,
    Json(services): Json<Vec<Service>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = section_editor::replace_services(&state.content, services).await?;
    tracing::info!(count = services.len(), "business services replaced");
    Ok(Json(services))
}

/// Add an event. The server assigns its id.
///
/// # Response
///
/// 201 Created with the stored event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = section_editor::add_event(&state.content, input).await?;
    tracing::info!(id = %event.id, "event added");
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, AppError> {
    let event = section_editor::edit_event(&state.content, &id, input).await?;
    tracing::info!(%id, "event updated");
    Ok(Json(event))
}

/// Delete an event. Deleting an unknown id succeeds with `deleted: false`.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = section_editor::delete_event(&state.content, &id).await?;
    tracing::info!(%id, deleted, "event delete");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

pub async fn create_sponsor(
    State(state): State<AppState>,
    Json(input): Json<SponsorInput>,
) -> Result<(StatusCode, Json<Sponsor>), AppError> {
    let sponsor = section_editor::add_sponsor(&state.content, input).await?;
    tracing::info!(id = %sponsor.id, "sponsor added");
    Ok((StatusCode::CREATED, Json(sponsor)))
}

pub async fn update_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SponsorInput>,
) -> Result<Json<Sponsor>, AppError> {
    let sponsor = section_editor::edit_sponsor(&state.content, &id, input).await?;
    tracing::info!(%id, "sponsor updated");
    Ok(Json(sponsor))
}

pub async fn delete_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = section_editor::delete_sponsor(&state.content, &id).await?;
    tracing::info!(%id, deleted, "sponsor delete");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
