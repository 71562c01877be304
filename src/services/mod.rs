//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers.
//! They handle credentials, login throttling, the content document,
//! uploads and the music catalog.

pub mod asset_service;
pub mod content_store;
pub mod credential_service;
pub mod music_catalog;
pub mod rate_limiter;
pub mod section_editor;
