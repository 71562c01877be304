//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, multipart, etc.)
//! 2. Calls into the services (content store, editors, uploader)
//! 3. Returns HTTP response (JSON, status code)

/// Login and logout
pub mod auth;
/// Whole-document read and replace
pub mod content;
/// Cookie preference acknowledgements
pub mod cookies;
/// Section editors
pub mod editors;
pub mod health;
/// Music catalog
pub mod music;
/// Admin UI entry documents
pub mod pages;
/// Public read-only endpoints
pub mod public;
/// Image upload
pub mod upload;
