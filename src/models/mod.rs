//! Data models.
//!
//! This module contains the site content document, the bodies the admin
//! editors accept, credential claims and music catalog types.

/// Site content document
pub mod content;
/// Admin credential claims
pub mod credential;
/// Section editor request bodies
pub mod editor;
/// Music catalog wire types
pub mod music;
