//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Classify and authorize requests
//! - Short-circuit requests (redirect or reject unauthenticated admin access)

/// Admin request gate
pub mod gate;
