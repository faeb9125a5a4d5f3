//! HTTP controller endpoints for the docfill web API.
//!
//! This module contains the Axum handlers for template management, the fill trigger and the
//! public endpoints called back by the document builder service. Authenticated endpoints read
//! the acting user from the tower-sessions session, callbacks authenticate with the security
//! token carried in their query string. All handlers are documented with utoipa.

pub mod callback;
pub mod download;
pub mod fill;
pub mod template;
pub mod util;
