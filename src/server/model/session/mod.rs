//! Session data models and utilities.
//!
//! Type-safe wrappers for session data stored with tower-sessions. Sessions are established
//! by the surrounding platform, docfill only reads the authenticated user from them.

pub mod user;
