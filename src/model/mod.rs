//! Request & response payloads shared by the HTTP API.

pub mod api;
pub mod template;
