//! Fixtures used while a test runs.
//!
//! - `doc_server` - mock document builder & file endpoints
//! - `factory` - field definitions for models created by fixtures
//! - `record` - models, fields & records of the records database
//! - `template` - templates & their attachments
//! - `user` - users & access rules

pub mod doc_server;
pub mod factory;
pub mod record;
pub mod template;
pub mod user;
