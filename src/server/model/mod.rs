//! Server application models and type definitions.
//!
//! This module contains the domain types the server works with: application state, session
//! data, the acting user, the field metadata of the records database and the key & value
//! trees flowing through the template fill pipeline.

pub mod app;
pub mod field;
pub mod key_tree;
pub mod session;
pub mod user;
pub mod value_tree;
