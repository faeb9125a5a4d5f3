//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and the document builder service. The fill pipeline is
//! split across [`schema`] (field tree for the key picker), [`keys`] (key paths extracted
//! from templates), [`resolver`] (record values for those keys) and [`builder`] (jobs sent to
//! the document builder service). [`token`] binds builder callbacks to the acting user.

pub mod access;
pub mod builder;
pub mod keys;
pub mod resolver;
pub mod schema;
pub mod template;
pub mod token;
