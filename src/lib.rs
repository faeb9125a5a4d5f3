//! docfill fills document templates with values collected from business records.
//!
//! Placeholder keys are extracted from an uploaded template by an ONLYOFFICE document
//! builder service, resolved against a record and its related records, and sent back to
//! the builder service which renders the filled document.

pub mod model;
pub mod server;
