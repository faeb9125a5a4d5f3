//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations, organized by domain:
//! users & access rules, the model registry & records of the business records database, and
//! the templates with their attachments.

pub mod access;
pub mod attachment;
pub mod model;
pub mod record;
pub mod template;
pub mod user;
