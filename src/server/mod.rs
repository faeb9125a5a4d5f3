//! Server application core modules.
//!
//! This module contains all server-side functionality for docfill: HTTP routing, security
//! token handling, the record database repositories, template lifecycle management and the
//! document builder job orchestration that turns a template and a record into a filled
//! document.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
