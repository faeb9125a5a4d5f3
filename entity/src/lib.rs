//! sea-orm entities for docfill.
//!
//! `app_user`, `model_access`, `data_model`, `data_field` & `data_record` mirror the
//! business records database the templates are filled from. `template` & `attachment`
//! hold the uploaded document templates themselves.

pub mod prelude;

pub mod app_user;
pub mod attachment;
pub mod data_field;
pub mod data_model;
pub mod data_record;
pub mod model_access;
pub mod template;
