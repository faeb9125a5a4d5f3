//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP controllers,
//! verifying request handling, response formatting, session & security token
//! authentication and error handling for all API endpoints.

mod callback;
mod download;
mod fill;
mod router;
mod template;

use axum::body::{to_bytes, Body};
use docfill_test_utils::prelude::*;

use crate::TestContextExt;

/// Reads a response body to a string
async fn body_string(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}
