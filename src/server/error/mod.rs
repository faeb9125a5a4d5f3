//! Error types for the docfill server.
//!
//! This module provides the error handling for every layer of the server, with specialized
//! error types for authentication & security tokens, configuration, templates and the
//! document builder service. All errors implement `IntoResponse` for Axum HTTP responses
//! and use `thiserror` for their `Display` and `Error` implementations.

pub mod auth;
pub mod builder;
pub mod config;
pub mod template;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, builder::BuilderError, config::ConfigError, template::TemplateError,
    },
};

/// Main error type for the docfill server.
///
/// Aggregates the domain-specific error types and external library errors into a single
/// type so they can be propagated with `?`. The `IntoResponse` implementation maps each
/// error to the HTTP response returned to API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, security tokens, access rules)
/// - Template errors (missing templates, attachments, models or records)
/// - Builder errors (document builder service failures)
/// - External library errors (database, sessions, HTTP client, JSON, JWT)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, security token, access rules).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Template error (missing template, attachment, model or record).
    #[error(transparent)]
    TemplateError(#[from] TemplateError),
    /// Document builder service error (transport failure or job error code).
    #[error(transparent)]
    BuilderError(#[from] BuilderError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// HTTP client construction error.
    #[error(transparent)]
    HttpClientError(#[from] reqwest::Error),
    /// JSON serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Token signing error.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// IO error (binding the listener, serving requests).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Maps domain-specific errors to appropriate HTTP status codes and JSON error responses.
/// Library errors are treated as internal server errors (500) with logging.
///
/// # Returns
/// - 400 Bad Request - For invalid template uploads
/// - 401 Unauthorized - For missing sessions or missing/invalid security tokens
/// - 403 Forbidden - For access rule violations
/// - 404 Not Found - For missing users, templates, attachments, models or records
/// - 502 Bad Gateway - For document builder service failures
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::TemplateError(err) => err.into_response(),
            Self::BuilderError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
