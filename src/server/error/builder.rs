use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to the document builder service.
///
/// These are expected, operator-visible failures: they are always reduced to a short
/// user-facing message and never surface as an internal server error.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Timeout, connection error or non-2xx status from the builder service
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The builder service replied with a non-zero error code
    #[error("Builder job failed with code {code}: {message}")]
    Job { code: i64, message: &'static str },
    /// The builder service reply carried neither an error code nor an output URL
    #[error("Builder job returned no output")]
    MissingOutput,
    /// The builder service reply or job output could not be read
    #[error("Malformed builder response: {0}")]
    MalformedResponse(String),
    #[error("Failed to sign builder job: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl BuilderError {
    /// Message shown to the user requesting the document
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(_) => self.to_string(),
            Self::Job { message, .. } => message.to_string(),
            Self::MissingOutput | Self::MalformedResponse(_) | Self::Signing(_) => {
                "Unknown error".to_string()
            }
        }
    }
}

impl IntoResponse for BuilderError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: self.user_message(),
            }),
        )
            .into_response()
    }
}
