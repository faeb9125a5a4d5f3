use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::user::AccessOperation};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database")]
    UserNotInDatabase(i32),
    #[error("Missing security token")]
    TokenMissing,
    #[error("Invalid or expired security token: {0}")]
    TokenInvalid(#[source] jsonwebtoken::errors::Error),
    #[error("User ID {user_id} is not allowed to {operation} {model}")]
    AccessDenied {
        user_id: i32,
        model: String,
        operation: AccessOperation,
    },
}

impl AuthError {
    fn error_response(status: StatusCode, message: &str) -> Response {
        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession => {
                Self::error_response(StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::UserNotInDatabase(_) => {
                Self::error_response(StatusCode::NOT_FOUND, "User not found")
            }
            Self::TokenMissing => {
                Self::error_response(StatusCode::UNAUTHORIZED, "Missing security token")
            }
            Self::TokenInvalid(_) => Self::error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired security token",
            ),
            Self::AccessDenied { .. } => Self::error_response(StatusCode::FORBIDDEN, "Access denied"),
        }
    }
}
