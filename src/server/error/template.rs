use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template ID {0} not found")]
    TemplateNotFound(i32),
    #[error("Attachment ID {0} not found")]
    AttachmentNotFound(i32),
    #[error("Template ID {0} has no file")]
    MissingFile(i32),
    #[error("Model {0:?} not found")]
    ModelNotFound(String),
    #[error("Record ID {id} of model {model:?} not found")]
    RecordNotFound { model: String, id: i32 },
    #[error("Template name must not be empty")]
    InvalidName,
    #[error("Invalid template file: {0}")]
    InvalidFile(String),
}

impl IntoResponse for TemplateError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match &self {
            Self::TemplateNotFound(_) => (StatusCode::NOT_FOUND, "Template not found".to_string()),
            Self::AttachmentNotFound(_) | Self::MissingFile(_) => {
                (StatusCode::NOT_FOUND, "Template file not found".to_string())
            }
            Self::ModelNotFound(model) => {
                (StatusCode::NOT_FOUND, format!("Model {} not found", model))
            }
            Self::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "Record not found".to_string()),
            Self::InvalidName | Self::InvalidFile(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
