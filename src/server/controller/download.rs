use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::api::ErrorDto,
    server::{
        controller::{
            template::TEMPLATE_TAG,
            util::get_user::{get_user_from_session, get_user_from_token},
        },
        error::Error,
        model::app::AppState,
        service::{template::TemplateService, token::SecurityTokenMediator},
    },
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadParams {
    pub oo_security_token: Option<String>,
}

/// Download a template file
///
/// The document builder service authenticates with the security token of its job. Browsers
/// without a token are authenticated through their session.
#[utoipa::path(
    get,
    path = "/template/download/{attachment_id}",
    tag = TEMPLATE_TAG,
    params(
        ("attachment_id" = i32, Path, description = "ID of the template file"),
        DownloadParams
    ),
    responses(
        (status = 200, description = "Template document", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 401, description = "Missing, invalid or expired security token", body = ErrorDto),
        (status = 403, description = "Not allowed to read template files", body = ErrorDto),
        (status = 404, description = "Template file not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_template(
    State(state): State<AppState>,
    session: Session,
    Path(attachment_id): Path<i32>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, Error> {
    let token = match params.oo_security_token.filter(|token| !token.is_empty()) {
        Some(token) => Some(token),
        None => match get_user_from_session(&state, &session).await {
            Ok(user) => Some(SecurityTokenMediator::from_config(&state.config).issue(user.id)?),
            Err(Error::AuthError(_)) => None,
            Err(e) => return Err(e),
        },
    };
    let user = get_user_from_token(&state, token.as_deref()).await?;

    let attachment = TemplateService::new(&state.db)
        .get_attachment(&user, attachment_id)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, attachment.mimetype),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", attachment.name),
            ),
        ],
        attachment.datas,
    ))
}
