//! Build-scripts downloaded by the document builder service while running a job.
//!
//! The builder service calls these endpoints without a session, the acting user is taken from
//! the security token embedded in the callback URL when the job was submitted.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::api::ErrorDto,
    server::{
        controller::{template::TEMPLATE_TAG, util::get_user::get_user_from_token},
        error::Error,
        model::app::AppState,
        service::builder::orchestrator::BuilderJobOrchestrator,
    },
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KeysCallbackParams {
    /// ID of the template file
    pub attachment_id: i32,
    pub oo_security_token: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FillCallbackParams {
    /// ID of the template file
    pub attachment_id: i32,
    /// Technical name of the model of the record
    pub model_name: String,
    pub record_id: i32,
    pub oo_security_token: Option<String>,
}

/// Build-script extracting the form keys of a template
#[utoipa::path(
    get,
    path = "/template/callback/get_keys",
    tag = TEMPLATE_TAG,
    params(KeysCallbackParams),
    responses(
        (status = 200, description = "Build-script saving the keys of the template", content_type = "text/plain", body = String),
        (status = 401, description = "Missing, invalid or expired security token", body = ErrorDto),
        (status = 403, description = "Not allowed to read template files", body = ErrorDto),
        (status = 404, description = "Template file not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_keys_callback(
    State(state): State<AppState>,
    Query(params): Query<KeysCallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let token = params.oo_security_token.as_deref();
    let user = get_user_from_token(&state, token).await?;

    let script = BuilderJobOrchestrator::new(&state.db, &state.http_client, &state.config)
        .build_keys_script(&user, token.unwrap_or_default(), params.attachment_id)
        .await?;

    Ok(build_script_response(script, "get_keys.docbuilder"))
}

/// Build-script filling a template with the values of a record
///
/// Runs the key extraction job of the template before resolving the values of the record.
#[utoipa::path(
    get,
    path = "/template/callback/fill_template",
    tag = TEMPLATE_TAG,
    params(FillCallbackParams),
    responses(
        (status = 200, description = "Build-script saving the filled document", content_type = "text/plain", body = String),
        (status = 401, description = "Missing, invalid or expired security token", body = ErrorDto),
        (status = 403, description = "Not allowed to read the template file or the record", body = ErrorDto),
        (status = 404, description = "Template file, model or record not found", body = ErrorDto),
        (status = 502, description = "Key extraction job failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn fill_template_callback(
    State(state): State<AppState>,
    Query(params): Query<FillCallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let token = params.oo_security_token.as_deref();
    let user = get_user_from_token(&state, token).await?;

    let script = BuilderJobOrchestrator::new(&state.db, &state.http_client, &state.config)
        .build_fill_script(
            &user,
            token.unwrap_or_default(),
            params.attachment_id,
            &params.model_name,
            params.record_id,
        )
        .await?;

    Ok(build_script_response(script, "fill_template.docbuilder"))
}

fn build_script_response(script: String, filename: &str) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename='{}'", filename),
            ),
        ],
        script,
    )
}
