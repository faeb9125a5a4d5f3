use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        template::{FillResultDto, FillTemplateDto},
    },
    server::{
        controller::{template::TEMPLATE_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::app::AppState,
        service::builder::orchestrator::BuilderJobOrchestrator,
    },
};

/// Fill a template with the values of a record
///
/// Returns the download link of the filled document. Failures of the document builder service
/// are reported as `{"error": "<message>"}` with a 200 status.
#[utoipa::path(
    post,
    path = "/template/get_filled_template",
    tag = TEMPLATE_TAG,
    request_body = FillTemplateDto,
    responses(
        (status = 200, description = "Download link of the filled document or the reason it could not be generated", body = FillResultDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to read templates", body = ErrorDto),
        (status = 404, description = "Template or template file not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_filled_template(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<FillTemplateDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let result = BuilderJobOrchestrator::new(&state.db, &state.http_client, &state.config)
        .fill_template(
            &user,
            payload.template_id,
            payload.record_id,
            &payload.model_name,
        )
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
