use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        template::{CreateTemplateDto, TemplateDto, UpdateTemplateDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::template::TemplateService,
    },
};

pub static TEMPLATE_TAG: &str = "template";

/// Create a template for a model
///
/// The template document is uploaded base64 encoded, a blank document is used when omitted.
#[utoipa::path(
    post,
    path = "/template",
    tag = TEMPLATE_TAG,
    request_body = CreateTemplateDto,
    responses(
        (status = 201, description = "Template created", body = TemplateDto),
        (status = 400, description = "Invalid template name or file", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to create templates", body = ErrorDto),
        (status = 404, description = "Model not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_template(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTemplateDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let template = TemplateService::new(&state.db)
        .create(
            &user,
            &payload.name,
            &payload.model_name,
            payload.file.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(template)))
}

/// List templates, most recently updated first
#[utoipa::path(
    get,
    path = "/template",
    tag = TEMPLATE_TAG,
    responses(
        (status = 200, description = "Success when listing templates", body = Vec<TemplateDto>),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to read templates", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_templates(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let templates = TemplateService::new(&state.db).list(&user).await?;

    Ok((StatusCode::OK, Json(templates)))
}

#[utoipa::path(
    get,
    path = "/template/{template_id}",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "ID of the template")),
    responses(
        (status = 200, description = "Success when retrieving the template", body = TemplateDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to read templates", body = ErrorDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_template(
    State(state): State<AppState>,
    session: Session,
    Path(template_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let template = TemplateService::new(&state.db)
        .get(&user, template_id)
        .await?;

    Ok((StatusCode::OK, Json(template)))
}

/// Rename a template and/or replace its document
#[utoipa::path(
    patch,
    path = "/template/{template_id}",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "ID of the template")),
    request_body = UpdateTemplateDto,
    responses(
        (status = 200, description = "Template updated", body = TemplateDto),
        (status = 400, description = "Invalid template name or file", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to update templates", body = ErrorDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_template(
    State(state): State<AppState>,
    session: Session,
    Path(template_id): Path<i32>,
    Json(payload): Json<UpdateTemplateDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let template = TemplateService::new(&state.db)
        .update(&user, template_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(template)))
}

/// Delete a template and its document
#[utoipa::path(
    delete,
    path = "/template/{template_id}",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "ID of the template")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to delete templates", body = ErrorDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_template(
    State(state): State<AppState>,
    session: Session,
    Path(template_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    TemplateService::new(&state.db)
        .delete(&user, template_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Field tree of a model for picking template keys
///
/// Relationship fields carry the fields of their related model under `schema`.
#[utoipa::path(
    get,
    path = "/template/fields/{model_name}",
    tag = TEMPLATE_TAG,
    params(("model_name" = String, Path, description = "Technical name of the model")),
    responses(
        (status = 200, description = "Success when building the field tree", body = serde_json::Value),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not allowed to read the model", body = ErrorDto),
        (status = 404, description = "Model not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_template_fields(
    State(state): State<AppState>,
    session: Session,
    Path(model_name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let schema = TemplateService::new(&state.db)
        .fields(&user, &model_name)
        .await?;

    Ok((StatusCode::OK, Json(schema)))
}
