//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI paths,
//! and the generated document is served as JSON at `/api/docs/openapi.json`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and the OpenAPI document.
///
/// # Registered Endpoints
/// - `POST /template` - Create a template
/// - `GET /template` - List templates
/// - `GET /template/{template_id}` - Get a template
/// - `PATCH /template/{template_id}` - Rename a template or replace its document
/// - `DELETE /template/{template_id}` - Delete a template
/// - `GET /template/fields/{model_name}` - Field tree of a model
/// - `POST /template/get_filled_template` - Fill a template with a record
/// - `GET /template/callback/get_keys` - Key extraction build-script (security token)
/// - `GET /template/callback/fill_template` - Fill build-script (security token)
/// - `GET /template/download/{attachment_id}` - Template file (security token or session)
///
/// # Returns
/// An Axum `Router<AppState>` with all routes registered, ready for state & the session layer.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "docfill", description = "docfill API"), tags(
        (name = controller::template::TEMPLATE_TAG, description = "Template management & filling API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::template::create_template,
            controller::template::list_templates
        ))
        .routes(routes!(
            controller::template::get_template,
            controller::template::update_template,
            controller::template::delete_template
        ))
        .routes(routes!(controller::template::get_template_fields))
        .routes(routes!(controller::fill::get_filled_template))
        .routes(routes!(controller::callback::get_keys_callback))
        .routes(routes!(controller::callback::fill_template_callback))
        .routes(routes!(controller::download::download_template))
        .split_for_parts();

    routes.route(
        "/api/docs/openapi.json",
        get(move || {
            let api = api.clone();
            async move { Json(api) }
        }),
    )
}
