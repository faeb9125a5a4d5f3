//! Tests for the assembled router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use docfill::server::{router::routes, startup::session_layer};
use tower::ServiceExt;

use super::*;

/// Expect every endpoint to be listed in the OpenAPI document
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let app = routes()
        .with_state(test.into_app_state())
        .layer(session_layer());

    let resp = app
        .oneshot(
            Request::get("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let document: serde_json::Value = serde_json::from_str(&body_string(resp.into_body()).await)?;
    let paths = document["paths"].as_object().expect("paths");
    for path in [
        "/template",
        "/template/{template_id}",
        "/template/fields/{model_name}",
        "/template/get_filled_template",
        "/template/callback/get_keys",
        "/template/callback/fill_template",
        "/template/download/{attachment_id}",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    Ok(())
}

/// Expect 401 for a request without a session cookie
#[tokio::test]
async fn rejects_anonymous_requests() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let app = routes()
        .with_state(test.into_app_state())
        .layer(session_layer());

    let resp = app
        .oneshot(Request::get("/template").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_string(resp.into_body()).await,
        r#"{"error":"Authentication required"}"#
    );

    Ok(())
}

/// Expect callbacks to be reachable without a session but not without a token
#[tokio::test]
async fn callbacks_require_token() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let app = routes()
        .with_state(test.into_app_state())
        .layer(session_layer());

    let resp = app
        .oneshot(
            Request::get("/template/callback/get_keys?attachment_id=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_string(resp.into_body()).await,
        r#"{"error":"Missing security token"}"#
    );

    Ok(())
}
