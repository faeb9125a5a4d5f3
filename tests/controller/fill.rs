//! Tests for the fill trigger endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use docfill::{
    model::template::{FillResultDto, FillTemplateDto},
    server::{controller::fill::get_filled_template, model::session::user::SessionUserId},
};
use serde_json::json;

use super::*;

/// Admin user (ID 1), a sales order (ID 1) & a template with a file (ID 1)
async fn setup(builder: TestBuilder) -> Result<TestContext, TestError> {
    let mut test = builder
        .with_docfill_tables()
        .with_user(true)
        .with_model(
            "sale.order",
            "Sales Order",
            vec![factory::field("name", "char")],
        )
        .with_record("sale.order", json!({"name": "S00001"}))
        .build()
        .await?;

    test.template()
        .insert_template_with_file("Quotation", "sale.order", b"PK\x03\x04".to_vec())
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    Ok(test)
}

fn payload(template_id: i32) -> FillTemplateDto {
    FillTemplateDto {
        template_id,
        record_id: 1,
        model_name: "sale.order".to_string(),
    }
}

/// Expect 200 with the download link of the filled document
#[tokio::test]
async fn returns_href() -> Result<(), TestError> {
    let test = setup(TestBuilder::new().with_builder_endpoint(
        json!({"key": "fill", "end": true, "urls": {"Sales Order - S00001.docx": "http://doc/filled.docx"}}),
        1,
    ))
    .await?;

    let resp = get_filled_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload(1)),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp.into_body()).await;
    assert_eq!(body, r#"{"href":"http://doc/filled.docx"}"#);
    test.assert_mocks();

    Ok(())
}

/// Expect 200 with the message of the job error code
#[tokio::test]
async fn returns_error_message() -> Result<(), TestError> {
    let test = setup(TestBuilder::new().with_builder_endpoint(json!({"error": -8}), 1)).await?;

    let resp = get_filled_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload(1)),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: FillResultDto = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert_eq!(
        result,
        FillResultDto::Error {
            error: "Invalid token.".to_string()
        }
    );

    Ok(())
}

/// Expect a failing builder service to be reported as a message, not a server error
#[tokio::test]
async fn server_error_is_a_message() -> Result<(), TestError> {
    let test = setup(TestBuilder::new().with_mock_endpoint(|server| {
        server
            .mock("POST", "/docbuilder")
            .with_status(503)
            .expect(1)
            .create()
    }))
    .await?;

    let resp = get_filled_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload(1)),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Request failed: "));
    test.assert_mocks();

    Ok(())
}

#[tokio::test]
async fn unknown_template() -> Result<(), TestError> {
    let test = setup(TestBuilder::new()).await?;

    let result = get_filled_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload(99)),
    )
    .await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
