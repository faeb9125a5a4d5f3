//! Tests for the build-script callbacks of the document builder service.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use docfill::server::{
    controller::callback::{
        fill_template_callback, get_keys_callback, FillCallbackParams, KeysCallbackParams,
    },
    error::{auth::AuthError, Error},
    service::token::SecurityTokenMediator,
};
use serde_json::json;

use super::*;

/// User (ID 1) allowed to read template files, orders & customers; one order (ID 2) & a
/// template file (ID 1)
async fn setup() -> Result<TestContext, TestError> {
    let mut test = TestBuilder::new()
        .with_docfill_tables()
        .with_user(false)
        .with_model(
            "res.partner",
            "Contact",
            vec![factory::field("name", "char"), factory::field("email", "char")],
        )
        .with_model(
            "sale.order",
            "Sales Order",
            vec![
                factory::field("name", "char"),
                factory::relation("partner_id", "many2one", "res.partner"),
            ],
        )
        .with_record("res.partner", json!({"name": "Acme", "email": false}))
        .with_record("sale.order", json!({"name": "S00001", "partner_id": 1}))
        .with_access("docfill.attachment", None, true, false)
        .with_access("sale.order", None, true, false)
        .with_access("res.partner", None, true, false)
        .build()
        .await?;

    test.template()
        .insert_attachment("Quotation", b"PK\x03\x04".to_vec(), None)
        .await?;

    Ok(test)
}

fn token(test: &TestContext) -> String {
    SecurityTokenMediator::from_config(&test.config())
        .issue(1)
        .unwrap()
}

/// Expect a plain text build-script opening the template through the download endpoint
#[tokio::test]
async fn keys_callback_returns_script() -> Result<(), TestError> {
    let test = setup().await?;
    let token = token(&test);

    let params = KeysCallbackParams {
        attachment_id: 1,
        oo_security_token: Some(token.clone()),
    };
    let resp = get_keys_callback(State(test.into_app_state()), Query(params))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename='get_keys.docbuilder'"
    );
    let script = body_string(resp.into_body()).await;
    assert!(script.contains(&format!(
        "http://localhost:8080/template/download/1?oo_security_token={}",
        token
    )));

    Ok(())
}

/// Expect missing & invalid tokens to be told apart
#[tokio::test]
async fn keys_callback_rejects_bad_tokens() -> Result<(), TestError> {
    let test = setup().await?;

    let params = KeysCallbackParams {
        attachment_id: 1,
        oo_security_token: None,
    };
    let result = get_keys_callback(State(test.into_app_state()), Query(params)).await;
    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::TokenMissing))
    ));

    let params = KeysCallbackParams {
        attachment_id: 1,
        oo_security_token: Some("garbage".to_string()),
    };
    let result = get_keys_callback(State(test.into_app_state()), Query(params)).await;
    let Err(error) = result else {
        panic!("Expected an invalid token error");
    };
    assert!(matches!(error, Error::AuthError(AuthError::TokenInvalid(_))));
    assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the token of a user who no longer exists to be rejected
#[tokio::test]
async fn keys_callback_unknown_user() -> Result<(), TestError> {
    let test = setup().await?;
    let token = SecurityTokenMediator::from_config(&test.config())
        .issue(42)
        .unwrap();

    let params = KeysCallbackParams {
        attachment_id: 1,
        oo_security_token: Some(token),
    };
    let result = get_keys_callback(State(test.into_app_state()), Query(params)).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::UserNotInDatabase(42)))
    ));

    Ok(())
}

/// Expect the fill script to carry the values of the keys used by the template
#[tokio::test]
async fn fill_callback_returns_script() -> Result<(), TestError> {
    let mut test = setup().await?;
    let keys_url = test.doc_server().url("/output/keys.txt");
    let job = test
        .doc_server()
        .create_builder_endpoint(json!({"key": "keys", "urls": {"keys.txt": keys_url}}), 1);
    let output = test.doc_server().create_file_endpoint(
        "/output/keys.txt",
        b"name\npartner_id name\npartner_id email\n",
        1,
    );
    let token = token(&test);

    let params = FillCallbackParams {
        attachment_id: 1,
        model_name: "sale.order".to_string(),
        record_id: 2,
        oo_security_token: Some(token),
    };
    let resp = fill_template_callback(State(test.into_app_state()), Query(params))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename='fill_template.docbuilder'"
    );
    let script = body_string(resp.into_body()).await;
    assert!(script.contains(r#"var fields = {"name":"S00001","partner_id":{"name":"Acme"}};"#));
    assert!(script.contains(r#""Sales Order - S00001.docx""#));
    job.assert();
    output.assert();

    Ok(())
}

/// Expect a failed key extraction job to be reported to the builder service as 502
#[tokio::test]
async fn fill_callback_key_job_failure() -> Result<(), TestError> {
    let mut test = setup().await?;
    let job = test
        .doc_server()
        .create_builder_endpoint(json!({"error": -1}), 1);

    let params = FillCallbackParams {
        attachment_id: 1,
        model_name: "sale.order".to_string(),
        record_id: 2,
        oo_security_token: Some(token(&test)),
    };
    let result = fill_template_callback(State(test.into_app_state()), Query(params)).await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(resp.into_body()).await, r#"{"error":"Unknown error."}"#);
    job.assert();

    Ok(())
}

/// Expect records of models the user may not read to be refused
#[tokio::test]
async fn fill_callback_requires_model_access() -> Result<(), TestError> {
    let mut test = setup().await?;
    test.record()
        .insert_model("account.move", "Invoice", vec![factory::field("name", "char")])
        .await?;
    test.record()
        .insert_record("account.move", json!({"name": "INV/001"}))
        .await?;

    let params = FillCallbackParams {
        attachment_id: 1,
        model_name: "account.move".to_string(),
        record_id: 3,
        oo_security_token: Some(token(&test)),
    };
    let result = fill_template_callback(State(test.into_app_state()), Query(params)).await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
