//! Tests for the template management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use docfill::{
    model::template::{CreateTemplateDto, TemplateDto, UpdateTemplateDto},
    server::{
        controller::template::{
            create_template, delete_template, get_template, get_template_fields, list_templates,
            update_template,
        },
        error::{auth::AuthError, Error},
        model::session::user::SessionUserId,
    },
};

use super::*;

/// Admin user (ID 1) with a contact model
async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_docfill_tables()
        .with_user(true)
        .with_model(
            "res.partner",
            "Contact",
            vec![
                factory::field("name", "char"),
                factory::relation("country_id", "many2one", "res.country"),
            ],
        )
        .with_model("res.country", "Country", vec![factory::field("name", "char")])
        .build()
        .await
}

/// Expect 201 with the created template
#[tokio::test]
async fn creates_template() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let payload = CreateTemplateDto {
        name: "Letter".to_string(),
        model_name: "res.partner".to_string(),
        file: None,
    };
    let resp = create_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let template: TemplateDto = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert_eq!(template.name, "Letter");
    assert!(template.attachment_id.is_some());

    Ok(())
}

/// Expect 400 for an upload that is not a document
#[tokio::test]
async fn rejects_invalid_file() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let payload = CreateTemplateDto {
        name: "Letter".to_string(),
        model_name: "res.partner".to_string(),
        file: Some("aGVsbG8=".to_string()),
    };
    let result = create_template(
        State(test.into_app_state()),
        test.session.clone(),
        Json(payload),
    )
    .await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 401 without a user in session
#[tokio::test]
async fn requires_session() -> Result<(), TestError> {
    let test = setup().await?;

    let result = list_templates(State(test.into_app_state()), test.session.clone()).await;

    let Err(error) = result else {
        panic!("Expected an error without a session");
    };
    assert!(matches!(
        error,
        Error::AuthError(AuthError::UserNotInSession)
    ));
    assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 404 & a cleared session when the session user no longer exists
#[tokio::test]
async fn clears_session_of_unknown_user() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 42).await.unwrap();

    let result = list_templates(State(test.into_app_state()), test.session.clone()).await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
async fn lists_templates() -> Result<(), TestError> {
    let mut test = setup().await?;
    test.template()
        .insert_template("Letter", "res.partner", None)
        .await?;
    test.template()
        .insert_template("Label", "res.partner", None)
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let resp = list_templates(State(test.into_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let templates: Vec<TemplateDto> = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert_eq!(templates.len(), 2);

    Ok(())
}

#[tokio::test]
async fn gets_template() -> Result<(), TestError> {
    let mut test = setup().await?;
    let template = test
        .template()
        .insert_template("Letter", "res.partner", None)
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let resp = get_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(template.id),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let result = get_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(template.id + 1),
    )
    .await;
    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn renames_template() -> Result<(), TestError> {
    let mut test = setup().await?;
    let template = test
        .template()
        .insert_template("Letter", "res.partner", None)
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let payload = UpdateTemplateDto {
        name: Some("Reminder".to_string()),
        file: None,
    };
    let resp = update_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(template.id),
        Json(payload),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let template: TemplateDto = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert_eq!(template.name, "Reminder");

    Ok(())
}

#[tokio::test]
async fn deletes_template() -> Result<(), TestError> {
    let mut test = setup().await?;
    let (template, _) = test
        .template()
        .insert_template_with_file("Letter", "res.partner", b"PK\x03\x04".to_vec())
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let resp = delete_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(template.id),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect the field tree to expand relationship fields into their related model
#[tokio::test]
async fn returns_field_tree() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let resp = get_template_fields(
        State(test.into_app_state()),
        test.session.clone(),
        Path("res.partner".to_string()),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let schema: serde_json::Value = serde_json::from_str(&body_string(resp.into_body()).await)?;
    assert_eq!(schema["model"], "res.partner");
    assert_eq!(schema["fields"][1]["name"], "country_id");
    assert_eq!(schema["fields"][1]["type"], "many2one");
    assert_eq!(schema["fields"][1]["related_model"], "res.country");
    assert_eq!(schema["fields"][1]["schema"]["fields"][0]["name"], "name");

    Ok(())
}

#[tokio::test]
async fn unknown_model_fields() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let result = get_template_fields(
        State(test.into_app_state()),
        test.session.clone(),
        Path("res.users".to_string()),
    )
    .await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
