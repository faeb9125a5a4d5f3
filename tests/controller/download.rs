//! Tests for the template download endpoint.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use docfill::server::{
    controller::download::{download_template, DownloadParams},
    error::{auth::AuthError, Error},
    model::session::user::SessionUserId,
    service::token::SecurityTokenMediator,
};

use super::*;

const TEMPLATE_BYTES: &[u8] = b"PK\x03\x04template";

/// User (ID 1) allowed to read template files & a template file (ID 1)
async fn setup() -> Result<TestContext, TestError> {
    let mut test = TestBuilder::new()
        .with_docfill_tables()
        .with_user(false)
        .with_access("docfill.attachment", None, true, false)
        .build()
        .await?;

    test.template()
        .insert_attachment("Quotation", TEMPLATE_BYTES.to_vec(), None)
        .await?;

    Ok(test)
}

/// Expect the raw template file as an attachment
#[tokio::test]
async fn downloads_with_token() -> Result<(), TestError> {
    let test = setup().await?;
    let token = SecurityTokenMediator::from_config(&test.config())
        .issue(1)
        .unwrap();

    let params = DownloadParams {
        oo_security_token: Some(token),
    };
    let resp = download_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(1),
        Query(params),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=Quotation.docx"
    );
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], TEMPLATE_BYTES);

    Ok(())
}

/// Expect a signed in user to download without a token
#[tokio::test]
async fn downloads_with_session() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let params = DownloadParams {
        oo_security_token: None,
    };
    let resp = download_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(1),
        Query(params),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect an empty token to fall back to the session
#[tokio::test]
async fn empty_token_uses_session() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let params = DownloadParams {
        oo_security_token: Some(String::new()),
    };
    let resp = download_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(1),
        Query(params),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect the missing token error without a token or a session
#[tokio::test]
async fn requires_token_or_session() -> Result<(), TestError> {
    let test = setup().await?;

    let params = DownloadParams {
        oo_security_token: None,
    };
    let result = download_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(1),
        Query(params),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::TokenMissing))
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_file() -> Result<(), TestError> {
    let test = setup().await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let params = DownloadParams {
        oo_security_token: None,
    };
    let result = download_template(
        State(test.into_app_state()),
        test.session.clone(),
        Path(7),
        Query(params),
    )
    .await;

    let resp = result.err().expect("error").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
