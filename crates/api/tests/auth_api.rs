//! Authentication rejection tests.
//!
//! Every `/api/v1` route requires a provider-issued Bearer token. These
//! cases all fail before any database access, so they run against the lazy
//! pool.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn error_code(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["code"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn missing_authorization_header_is_rejected() {
    let app = common::build_test_app(common::lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/equipment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHORIZED");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = common::build_test_app(common::lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/meter-readings")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let app = common::build_test_app(common::lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/suppliers")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHORIZED");
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let app = common::build_test_app(common::lazy_pool());

    // Signed with a secret the server does not trust.
    let claims = fleetlog_api::auth::token::Claims {
        sub: uuid::Uuid::new_v4(),
        exp: chrono::Utc::now().timestamp() + 600,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let response = app
        .oneshot(
            Request::get("/api/v1/fuel-logs")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHORIZED");
}

#[tokio::test]
async fn write_routes_reject_unauthenticated_posts() {
    let app = common::build_test_app(common::lazy_pool());

    let response = app
        .oneshot(
            Request::post("/api/v1/meter-readings")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"equipment_id":1,"reference_date":"2024-01-01","value":100.0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
