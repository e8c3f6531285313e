use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::routes::test_support::send;
use crate::state::test_helpers;

#[tokio::test]
async fn me_requires_session() {
    let state = test_helpers::test_app_state();
    let (status, _) = send(&state, Method::GET, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_derives_user_from_email() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "jane.doe@acme.io", "password": "anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "jane.doe");
    assert_eq!(body["email"], "jane.doe@acme.io");
    assert_eq!(body["role"], "Support Agent");
    assert_eq!(body["avatar"], "J");

    let (status, me) = send(&state, Method::GET, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "jane.doe");
}

#[tokio::test]
async fn login_rejects_blank_fields() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E_VALIDATION");
    assert_eq!(body["fields"]["email"], "Email is required");
    assert_eq!(body["fields"]["password"], "Password is required");
    assert!(state.store.read().await.current_user().is_none());
}

#[tokio::test]
async fn register_reports_every_failing_field() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "password": "abc", "confirmPassword": "abd" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &body["fields"];
    assert_eq!(fields["name"], "Full name is required");
    assert_eq!(fields["password"], "Password must be at least 6 characters");
    assert_eq!(fields["confirmPassword"], "Passwords do not match");
    assert_eq!(fields["agreeTerms"], "You must agree to the terms");
}

#[tokio::test]
async fn register_creates_session() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "name": "Ada Agent",
            "email": "ada@acme.io",
            "password": "secret1",
            "confirmPassword": "secret1",
            "company": "Acme",
            "agreeTerms": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ada Agent");
    assert_eq!(body["company"], "Acme");
}

#[tokio::test]
async fn demo_then_logout_clears_session() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(&state, Method::POST, "/api/auth/demo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "demo@supportpro.com");

    let (status, _) = send(&state, Method::POST, "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&state, Method::GET, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_is_noop() {
    let state = test_helpers::test_app_state();
    let (status, _) = send(&state, Method::POST, "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_login_body_gets_json_error() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(&state, Method::POST, "/api/auth/login", Some(json!({ "email": 42 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E_INVALID_BODY");
    assert!(body["message"].as_str().unwrap().contains("email"));
    assert!(body.get("fields").is_none());
}
