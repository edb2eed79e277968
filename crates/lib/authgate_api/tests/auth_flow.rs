//! Integration tests — build the router over the in-memory backend and
//! drive the register/login/refresh/logout flows end to end.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use authgate_api::config::ApiConfig;
use authgate_api::{AppState, router};
use authgate_core::auth::jwt::TokenIssuer;
use authgate_core::auth::memory::MemoryAuthBackend;

fn test_app() -> Router {
    let backend = Arc::new(MemoryAuthBackend::new());
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        jwt_secret: "test-secret".into(),
        token_issuer: "authgate".into(),
        token_audience: "authgate-clients".into(),
        allowed_origins: vec!["*".into()],
    };
    let state = AppState {
        directory: backend.clone(),
        renewal: backend,
        issuer: Arc::new(TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            &config.token_issuer,
            &config.token_audience,
        )),
        config,
    };
    router(state)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        post_json(
            "/auth/register",
            serde_json::json!({"email": email, "password": password}),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        post_json(
            "/auth/login",
            serde_json::json!({"email": email, "password": password}),
        ),
    )
    .await
}

async fn refresh(app: &Router, token: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        post_json("/auth/refresh", serde_json::json!({"refreshToken": token})),
    )
    .await
}

#[tokio::test]
async fn register_then_login_returns_well_formed_session() {
    let app = test_app();

    let (status, body) = register(&app, "a@x.com", "Passw0rd!").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!("User registered successfully", body["message"]);

    let (status, body) = login(&app, "a@x.com", "Passw0rd!").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!("Bearer", body["tokenType"]);
    assert_eq!(3600, body["expiresIn"]);
    assert!(!body["accessToken"].as_str().expect("accessToken").is_empty());
    assert!(
        !body["refreshToken"]
            .as_str()
            .expect("refreshToken")
            .is_empty()
    );
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app();
    register(&app, "a@x.com", "Passw0rd!").await;

    let (wrong_pw_status, wrong_pw_body) = login(&app, "a@x.com", "not-the-password").await;
    let (no_user_status, no_user_body) = login(&app, "ghost@x.com", "whatever-pw").await;

    assert_eq!(StatusCode::UNAUTHORIZED, wrong_pw_status);
    assert_eq!(StatusCode::UNAUTHORIZED, no_user_status);
    // Identical bodies: the response must not reveal which case occurred.
    assert_eq!(wrong_pw_body, no_user_body);
    assert_eq!("Invalid email or password", wrong_pw_body["message"]);
}

#[tokio::test]
async fn register_rejects_missing_fields_with_field_errors() {
    let app = test_app();

    let (status, body) = register(&app, "", "").await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!("Invalid request", body["message"]);
    assert!(body["errors"]["email"][0].is_string());
    assert!(body["errors"]["password"][0].is_string());
}

#[tokio::test]
async fn register_rejects_duplicate_email_and_weak_password() {
    let app = test_app();
    register(&app, "a@x.com", "Passw0rd!").await;

    let (status, body) = register(&app, "a@x.com", "Passw0rd!").await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!("Registration failed", body["message"]);
    let messages = body["errors"]["errors"].as_array().expect("errors list");
    assert!(
        messages
            .iter()
            .any(|m| m.as_str().unwrap().contains("already registered"))
    );

    let (status, body) = register(&app, "b@x.com", "short").await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    let messages = body["errors"]["errors"].as_array().expect("errors list");
    assert!(
        messages
            .iter()
            .any(|m| m.as_str().unwrap().contains("at least 8"))
    );
}

#[tokio::test]
async fn refresh_rotates_and_invalidates_the_old_token() {
    let app = test_app();
    register(&app, "a@x.com", "Passw0rd!").await;
    let (_, session) = login(&app, "a@x.com", "Passw0rd!").await;
    let r1 = session["refreshToken"].as_str().expect("refreshToken");

    let (status, rotated) = refresh(&app, r1).await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!("Bearer", rotated["tokenType"]);
    assert_eq!(3600, rotated["expiresIn"]);
    let r2 = rotated["refreshToken"].as_str().expect("refreshToken");
    assert_ne!(r1, r2);

    // The rotated-out token no longer works.
    let (status, body) = refresh(&app, r1).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
    assert_eq!("Invalid or expired refresh token", body["message"]);

    // The replacement does.
    let (status, _) = refresh(&app, r2).await;
    assert_eq!(StatusCode::OK, status);
}

#[tokio::test]
async fn second_login_invalidates_the_first_renewal_token() {
    let app = test_app();
    register(&app, "a@x.com", "Passw0rd!").await;

    let (_, first) = login(&app, "a@x.com", "Passw0rd!").await;
    let (_, second) = login(&app, "a@x.com", "Passw0rd!").await;
    let r1 = first["refreshToken"].as_str().expect("refreshToken");
    let r2 = second["refreshToken"].as_str().expect("refreshToken");
    assert_ne!(r1, r2);

    let (status, _) = refresh(&app, r1).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
    let (status, _) = refresh(&app, r2).await;
    assert_eq!(StatusCode::OK, status);
}

#[tokio::test]
async fn refresh_without_a_token_is_a_client_error() {
    let app = test_app();

    let (status, body) = send(&app, post_json("/auth/refresh", serde_json::json!({}))).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!("Refresh token is required", body["message"]);

    let (status, _) = refresh(&app, "").await;
    assert_eq!(StatusCode::BAD_REQUEST, status);

    let (status, body) = refresh(&app, "never-issued-token").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
    assert_eq!("Invalid or expired refresh token", body["message"]);
}

#[tokio::test]
async fn logout_requires_a_bearer_token() {
    let app = test_app();

    let (status, _) = send(&app, post_json("/auth/logout", serde_json::json!({}))).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);

    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::from("{}"))
        .expect("request");
    let (status, _) = send(&app, req).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
}

#[tokio::test]
async fn logout_is_idempotent_and_ends_the_session() {
    let app = test_app();
    register(&app, "a@x.com", "Passw0rd!").await;
    let (_, session) = login(&app, "a@x.com", "Passw0rd!").await;
    let access = session["accessToken"].as_str().expect("accessToken");
    let renewal = session["refreshToken"].as_str().expect("refreshToken");

    let logout_req = |access: &str| {
        Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {access}"))
            .body(Body::from("{}"))
            .expect("request")
    };

    let (status, body) = send(&app, logout_req(access)).await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!("Logged out successfully", body["message"]);

    // Second logout with no live token still reports success.
    let (status, _) = send(&app, logout_req(access)).await;
    assert_eq!(StatusCode::OK, status);

    // The revoked renewal token is gone for good.
    let (status, _) = refresh(&app, renewal).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = test_app();

    let (status, _) = register(&app, "a@x.com", "Passw0rd!").await;
    assert_eq!(StatusCode::OK, status);

    let (status, session) = login(&app, "a@x.com", "Passw0rd!").await;
    assert_eq!(StatusCode::OK, status);
    let r1 = session["refreshToken"].as_str().expect("refreshToken");

    let (status, rotated) = refresh(&app, r1).await;
    assert_eq!(StatusCode::OK, status);
    let r2 = rotated["refreshToken"].as_str().expect("refreshToken");
    assert_ne!(r1, r2);

    let (status, _) = refresh(&app, r1).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status);
}
