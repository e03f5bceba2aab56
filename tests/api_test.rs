//! HTTP tests: the full router over an in-memory SQLite database.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::test_database;
use shift_planner::api::{create_router, AppState};
use shift_planner::config::Config;
use shift_planner::domain::UserRole;
use shift_planner::infra::Persistence;
use shift_planner::services::{AuthService, Authenticator, Claims};

const SECRET: &str = "integration-test-secret-at-least-32-chars";
const PASSWORD: &str = "correct-horse-battery";

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let database = Arc::new(test_database().await);
        let config = Config::builder("sqlite::memory:", SECRET).unwrap();

        let auth = Authenticator::new(
            Arc::new(Persistence::new(database.get_connection())),
            config.clone(),
        );
        auth.create_user("planner".into(), PASSWORD.into(), UserRole::Admin)
            .await
            .unwrap();
        auth.create_user("viewer".into(), PASSWORD.into(), UserRole::User)
            .await
            .unwrap();

        Self {
            router: create_router(AppState::from_config(database, config)),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/login",
                None,
                Some(json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

fn token_with_role(role: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: 1,
        username: "planner".to_string(),
        role: role.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_health_and_root_are_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");

    let (status, _) = app.send(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_returns_token_and_role() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "planner", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_failures_share_one_status() {
    let app = TestApp::new().await;

    let (wrong_password, _) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "planner", "password": "not-the-password" })),
        )
        .await;
    let (unknown_user, _) = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "nobody", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_token_echoes_identity() {
    let app = TestApp::new().await;
    let token = app.login("viewer").await;

    let (status, body) = app.send(Method::GET, "/verify-token", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "viewer");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/employees", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/add_ce", None, Some(json!({ "name": "CE 1" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let app = TestApp::new().await;
    let token = token_with_role("superuser");

    let (status, _) = app.send(Method::GET, "/ces", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_admin_cannot_mutate() {
    let app = TestApp::new().await;
    let token = app.login("viewer").await;

    let (status, _) = app
        .send(Method::POST, "/add_ce", Some(&token), Some(json!({ "name": "CE 1" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::GET, "/ces", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_planning_requires_week() {
    let app = TestApp::new().await;
    let token = app.login("viewer").await;

    let (status, _) = app.send(Method::GET, "/planning", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::GET, "/planning?week=10&year=2099", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_swap_confirmation_round_trip() {
    let app = TestApp::new().await;
    let token = app.login("planner").await;
    let admin = Some(token.as_str());

    let mut ids = Vec::new();
    for name in ["CE 1", "CE 2"] {
        let (status, body) = app
            .send(Method::POST, "/add_ce", admin, Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_i64().unwrap());
    }
    let (_, sector) = app
        .send(Method::POST, "/add_sector", admin, Some(json!({ "name": "A" })))
        .await;
    let sector_id = sector["id"].as_i64().unwrap();

    let (_, ada) = app
        .send(
            Method::POST,
            "/add_employee",
            admin,
            Some(json!({ "name": "Ada", "ce_id": ids[0], "sector_id": sector_id })),
        )
        .await;
    let (_, bob) = app
        .send(
            Method::POST,
            "/add_employee",
            admin,
            Some(json!({ "name": "Bob", "ce_id": ids[1], "sector_id": sector_id })),
        )
        .await;
    let ada_id = ada["id"].as_i64().unwrap();

    let uri = format!("/update_employee/{}", ada_id);
    let (status, body) = app
        .send(Method::PUT, &uri, admin, Some(json!({ "ce_id": ids[1] })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresSwap"], true);
    assert_eq!(body["existingEmployee"]["id"], bob["id"]);

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            admin,
            Some(json!({ "ce_id": ids[1], "swap": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ce_id"], ids[1]);
    assert!(body.get("requiresSwap").is_none());

    let (_, listing) = app
        .send(
            Method::GET,
            &format!("/employees?ce_id={}", ids[0]),
            admin,
            None,
        )
        .await;
    assert_eq!(listing[0]["name"], "Bob");
}

#[tokio::test]
async fn test_error_body_carries_code() {
    let app = TestApp::new().await;
    let token = app.login("planner").await;

    let (status, body) = app
        .send(Method::DELETE, "/delete_planning/42", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.login("planner").await;

    let (status, body) = app
        .send(Method::POST, "/add_ce", Some(&token), Some(json!({ "label": "CE 1" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = app
        .send(Method::POST, "/add_ce", Some(&token), Some(json!({ "name": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
