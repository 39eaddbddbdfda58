#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taxi_api::auth::password::hash_password;
use taxi_api::config::{AuthConfig, ServerConfig};
use taxi_api::router::build_app_router;
use taxi_api::state::AppState;
use taxi_db::models::driver::{CreateDriver, Driver};
use taxi_db::repositories::DriverRepo;

/// Plaintext password given to every driver created through [`create_driver`].
pub const TEST_PASSWORD: &str = "user12test";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        auth: AuthConfig {
            jwt_secret: "test-secret-for-integration-tests".to_string(),
            access_token_ttl_mins: 15,
            refresh_token_ttl_days: 7,
        },
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a driver directly, bypassing the creation form.
pub async fn create_driver(pool: &PgPool, username: &str, license_number: &str) -> Driver {
    let input = CreateDriver {
        username: username.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: None,
        license_number: license_number.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    DriverRepo::create(pool, &input)
        .await
        .expect("driver creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login_token(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Create a driver named `test` and return a token for them.
pub async fn logged_in(pool: &PgPool, app: Router) -> (Driver, String) {
    let driver = create_driver(pool, "test", "TST00001").await;
    let token = login_token(app, "test").await;
    (driver, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
