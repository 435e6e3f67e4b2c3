//! Shared helpers for integration tests
//!
//! Every test builds the full application (all middleware layers, real
//! router) over a fresh SQLite database inside a TempDir. In-memory
//! SQLite is avoided here: the pool opens several connections and each
//! `:memory:` connection would see its own empty database.

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use widget_server::db::models::AdminAccountCreate;
use widget_server::db::repository::admin_account;
use widget_server::{Config, ServerState, build_app};

/// Fresh server state over a temp work dir. Keep the TempDir alive for
/// the duration of the test or the database files vanish.
pub async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp work dir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (state, dir)
}

/// The fully configured application, same as the one `Server::run` serves
pub fn app(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::empty())
        .expect("Failed to build request")
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Create an inbox account directly through the repository
pub async fn seed_admin(state: &ServerState, shop: &str, username: &str, password: &str) {
    admin_account::create(
        &state.pool,
        AdminAccountCreate {
            shop: shop.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            display_name: None,
        },
    )
    .await
    .expect("Failed to seed admin account");
}

/// Log in through the real endpoint and return the bearer token
pub async fn login(app: &Router, shop: &str, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({
                "shop": shop,
                "username": username,
                "password": password,
            }),
            None,
        ))
        .await
        .expect("Login request failed");

    assert_eq!(response.status(), StatusCode::OK, "Login should succeed");

    let body = read_json(response).await;
    body["token"]
        .as_str()
        .expect("Login response must carry a token")
        .to_string()
}
