#![allow(dead_code)]

use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use inventory_api::{AppState, config::AuthMode, create_app};
use inventory_core::SqliteStore;
use serde_json::{Value, json};
use tempfile::TempDir;

// Keeps the temporary database alive for as long as the server is used
pub struct TestApp {
    pub server: TestServer,
    pub store: SqliteStore,
    _dir: TempDir,
}

pub async fn spawn_app(mode: AuthMode) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SqliteStore::open(dir.path().join("inventory.db"), 5)
        .await
        .expect("open test database");
    let app = create_app(AppState::new(store.clone(), mode));
    let server = TestServer::new(app).expect("Failed to create TestServer");
    TestApp {
        server,
        store,
        _dir: dir,
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value")
}

/// Registers `username` and logs in, returning the session token.
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    let credentials = json!({ "username": username, "password": password });

    let registered = server.post("/auth/register").json(&credentials).await;
    assert_eq!(registered.status_code(), StatusCode::CREATED);

    let login = server.post("/auth/login").json(&credentials).await;
    assert_eq!(login.status_code(), StatusCode::OK);
    login.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

pub fn timestamp(value: &Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .expect("timestamp string")
        .parse()
        .expect("RFC 3339 timestamp")
}
