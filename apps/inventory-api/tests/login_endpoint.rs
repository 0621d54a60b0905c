mod common;

use axum::http::{StatusCode, header};
use common::{bearer, register_and_login, spawn_app};
use inventory_api::{HealthResponse, config::AuthMode};
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let app = spawn_app(AuthMode::Session).await;

    for path in ["/", "/health"] {
        let res = app.server.get(path).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let health = res.json::<HealthResponse>();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert!(!health.message.is_empty());
    }
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_missing_fields() {
    let app = spawn_app(AuthMode::Session).await;
    let credentials = json!({ "username": "carol", "password": "pw" });

    let first = app.server.post("/auth/register").json(&credentials).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);
    let profile = first.json::<Value>();
    assert_eq!(profile["username"], "carol");
    assert_eq!(profile["userLevel"], "user");
    assert!(profile.get("passwordHash").is_none());

    let again = app.server.post("/auth/register").json(&credentials).await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
    assert_eq!(again.json::<Value>()["detail"], "User already exists");

    let incomplete = app
        .server
        .post("/auth/register")
        .json(&json!({ "username": "dave" }))
        .await;
    assert_eq!(incomplete.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_unauthorized() {
    let app = spawn_app(AuthMode::Session).await;
    register_and_login(&app.server, "erin", "right").await;

    for (username, password) in [("erin", "wrong"), ("nobody", "right")] {
        let res = app
            .server
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.json::<Value>()["detail"], "Invalid credentials");
    }

    let malformed = app
        .server
        .post("/auth/login")
        .text("{not json")
        .await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_reuses_token_and_logout_revokes_it() {
    let app = spawn_app(AuthMode::Session).await;
    let token = register_and_login(&app.server, "frank", "pw").await;
    assert!(token.starts_with("session-"));

    let second = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "frank", "password": "pw" }))
        .await
        .json::<Value>();
    assert_eq!(second["token"], token.as_str());
    assert_eq!(second["userLevel"], "user");

    let logout = app
        .server
        .post("/auth/logout")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(logout.status_code(), StatusCode::OK);

    let after = app
        .server
        .get("/users/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(after.status_code(), StatusCode::UNAUTHORIZED);

    // Logging out again with the dead token is rejected at the door
    let again = app
        .server
        .post("/auth/logout")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(again.status_code(), StatusCode::UNAUTHORIZED);

    let fresh = login(&app, "frank", "pw").await;
    assert_ne!(fresh, token);
}

async fn login(app: &common::TestApp, username: &str, password: &str) -> String {
    let res = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    res.json::<Value>()["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_validate_reports_level_for_live_tokens_only() {
    let app = spawn_app(AuthMode::Session).await;
    let token = register_and_login(&app.server, "gina", "pw").await;

    let valid = app
        .server
        .post("/auth/validate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(valid.status_code(), StatusCode::OK);
    assert_eq!(valid.json::<Value>(), json!({ "valid": true, "userLevel": "user" }));

    for body in [json!({ "token": "session-unknown" }), json!({ "token": "" }), json!({})] {
        let res = app.server.post("/auth/validate").json(&body).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.json::<Value>(), json!({ "valid": false }));
    }

    let logout = app
        .server
        .post("/auth/logout")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(logout.status_code(), StatusCode::OK);
    let revoked = app
        .server
        .post("/auth/validate")
        .json(&json!({ "token": token }))
        .await;
    assert_eq!(revoked.json::<Value>(), json!({ "valid": false }));
}

#[tokio::test]
async fn test_simultaneous_first_logins_get_a_working_token() {
    let app = spawn_app(AuthMode::Session).await;
    let credentials = json!({ "username": "hana", "password": "pw" });
    let registered = app.server.post("/auth/register").json(&credentials).await;
    assert_eq!(registered.status_code(), StatusCode::CREATED);

    let (first, second) = tokio::join!(
        app.server.post("/auth/login").json(&credentials).into_future(),
        app.server.post("/auth/login").json(&credentials).into_future(),
    );
    let first = first.json::<Value>()["token"].as_str().unwrap().to_string();
    let second = second.json::<Value>()["token"].as_str().unwrap().to_string();
    assert_eq!(first, second);

    let me = app
        .server
        .get("/users/me")
        .add_header(header::AUTHORIZATION, bearer(&first))
        .await;
    assert_eq!(me.status_code(), StatusCode::OK);
}
