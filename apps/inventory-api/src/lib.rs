use axum::{
    Json, Router, middleware,
    routing::{get, post, put},
};
use inventory_core::{
    CredentialVerifier, LegacyBearerVerifier, SessionTokenVerifier, SqliteStore,
    domain::{DataCenter, Device, Rack, Room, ScopedRecord, Service},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod application;
pub mod config;
pub mod error;

use application::{
    commands::{
        create_record, delete_record, handle_change_password_request,
        handle_change_username_request, handle_login_request, handle_logout_request,
        handle_register_user_request, handle_validate_token_request, update_record,
    },
    middleware::resolve_identity,
    query::{get_record, handle_current_user, list_records},
};
use config::AuthMode;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

// Holds shared dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(store: SqliteStore, auth_mode: AuthMode) -> Self {
        let verifier: Arc<dyn CredentialVerifier> = match auth_mode {
            AuthMode::Session => Arc::new(SessionTokenVerifier::new(store.clone())),
            AuthMode::Legacy => Arc::new(LegacyBearerVerifier),
        };
        Self { store, verifier }
    }
}

/// Mounts list/create on `path` and get/update/delete on `path/{id}`.
fn scoped_resource<E>(router: Router<AppState>, path: &str) -> Router<AppState>
where
    E: ScopedRecord + Serialize,
    E::Input: DeserializeOwned,
{
    router
        .route(path, get(list_records::<E>).post(create_record::<E>))
        .route(
            &format!("{path}/{{id}}"),
            get(get_record::<E>)
                .put(update_record::<E>)
                .delete(delete_record::<E>),
        )
}

pub fn create_app(app_state: AppState) -> Router {
    let mut protected = Router::new();
    protected = scoped_resource::<DataCenter>(protected, "/data-centers");
    protected = scoped_resource::<Room>(protected, "/rooms");
    protected = scoped_resource::<Rack>(protected, "/racks");
    protected = scoped_resource::<Service>(protected, "/services");
    protected = scoped_resource::<Device>(protected, "/devices");
    let protected = protected
        .route("/users/me", get(handle_current_user))
        .route("/users/username", put(handle_change_username_request))
        .route("/users/password", put(handle_change_password_request))
        .route("/auth/logout", post(handle_logout_request))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            resolve_identity,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/register", post(handle_register_user_request))
        .route("/auth/login", post(handle_login_request))
        .route("/auth/validate", post(handle_validate_token_request))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

fn healthy(message: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: message.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn root() -> Json<HealthResponse> {
    healthy("Inventory API is running")
}

pub async fn health() -> Json<HealthResponse> {
    healthy("Server is operational")
}
