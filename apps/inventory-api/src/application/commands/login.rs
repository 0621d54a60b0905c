use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use inventory_core::{CoreError, domain::Session, identity::bearer_token};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::register_user::CredentialsRequest;
use crate::{
    AppState,
    error::{ApiError, AppJson},
};

// POST /auth/login
pub async fn handle_login_request(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<Json<Session>, ApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(CoreError::Validation("Username and password are required".into()).into());
    };

    let session = app_state.store.login(&username, &password).await?;
    Ok(Json(session))
}

// POST /auth/logout; sits behind identity resolution so the token is known to be live
pub async fn handle_logout_request(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(bearer_token)
        .filter(|token| !token.is_empty())
    {
        app_state.store.logout(token).await?;
        info!("Session token revoked");
    }
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(rename = "userLevel", skip_serializing_if = "Option::is_none")]
    pub user_level: Option<String>,
}

// POST /auth/validate; an unknown token is a normal answer, not an error
pub async fn handle_validate_token_request(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<ValidateTokenRequest>,
) -> Result<Json<ValidateTokenResponse>, ApiError> {
    let user_level = match payload.token.as_deref().map(bearer_token) {
        Some(token) if !token.is_empty() => app_state.store.token_user_level(token).await?,
        _ => None,
    };
    Ok(Json(ValidateTokenResponse {
        valid: user_level.is_some(),
        user_level,
    }))
}
