use axum::{Json, extract::State, http::StatusCode};
use inventory_core::domain::UserProfile;
use serde::Deserialize;

use crate::{
    AppState,
    error::{ApiError, AppJson},
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// POST /auth/register
pub async fn handle_register_user_request(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = app_state
        .store
        .register(payload.username.as_deref(), payload.password.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}
