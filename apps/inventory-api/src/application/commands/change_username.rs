use axum::{
    Json,
    extract::{Extension, State},
};
use inventory_core::domain::UserProfile;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    application::middleware::AuthenticatedUser,
    error::{ApiError, AppJson},
};

#[derive(Debug, Deserialize)]
pub struct ChangeUsernameRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeUsernameResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub message: String,
}

// PUT /users/username
pub async fn handle_change_username_request(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    AppJson(payload): AppJson<ChangeUsernameRequest>,
) -> Result<Json<ChangeUsernameResponse>, ApiError> {
    let profile = app_state
        .store
        .update_username(ctx.user_id, payload.username.as_deref())
        .await?;

    Ok(Json(ChangeUsernameResponse {
        profile,
        message: "Username updated successfully".to_string(),
    }))
}
