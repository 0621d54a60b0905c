use axum::{
    Json,
    extract::{Extension, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    AppState,
    application::middleware::AuthenticatedUser,
    error::{ApiError, AppJson},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// PUT /users/password
pub async fn handle_change_password_request(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    app_state
        .store
        .update_password(
            ctx.user_id,
            payload.current_password.as_deref(),
            payload.new_password.as_deref(),
        )
        .await?;
    info!("Password changed for user {}", ctx.user_id);

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
