use axum::{
    Json,
    extract::{Extension, Path, State},
};
use inventory_core::domain::{ScopedRecord, UserProfile};
use serde::Serialize;
use tracing::debug;

use super::middleware::AuthenticatedUser;
use crate::{AppState, error::ApiError};

// GET /<collection>, newest first
pub async fn list_records<E>(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<E>>, ApiError>
where
    E: ScopedRecord + Serialize,
{
    let rows = app_state.store.list::<E>(ctx.user_id).await?;
    debug!("Listed {} rows from {} for user {}", rows.len(), E::TABLE, ctx.user_id);
    Ok(Json(rows))
}

// GET /<collection>/{id}
pub async fn get_record<E>(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<E>, ApiError>
where
    E: ScopedRecord + Serialize,
{
    let row = app_state.store.get::<E>(&id, ctx.user_id).await?;
    Ok(Json(row))
}

// GET /users/me
pub async fn handle_current_user(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = app_state.store.current_user(ctx.user_id).await?;
    Ok(Json(profile))
}
