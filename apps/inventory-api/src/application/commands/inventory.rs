use axum::{
    Json,
    extract::{Extension, Path, State},
};
use inventory_core::domain::ScopedRecord;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    AppState,
    application::middleware::AuthenticatedUser,
    error::{ApiError, AppJson},
};

// POST /<collection>
pub async fn create_record<E>(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    AppJson(input): AppJson<E::Input>,
) -> Result<Json<E>, ApiError>
where
    E: ScopedRecord + Serialize,
    E::Input: DeserializeOwned,
{
    let created = app_state.store.create::<E>(input, ctx.user_id).await?;
    info!("{} created for user {}", E::NOUN, ctx.user_id);
    Ok(Json(created))
}

// PUT /<collection>/{id}, full replace of the mutable fields
pub async fn update_record<E>(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    AppJson(input): AppJson<E::Input>,
) -> Result<Json<E>, ApiError>
where
    E: ScopedRecord + Serialize,
    E::Input: DeserializeOwned,
{
    let updated = app_state.store.update::<E>(&id, input, ctx.user_id).await?;
    info!("{} {} updated for user {}", E::NOUN, id, ctx.user_id);
    Ok(Json(updated))
}

// DELETE /<collection>/{id}
pub async fn delete_record<E>(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    E: ScopedRecord,
{
    app_state.store.delete::<E>(&id, ctx.user_id).await?;
    info!("{} {} deleted for user {}", E::NOUN, id, ctx.user_id);
    Ok(Json(json!({
        "message": format!("{} {} deleted successfully", E::NOUN, id)
    })))
}
