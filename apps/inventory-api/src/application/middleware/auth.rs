use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use inventory_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AppState, error::ApiError};

// Owner resolved from the Authorization header; every scoped query uses it
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Resolves the caller through the configured `CredentialVerifier` and stores
/// the result as a request extension.
pub async fn resolve_identity(
    State(app_state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user_id = app_state.verifier.verify(credential).await?;
    debug!("Request authenticated for user: {}", user_id);

    req.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(req).await)
}
