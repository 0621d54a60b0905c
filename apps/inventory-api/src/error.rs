use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use inventory_core::CoreError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by every handler. Rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

// Malformed or incomplete JSON is the client's fault, never a 422
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(CoreError::Validation(rejection.body_text()))
    }
}

/// `axum::Json` with rejections routed through [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

pub fn map_core_error(err: &CoreError) -> StatusCode {
    match err {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Connection(_) | CoreError::Storage(_) | CoreError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// Server-side failures are logged in full and answered with a fixed message
fn public_detail(err: &CoreError) -> String {
    match err {
        CoreError::Connection(_) => "Database connection failed".to_string(),
        CoreError::Storage(_) => "Database error".to_string(),
        CoreError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = map_core_error(&self.0);
        if self.0.is_server_error() {
            error!("CoreError occurred: {:?}", self.0);
        } else {
            warn!("Request rejected ({}): {}", status, self.0);
        }
        let body = Json(json!({ "detail": public_detail(&self.0) }));
        (status, body).into_response()
    }
}
