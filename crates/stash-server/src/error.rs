use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stash_core::error::AppError;

use crate::dto::ErrorResponse;

/// Body message for every 401, recognizable by clients scanning for it.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(reason.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::SerializationError(_) => (StatusCode::BAD_REQUEST, "serialization_error"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Generic(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        // Auth failure details and server-side causes stay in the logs.
        let message = match &self.0 {
            AppError::Unauthorized(reason) => {
                tracing::debug!(%reason, "Rejected request");
                UNAUTHORIZED_MESSAGE.to_string()
            }
            err if status.is_server_error() => {
                tracing::error!(error = %err, "Request failed");
                "Internal server error".to_string()
            }
            err => err.to_string(),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
