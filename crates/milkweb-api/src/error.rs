//! Error types for milkweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use milkweb_core::CoreError;
use milkweb_export::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() }).to_string();
        (self.status(), body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound { id } => ApiError::NotFound {
                resource: format!("customer {}", id),
            },
            CoreError::InvalidDate { .. } | CoreError::InvalidAmount { .. } => {
                ApiError::BadRequest {
                    message: err.to_string(),
                }
            }
            other => ApiError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::InternalError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::CustomerNotFound { id: "c9".to_string() }.into();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = CoreError::InvalidAmount { reason: "negative".to_string() }.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = CoreError::NotLoaded.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
