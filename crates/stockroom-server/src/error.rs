//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from stockroom-core errors. Not-found family maps to 404,
// state and ownership violations to 409, per the error taxonomy.
impl From<stockroom_core::StockError> for ApiError {
    fn from(err: stockroom_core::StockError) -> Self {
        use stockroom_core::StockError;

        let code = err.code().as_str();
        match err {
            StockError::NotFound { message, .. } => {
                ApiError::new(StatusCode::NOT_FOUND, code, message)
            }
            StockError::HistoryNotFound { message, .. } => {
                ApiError::new(StatusCode::NOT_FOUND, code, message)
            }
            StockError::NoHistory { message, .. } => {
                ApiError::new(StatusCode::NOT_FOUND, code, message)
            }
            StockError::Mismatch { message, .. } => {
                ApiError::new(StatusCode::CONFLICT, code, message)
            }
            StockError::InvalidState { message, .. } => {
                ApiError::new(StatusCode::CONFLICT, code, message)
            }
            StockError::Validation { message, .. } => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
            }
            StockError::Configuration(msg) => ApiError::bad_request(msg),
            StockError::Database { message, .. } => {
                ApiError::internal(format!("Database error: {}", message))
            }
            StockError::Network { message, .. } => {
                ApiError::internal(format!("Network error: {}", message))
            }
            StockError::Serialization(e) => {
                ApiError::internal(format!("Serialization error: {}", e))
            }
            StockError::Io(e) => ApiError::internal(format!("IO error: {}", e)),
            StockError::Internal(msg) => ApiError::internal(msg),
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
