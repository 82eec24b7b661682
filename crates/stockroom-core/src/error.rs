//! Error types for stockroom operations.
//!
//! Every domain error here is local, synchronous, and non-retryable: it aborts
//! the operation before any mutation is persisted. Structured error codes are
//! provided for programmatic handling at the API boundary.

use thiserror::Error;

use crate::types::{HistoryId, ProductId};

/// Result type alias for stockroom operations.
pub type StockResult<T> = Result<T, StockError>;

/// Main error type for all stockroom operations.
#[derive(Error, Debug)]
pub enum StockError {
    /// Product not found.
    #[error("Product not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        product_id: Option<ProductId>,
    },

    /// History record not found.
    #[error("History record not found: {message}")]
    HistoryNotFound {
        message: String,
        code: ErrorCode,
        history_id: Option<HistoryId>,
    },

    /// Revert requested with no snapshots recorded.
    #[error("No history recorded: {message}")]
    NoHistory {
        message: String,
        code: ErrorCode,
        product_id: ProductId,
    },

    /// History record belongs to a different product.
    #[error("History mismatch: {message}")]
    Mismatch {
        message: String,
        code: ErrorCode,
        history_id: HistoryId,
        product_id: ProductId,
    },

    /// Operation not valid for the product's current state.
    #[error("Invalid state: {message}")]
    InvalidState { message: String, code: ErrorCode },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// Database operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network error (client-side).
    #[error("Network error: {message}")]
    Network {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Product (PRD_xxx)
    ProductNotFound,
    ProductNotDeleted,

    // History (HIS_xxx)
    HistoryNotFound,
    HistoryEmpty,
    HistoryMismatch,

    // Validation (VAL_xxx)
    ValInvalidInput,

    // Database (DB_xxx)
    DbOperationFailed,

    // Network (NET_xxx)
    NetConnectionFailed,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ProductNotFound => "PRD_001",
            ErrorCode::ProductNotDeleted => "PRD_002",
            ErrorCode::HistoryNotFound => "HIS_001",
            ErrorCode::HistoryEmpty => "HIS_002",
            ErrorCode::HistoryMismatch => "HIS_003",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::DbOperationFailed => "DB_001",
            ErrorCode::NetConnectionFailed => "NET_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl StockError {
    /// Create a product not-found error.
    pub fn not_found(product_id: ProductId) -> Self {
        Self::NotFound {
            message: format!("Product with id {} not found", product_id),
            code: ErrorCode::ProductNotFound,
            product_id: Some(product_id),
        }
    }

    /// Create a history not-found error.
    pub fn history_not_found(history_id: HistoryId) -> Self {
        Self::HistoryNotFound {
            message: format!("History record with id {} not found", history_id),
            code: ErrorCode::HistoryNotFound,
            history_id: Some(history_id),
        }
    }

    /// Create a no-history error for a revert with zero snapshots.
    pub fn no_history(product_id: ProductId) -> Self {
        Self::NoHistory {
            message: format!("No history recorded for product {}", product_id),
            code: ErrorCode::HistoryEmpty,
            product_id,
        }
    }

    /// Create a mismatch error for a snapshot owned by another product.
    pub fn mismatch(history_id: HistoryId, product_id: ProductId) -> Self {
        Self::Mismatch {
            message: format!(
                "History record {} does not belong to product {}",
                history_id, product_id
            ),
            code: ErrorCode::HistoryMismatch,
            history_id,
            product_id,
        }
    }

    /// Create an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
            code: ErrorCode::ProductNotDeleted,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            code: ErrorCode::DbOperationFailed,
            source: None,
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            code: ErrorCode::NetConnectionFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } => *code,
            Self::HistoryNotFound { code, .. } => *code,
            Self::NoHistory { code, .. } => *code,
            Self::Mismatch { code, .. } => *code,
            Self::InvalidState { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Database { code, .. } => *code,
            Self::Network { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Convert from HTTP status code (for client errors).
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            404 => Self::NotFound {
                message: body.to_string(),
                code: ErrorCode::ProductNotFound,
                product_id: None,
            },
            409 => Self::InvalidState {
                message: body.to_string(),
                code: ErrorCode::ProductNotDeleted,
            },
            422 => Self::Validation {
                message: body.to_string(),
                code: ErrorCode::ValInvalidInput,
            },
            _ => Self::Internal(format!("HTTP {}: {}", status, body)),
        }
    }
}

impl From<rusqlite::Error> for StockError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            code: ErrorCode::DbOperationFailed,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StockError::not_found(7);
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_mismatch_error() {
        let err = StockError::mismatch(3, 1);
        assert_eq!(err.code(), ErrorCode::HistoryMismatch);
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ProductNotFound.as_str(), "PRD_001");
        assert_eq!(ErrorCode::HistoryMismatch.as_str(), "HIS_003");
    }

    #[test]
    fn test_from_http_status() {
        let err = StockError::from_http_status(404, "gone");
        assert!(matches!(err, StockError::NotFound { .. }));

        let err = StockError::from_http_status(409, "not deleted");
        assert!(matches!(err, StockError::InvalidState { .. }));
    }
}
