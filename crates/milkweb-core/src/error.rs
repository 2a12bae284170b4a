//! Error types for milkweb-core

use milkweb_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Vendor data not loaded
    NotLoaded,
    /// Customer not found
    CustomerNotFound,
    /// Invalid date string
    InvalidDate,
    /// Invalid monetary amount
    InvalidAmount,
    /// Store error
    StoreError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::CustomerNotFound => write!(f, "CUSTOMER_NOT_FOUND"),
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::InvalidAmount => write!(f, "INVALID_AMOUNT"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
        }
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Vendor data has not been loaded")]
    NotLoaded,

    #[error("Customer not found: {id}")]
    CustomerNotFound { id: String },

    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::CustomerNotFound { .. } => ErrorCode::CustomerNotFound,
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            CoreError::StoreError(_) => ErrorCode::StoreError,
        }
    }
}
