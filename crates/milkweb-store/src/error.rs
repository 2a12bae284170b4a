//! Error types for milkweb-store

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid data format in {location}: {message}")]
    InvalidFormat { location: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
