//! Error types for milkweb-export

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("PDF error: {message}")]
    PdfError { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Export produced invalid UTF-8")]
    InvalidUtf8,
}
