//! I/O error types

use thiserror::Error;

/// Errors that can occur while loading or saving tables
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Data file not found at {0}")]
    FileNotFound(String),

    #[error("Empty file found at {0}")]
    EmptyInput(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
