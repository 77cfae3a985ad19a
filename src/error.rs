//! Error types for lectern.

use thiserror::Error;

/// Common error type for lectern.
#[derive(Error, Debug)]
pub enum LecternError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the storage
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error for persisted records.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for LecternError {
    fn from(e: sqlx::Error) -> Self {
        LecternError::Database(e.to_string())
    }
}

impl From<reqwest::Error> for LecternError {
    fn from(e: reqwest::Error) -> Self {
        LecternError::Http(e.to_string())
    }
}

/// Result type alias for lectern operations.
pub type Result<T> = std::result::Result<T, LecternError>;
