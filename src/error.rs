//! Error types for the notebin core
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the rendering layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("identifier already taken: {0}")]
    Conflict(String),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("password mismatch")]
    Unauthorized,

    #[error("storage deadline exceeded")]
    Timeout,

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("password hash error: {0}")]
    PasswordHash(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
