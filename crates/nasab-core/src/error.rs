//! Error types for Nasab Core

use thiserror::Error;

/// Result type alias using Nasab's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Nasab error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ulid::DecodeError> for Error {
    fn from(e: ulid::DecodeError) -> Self {
        Self::InvalidId(e.to_string())
    }
}
