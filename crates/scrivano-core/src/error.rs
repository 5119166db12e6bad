//! Error types for scrivano.

use thiserror::Error;

/// Result type alias using scrivano's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scrivano operations.
///
/// The entity store signals absence with [`Error::NotFound`] and nothing
/// else; it never distinguishes "does not exist" from "exists but owned by
/// someone else". Validation failures originate at the HTTP boundary as
/// [`Error::InvalidInput`].
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found (or not owned by the caller).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Content analysis failed (provider, parse, or normalization error)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
