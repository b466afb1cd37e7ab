//! Core error types for Orbit

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Orbit
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend (data collaborator) errors
    #[error("Backend error: {0}")]
    Backend(String),

    /// Client-side storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// No authenticated user for a per-user operation
    #[error("Not signed in")]
    NotSignedIn,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
