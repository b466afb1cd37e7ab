//! Storage-specific errors

use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key cannot be used as a storage key
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Stored value is not valid JSON of the expected shape
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for orbit_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => Self::Serialization(e),
            StorageError::Io(e) => Self::Io(e),
            StorageError::InvalidKey(key) => {
                Self::storage(format!("Invalid storage key: {key:?}"))
            }
        }
    }
}
