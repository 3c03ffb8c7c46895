use std::path::PathBuf;

/// Errors from library store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stored content could not be parsed as a library.
    #[error("corrupt library file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization failure while encoding the library.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
