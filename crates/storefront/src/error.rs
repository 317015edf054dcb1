//! Store error types.
//!
//! Reads never surface errors (a broken or missing value loads as an empty
//! collection). Only writes can fail, and only because the backend did.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by mutating store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The collection could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
