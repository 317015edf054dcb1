//! Durable key-value storage port.
//!
//! The store never touches a concrete backend; it talks to a
//! [`KeyValueStore`], which mirrors the browser's `localStorage` surface
//! (string keys, string values, get/set/remove).
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, used in tests and embedding
//! - [`FileStorage`] - one JSON document per key inside a data directory

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys for the persisted collections.
pub mod keys {
    /// Key for the JSON array of cart entries.
    pub const CART: &str = "cart";

    /// Key for the JSON array of wishlisted products.
    pub const WISHLIST: &str = "wishlist";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A writer panicked while holding the backend lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Port for durable string storage keyed by name.
///
/// Implementations must be safe to share; the store holds one behind an
/// `Arc` and may be cloned into several UI regions.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
