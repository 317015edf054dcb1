//! Integration tests for Trocly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trocly-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Cart and wishlist scenarios against the built-in catalog
//! - `file_persistence` - State surviving a store restart on disk
//! - `listeners` - Badges and indicators following writes from other handles
//!
//! Nothing here needs external services. File-backed tests write to a
//! `tempfile` directory via [`file_fixture`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use tempfile::TempDir;
use trocly_storefront::{Catalog, FileStorage, MemoryStorage, ShoppingStore};

/// A file-backed store in a fresh temp directory.
///
/// The directory is deleted when the returned [`TempDir`] drops.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn file_fixture() -> (TempDir, ShoppingStore<FileStorage>) {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let store = open_store(dir.path());
    (dir, store)
}

/// Open a file-backed store over an existing data directory.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn open_store(dir: &Path) -> ShoppingStore<FileStorage> {
    ShoppingStore::new(FileStorage::open(dir).expect("storage dir should open"))
}

/// A memory-backed store and the built-in catalog.
///
/// # Panics
///
/// Panics if the bundled catalog fails to parse.
#[must_use]
pub fn memory_fixture() -> (ShoppingStore<MemoryStorage>, Catalog) {
    (
        ShoppingStore::new(MemoryStorage::new()),
        Catalog::builtin().expect("built-in catalog should parse"),
    )
}
