//! Trocly Core - Shared types library.
//!
//! This crate provides common types used across all Trocly components:
//! - `storefront` - Cart/wishlist store, catalog queries and change events
//! - `cli` - Command-line driver for the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no
//! storage access, no event plumbing. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, decimal prices, and catalog product records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
