//! Trocly Storefront library.
//!
//! Client-side shopping state for the storefront: a cart and a wishlist
//! persisted through a pluggable key-value storage port, change events for
//! listeners, and the static product catalog those collections draw from.
//!
//! # Modules
//!
//! - [`store`] - [`ShoppingStore`], shared by every UI region
//! - [`cart`] / [`wishlist`] - Collection operations and their outcomes
//! - [`storage`] - Storage port plus memory and file backends
//! - [`events`] - `cartUpdated` / `wishlistUpdated` publish/subscribe
//! - [`badge`] - Listeners that re-read state on change
//! - [`catalog`] - Product lookup, filters, sorting, search
//! - [`notice`] - Toast messages derived from outcomes
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod badge;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod notice;
pub mod storage;
pub mod store;
pub mod wishlist;

#[cfg(test)]
mod test_support;

pub use cart::{AddOutcome, CartItem, CartSummary, QuantityOutcome, RemoveOutcome, ShippingPolicy};
pub use catalog::{Catalog, CatalogQuery, FeaturedTab, SortOrder};
pub use config::StorefrontConfig;
pub use error::StoreError;
pub use events::{EventBus, StoreEvent, Subscription};
pub use notice::{Notice, NoticeLevel};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{Collection, ShoppingStore};
pub use wishlist::{MovedToCart, WishlistToggle};
