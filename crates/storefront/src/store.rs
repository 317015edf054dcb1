//! The shopping store: cart and wishlist state over a storage port.
//!
//! # Contract
//!
//! - Both collections are JSON arrays of product snapshots under the keys in
//!   [`crate::storage::keys`].
//! - Reads never fail. A missing key, an unreadable backend, or malformed JSON
//!   all load as an empty collection.
//! - Every successful write is followed by a [`StoreEvent`] on the store's
//!   [`EventBus`]. No-op operations neither write nor publish.
//! - There is no locking around read-modify-write. The store is meant to be
//!   driven from one logical thread; concurrent writers (like two browser
//!   tabs) resolve as last writer wins.
//!
//! The operations themselves live in [`crate::cart`] and [`crate::wishlist`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cart::ShippingPolicy;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::events::{EventBus, StoreEvent, Subscription};
use crate::storage::{KeyValueStore, keys};

/// One of the two persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cart,
    Wishlist,
}

impl Collection {
    /// Storage key the collection is persisted under.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Cart => keys::CART,
            Self::Wishlist => keys::WISHLIST,
        }
    }

    /// Event published after the collection is written.
    #[must_use]
    pub const fn event(self) -> StoreEvent {
        match self {
            Self::Cart => StoreEvent::CartUpdated,
            Self::Wishlist => StoreEvent::WishlistUpdated,
        }
    }
}

/// Cart and wishlist state shared by every UI region.
///
/// This struct is cheaply cloneable via `Arc`; clones share the storage
/// backend and the event bus.
pub struct ShoppingStore<S> {
    inner: Arc<StoreInner<S>>,
}

struct StoreInner<S> {
    storage: S,
    events: EventBus,
    shipping: ShippingPolicy,
}

impl<S> Clone for ShoppingStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> ShoppingStore<S> {
    /// Create a store with default shipping rules and event capacity.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_parts(storage, EventBus::default(), ShippingPolicy::default())
    }

    /// Create a store configured from [`StorefrontConfig`].
    #[must_use]
    pub fn with_config(storage: S, config: &StorefrontConfig) -> Self {
        Self::with_parts(
            storage,
            EventBus::new(config.event_capacity),
            config.shipping,
        )
    }

    /// Create a store that publishes on an existing bus.
    #[must_use]
    pub fn with_parts(storage: S, events: EventBus, shipping: ShippingPolicy) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                storage,
                events,
                shipping,
            }),
        }
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Get a reference to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Subscribe to all store events.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.inner.events.subscribe()
    }

    /// Subscribe to cart changes only.
    #[must_use]
    pub fn subscribe_cart(&self) -> Subscription {
        self.inner.events.subscribe_to(StoreEvent::CartUpdated)
    }

    /// Subscribe to wishlist changes only.
    #[must_use]
    pub fn subscribe_wishlist(&self) -> Subscription {
        self.inner.events.subscribe_to(StoreEvent::WishlistUpdated)
    }

    #[must_use]
    pub fn shipping(&self) -> ShippingPolicy {
        self.inner.shipping
    }

    /// Read a collection, substituting an empty one on any failure.
    pub(crate) fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let key = collection.storage_key();
        let raw = match self.inner.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "Malformed collection JSON, treating as empty");
                Vec::new()
            }
        }
    }

    /// Write a collection, then announce it.
    pub(crate) fn commit<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let key = collection.storage_key();
        let json = serde_json::to_string(items)?;
        self.inner.storage.set_item(key, &json)?;
        debug!(key, items = items.len(), "Saved collection");

        self.inner.events.publish(collection.event());
        Ok(())
    }
}
