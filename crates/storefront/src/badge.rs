//! Listeners that mirror store state for small UI regions.
//!
//! Each listener owns a [`Subscription`] and a cached view. On a signal it
//! throws the view away and re-reads from the store; it never patches the
//! cache from event contents (events carry none).

use trocly_core::ProductId;

use crate::events::Subscription;
use crate::storage::KeyValueStore;
use crate::store::ShoppingStore;

/// Cart item counter for the navigation bar.
pub struct CartBadge<S> {
    store: ShoppingStore<S>,
    subscription: Subscription,
    count: usize,
}

impl<S: KeyValueStore> CartBadge<S> {
    /// Subscribe to cart changes and read the initial count.
    #[must_use]
    pub fn new(store: ShoppingStore<S>) -> Self {
        let subscription = store.subscribe_cart();
        let count = store.cart_count();
        Self {
            store,
            subscription,
            count,
        }
    }

    /// The last count read.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Re-read the count if the cart changed since the last refresh.
    ///
    /// Returns `true` if a re-read happened.
    pub fn refresh(&mut self) -> bool {
        if !self.subscription.poll_changed() {
            return false;
        }
        self.count = self.store.cart_count();
        true
    }

    /// Wait for the next cart change and return the new count.
    ///
    /// Returns `None` once the store's event bus is gone.
    pub async fn next_count(&mut self) -> Option<usize> {
        if !self.subscription.changed().await {
            return None;
        }
        self.count = self.store.cart_count();
        Some(self.count)
    }
}

/// Cart and wishlist membership of one product, for card buttons.
pub struct ProductIndicator<S> {
    store: ShoppingStore<S>,
    subscription: Subscription,
    product_id: ProductId,
    in_cart: bool,
    wishlisted: bool,
}

impl<S: KeyValueStore> ProductIndicator<S> {
    #[must_use]
    pub fn new(store: ShoppingStore<S>, product_id: ProductId) -> Self {
        let subscription = store.subscribe();
        let in_cart = store.in_cart(product_id);
        let wishlisted = store.wishlist_status(product_id);
        Self {
            store,
            subscription,
            product_id,
            in_cart,
            wishlisted,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub const fn in_cart(&self) -> bool {
        self.in_cart
    }

    #[must_use]
    pub const fn wishlisted(&self) -> bool {
        self.wishlisted
    }

    /// Re-read both flags if either collection changed.
    pub fn refresh(&mut self) -> bool {
        if !self.subscription.poll_changed() {
            return false;
        }
        self.in_cart = self.store.in_cart(self.product_id);
        self.wishlisted = self.store.wishlist_status(self.product_id);
        true
    }
}
