//! Wishlist operations.
//!
//! The wishlist is an ordered list of product snapshots, unique by id, with
//! toggle membership: adding a product that is already saved removes it.

use tracing::{info, instrument};
use trocly_core::{Product, ProductId};

use crate::cart::{AddOutcome, RemoveOutcome};
use crate::error::Result;
use crate::notice::Notice;
use crate::storage::KeyValueStore;
use crate::store::{Collection, ShoppingStore};

/// Result of [`ShoppingStore::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

impl WishlistToggle {
    /// Whether the product is wishlisted after the toggle.
    #[must_use]
    pub const fn is_wishlisted(self) -> bool {
        matches!(self, Self::Added)
    }

    /// The toast to show for this outcome.
    #[must_use]
    pub fn notice(self, product: &Product) -> Notice {
        match self {
            Self::Added => Notice::success(
                "Added to Wishlist",
                format!("{} has been added to your wishlist", product.name),
            ),
            Self::Removed => Notice::success(
                "Removed from Wishlist",
                format!("{} has been removed from your wishlist", product.name),
            ),
        }
    }
}

/// Result of [`ShoppingStore::move_to_cart`]: the wishlisted product and
/// what adding it to the cart did.
#[derive(Debug, Clone, PartialEq)]
pub struct MovedToCart {
    pub product: Product,
    pub outcome: AddOutcome,
}

impl MovedToCart {
    #[must_use]
    pub fn notice(&self) -> Notice {
        self.outcome.notice(&self.product)
    }
}

impl<S: KeyValueStore> ShoppingStore<S> {
    /// Read the persisted wishlist.
    #[must_use]
    pub fn load_wishlist(&self) -> Vec<Product> {
        self.load(Collection::Wishlist)
    }

    /// Overwrite the persisted wishlist and announce the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn save_wishlist(&self, items: &[Product]) -> Result<()> {
        self.commit(Collection::Wishlist, items)
    }

    /// Toggle `product` in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_wishlist(&self, product: &Product) -> Result<WishlistToggle> {
        let mut items = self.load_wishlist();
        let before = items.len();
        items.retain(|item| item.id != product.id);

        let toggle = if items.len() == before {
            items.push(product.clone());
            WishlistToggle::Added
        } else {
            WishlistToggle::Removed
        };

        self.save_wishlist(&items)?;
        info!(?toggle, items = items.len(), "Toggled wishlist entry");
        Ok(toggle)
    }

    /// Whether a product with `id` is wishlisted.
    #[must_use]
    pub fn wishlist_status(&self, id: ProductId) -> bool {
        self.load_wishlist().iter().any(|item| item.id == id)
    }

    /// Remove every entry for a product from the wishlist. Absent ids are a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&self, id: ProductId) -> Result<RemoveOutcome> {
        let mut items = self.load_wishlist();
        let Some(removed) = items.iter().find(|item| item.id == id).cloned() else {
            return Ok(RemoveOutcome::NotPresent);
        };
        items.retain(|item| item.id != id);

        self.save_wishlist(&items)?;
        info!(items = items.len(), "Removed product from wishlist");
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Add a wishlisted product to the cart. The wishlist is left as is.
    ///
    /// Returns `None` when `id` is not wishlisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self))]
    pub fn move_to_cart(&self, id: ProductId) -> Result<Option<MovedToCart>> {
        let Some(product) = self.load_wishlist().into_iter().find(|item| item.id == id) else {
            return Ok(None);
        };
        let outcome = self.add_to_cart(&product)?;
        Ok(Some(MovedToCart { product, outcome }))
    }
}
