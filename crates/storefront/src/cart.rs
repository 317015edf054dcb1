//! Cart operations.
//!
//! The cart is an ordered list of product snapshots with a quantity, unique
//! by product id. Adding a product that is already present is a no-op: the
//! cart only grows by distinct products, and quantities change only through
//! [`ShoppingStore::update_quantity`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use trocly_core::{Price, Product, ProductId};

use crate::error::Result;
use crate::notice::Notice;
use crate::storage::KeyValueStore;
use crate::store::{Collection, ShoppingStore};

/// A cart entry: the product as it looked when added, plus a quantity.
///
/// Serialized flat, so the stored JSON is the product object with an extra
/// `quantity` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Wrap a product as a single-unit cart entry.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }

    /// Original price times quantity, when the product had one.
    #[must_use]
    pub fn line_original_total(&self) -> Option<Price> {
        self.product.original_price.map(|p| p * self.quantity)
    }
}

/// Result of [`ShoppingStore::add_to_cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended with quantity 1.
    Added,
    /// A product with this id was already in the cart; nothing changed.
    AlreadyInCart,
}

impl AddOutcome {
    /// The toast to show for this outcome.
    #[must_use]
    pub fn notice(self, product: &Product) -> Notice {
        match self {
            Self::Added => Notice::success(
                "Added to Cart",
                format!("{} has been added to your cart", product.name),
            ),
            Self::AlreadyInCart => {
                Notice::info("Already in Cart", "This item is already in your cart")
            }
        }
    }
}

/// Result of [`ShoppingStore::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    Updated { previous: u32, quantity: u32 },
    /// The requested quantity was below 1 (or out of range); nothing changed.
    Rejected,
    NotInCart,
}

/// Result of removing a product from either collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The entry that was removed.
    Removed(Product),
    /// No entry had that id; nothing changed.
    NotPresent,
}

impl RemoveOutcome {
    /// The toast to show, if any.
    #[must_use]
    pub fn notice(&self, collection: Collection) -> Option<Notice> {
        match (self, collection) {
            (Self::Removed(_), Collection::Cart) => {
                Some(Notice::success_title("Item removed from cart"))
            }
            (Self::Removed(_), Collection::Wishlist) => {
                Some(Notice::success_title("Item removed from wishlist"))
            }
            (Self::NotPresent, _) => None,
        }
    }
}

/// Shipping charge rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_threshold: Price,
    /// Charged otherwise.
    pub flat_rate: Price,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Price::from_cents(10_000),
            flat_rate: Price::from_cents(1000),
        }
    }
}

impl ShippingPolicy {
    /// Shipping owed for a cart subtotal. An empty cart owes nothing.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal.is_zero() || subtotal > self.free_threshold {
            Price::ZERO
        } else {
            self.flat_rate
        }
    }
}

/// Totals shown on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Distinct products in the cart.
    pub item_count: usize,
    /// Sum of quantities.
    pub unit_count: u64,
    pub subtotal: Price,
    /// Amount saved against original prices.
    pub savings: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CartSummary {
    /// Summarize `items` under `policy`.
    #[must_use]
    pub fn compute(items: &[CartItem], policy: ShippingPolicy) -> Self {
        let subtotal: Price = items.iter().map(CartItem::line_total).sum();
        let savings: Price = items
            .iter()
            .filter_map(|item| {
                let original = item.line_original_total()?;
                let line = item.line_total();
                (original > line).then(|| original - line)
            })
            .sum();
        let shipping = policy.shipping_for(subtotal);

        Self {
            item_count: items.len(),
            unit_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
            subtotal,
            savings,
            shipping,
            total: subtotal + shipping,
        }
    }
}

impl<S: KeyValueStore> ShoppingStore<S> {
    /// Read the persisted cart.
    ///
    /// Entries stored without a quantity, or with quantity 0, read as 1.
    #[must_use]
    pub fn load_cart(&self) -> Vec<CartItem> {
        let mut items: Vec<CartItem> = self.load(Collection::Cart);
        for item in &mut items {
            if item.quantity == 0 {
                item.quantity = 1;
            }
        }
        items
    }

    /// Overwrite the persisted cart and announce the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn save_cart(&self, items: &[CartItem]) -> Result<()> {
        self.commit(Collection::Cart, items)
    }

    /// Add `product` with quantity 1, unless its id is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product) -> Result<AddOutcome> {
        let mut items = self.load_cart();
        if items.iter().any(|item| item.id() == product.id) {
            debug!("Product already in cart");
            return Ok(AddOutcome::AlreadyInCart);
        }

        items.push(CartItem::new(product.clone()));
        self.save_cart(&items)?;
        info!(items = items.len(), "Added product to cart");
        Ok(AddOutcome::Added)
    }

    /// Set the quantity of a cart entry.
    ///
    /// Quantities below 1 are rejected without touching storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: ProductId, new_quantity: i64) -> Result<QuantityOutcome> {
        let quantity = match u32::try_from(new_quantity) {
            Ok(q) if q >= 1 => q,
            _ => {
                debug!("Rejected quantity");
                return Ok(QuantityOutcome::Rejected);
            }
        };

        let mut items = self.load_cart();
        let Some(previous) = items
            .iter()
            .find(|item| item.id() == id)
            .map(|item| item.quantity)
        else {
            return Ok(QuantityOutcome::NotInCart);
        };
        for item in items.iter_mut().filter(|item| item.id() == id) {
            item.quantity = quantity;
        }

        self.save_cart(&items)?;
        info!(previous, quantity, "Updated cart quantity");
        Ok(QuantityOutcome::Updated { previous, quantity })
    }

    /// Remove every entry for a product from the cart. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: ProductId) -> Result<RemoveOutcome> {
        let mut items = self.load_cart();
        let Some(removed) = items.iter().find(|item| item.id() == id).cloned() else {
            return Ok(RemoveOutcome::NotPresent);
        };
        items.retain(|item| item.id() != id);

        self.save_cart(&items)?;
        info!(items = items.len(), "Removed product from cart");
        Ok(RemoveOutcome::Removed(removed.product))
    }

    /// Number of distinct products in the cart (the badge count).
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.load_cart().len()
    }

    /// Whether a product with `id` is in the cart.
    #[must_use]
    pub fn in_cart(&self, id: ProductId) -> bool {
        self.load_cart().iter().any(|item| item.id() == id)
    }

    /// Current cart totals under the store's shipping policy.
    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        CartSummary::compute(&self.load_cart(), self.shipping())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::StoreEvent;
    use crate::storage::MemoryStorage;

    fn product(id: i64, cents: i64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Product {id}"),
            "price": serde_json::Number::from_f64(cents as f64 / 100.0).unwrap(),
            "image": "/placeholder.svg",
            "rating": 4.5,
            "category": "Fashion",
        }))
        .unwrap()
    }

    fn store() -> ShoppingStore<MemoryStorage> {
        ShoppingStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_add_to_empty_cart() {
        let store = store();
        assert!(store.load_cart().is_empty());

        let outcome = store.add_to_cart(&product(1, 2999)).unwrap();
        assert_eq!(outcome, AddOutcome::Added);

        let cart = store.load_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].id(), ProductId::new(1));
        assert_eq!(cart[0].quantity, 1);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let store = store();
        let p = product(1, 2999);
        store.add_to_cart(&p).unwrap();
        store.update_quantity(p.id, 4).unwrap();

        let mut sub = store.subscribe();
        let outcome = store.add_to_cart(&p).unwrap();

        assert_eq!(outcome, AddOutcome::AlreadyInCart);
        assert_eq!(outcome.notice(&p).title, "Already in Cart");
        let cart = store.load_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 4);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_added_notice_names_product() {
        let p = product(3, 100);
        let notice = AddOutcome::Added.notice(&p);
        assert_eq!(
            notice.description.as_deref(),
            Some("Product 3 has been added to your cart")
        );
    }

    #[test]
    fn test_update_quantity_rejects_below_one() {
        let store = store();
        let p = product(1, 2999);
        store.add_to_cart(&p).unwrap();
        store.update_quantity(p.id, 2).unwrap();

        let mut sub = store.subscribe();
        assert_eq!(store.update_quantity(p.id, 0).unwrap(), QuantityOutcome::Rejected);
        assert_eq!(store.update_quantity(p.id, -1).unwrap(), QuantityOutcome::Rejected);
        assert_eq!(
            store.update_quantity(p.id, i64::MAX).unwrap(),
            QuantityOutcome::Rejected
        );

        assert_eq!(store.load_cart()[0].quantity, 2);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_id() {
        let store = store();
        assert_eq!(
            store.update_quantity(ProductId::new(9), 3).unwrap(),
            QuantityOutcome::NotInCart
        );
        assert_eq!(store.storage().get_item("cart").unwrap(), None);
    }

    #[test]
    fn test_update_quantity_reports_previous() {
        let store = store();
        let p = product(1, 2999);
        store.add_to_cart(&p).unwrap();
        assert_eq!(
            store.update_quantity(p.id, 3).unwrap(),
            QuantityOutcome::Updated {
                previous: 1,
                quantity: 3
            }
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = store();
        store.add_to_cart(&product(1, 2999)).unwrap();

        let mut sub = store.subscribe();
        let outcome = store.remove_from_cart(ProductId::new(42)).unwrap();

        assert_eq!(outcome, RemoveOutcome::NotPresent);
        assert_eq!(outcome.notice(Collection::Cart), None);
        assert_eq!(store.cart_count(), 1);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_cart_lifecycle() {
        let store = store();
        let p = product(1, 2999);
        let mut sub = store.subscribe_cart();

        store.add_to_cart(&p).unwrap();
        assert_eq!(store.load_cart()[0].quantity, 1);

        store.update_quantity(p.id, 3).unwrap();
        assert_eq!(store.load_cart()[0].quantity, 3);

        let outcome = store.remove_from_cart(p.id).unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed(p));
        assert_eq!(
            outcome.notice(Collection::Cart).unwrap().title,
            "Item removed from cart"
        );
        assert!(store.load_cart().is_empty());

        assert_eq!(sub.drain(), vec![StoreEvent::CartUpdated; 3]);
    }

    #[test]
    fn test_listener_reading_on_signal_sees_write() {
        let store = store();
        let mut sub = store.subscribe_cart();

        store.add_to_cart(&product(5, 500)).unwrap();

        assert!(sub.poll_changed());
        assert!(store.in_cart(ProductId::new(5)));
    }

    #[test]
    fn test_missing_or_zero_quantity_reads_as_one() {
        let store = ShoppingStore::new(MemoryStorage::with_items([(
            "cart",
            r#"[
                {"id":1,"name":"A","price":10,"image":"a","rating":4,"category":"Fashion"},
                {"id":2,"name":"B","price":5,"image":"b","rating":4,"category":"Fashion","quantity":0}
            ]"#,
        )]));
        let cart = store.load_cart();
        assert_eq!(cart.len(), 2);
        assert!(cart.iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn test_corrupt_cart_recovers_on_next_add() {
        let store = ShoppingStore::new(MemoryStorage::with_items([("cart", "{oops")]));
        assert!(store.load_cart().is_empty());

        store.add_to_cart(&product(1, 2999)).unwrap();
        assert_eq!(store.cart_count(), 1);
    }

    #[test]
    fn test_persisted_shape_is_flat_product_with_quantity() {
        let store = store();
        store.add_to_cart(&product(1, 2999)).unwrap();

        let raw = store.storage().get_item("cart").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["price"], 29.99);
        assert!(json[0].get("product").is_none());
    }

    #[test]
    fn test_snapshots_keep_price_at_time_of_add() {
        let store = store();
        let mut p = product(1, 2999);
        store.add_to_cart(&p).unwrap();

        p.price = Price::from_cents(1999);
        assert_eq!(store.add_to_cart(&p).unwrap(), AddOutcome::AlreadyInCart);
        assert_eq!(store.load_cart()[0].product.price, Price::from_cents(2999));
    }

    #[test]
    fn test_summary_shipping_threshold() {
        let policy = ShippingPolicy::default();
        let at_threshold = vec![CartItem::new(product(1, 10_000))];
        let summary = CartSummary::compute(&at_threshold, policy);
        assert_eq!(summary.shipping, Price::from_cents(1000));
        assert_eq!(summary.total, Price::from_cents(11_000));

        let above = vec![CartItem::new(product(1, 10_001))];
        let summary = CartSummary::compute(&above, policy);
        assert_eq!(summary.shipping, Price::ZERO);
        assert_eq!(summary.total, Price::from_cents(10_001));

        let empty = CartSummary::compute(&[], policy);
        assert_eq!(empty.shipping, Price::ZERO);
        assert_eq!(empty.total, Price::ZERO);
    }

    #[test]
    fn test_summary_totals_and_savings() {
        let store = store();
        let mut shirt = product(1, 2999);
        shirt.original_price = Some(Price::from_cents(3999));
        store.add_to_cart(&shirt).unwrap();
        store.add_to_cart(&product(2, 1999)).unwrap();
        store.update_quantity(shirt.id, 2).unwrap();

        let summary = store.cart_summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.unit_count, 3);
        assert_eq!(summary.subtotal, Price::from_cents(7997));
        assert_eq!(summary.savings, Price::from_cents(2000));
        assert_eq!(summary.shipping, Price::from_cents(1000));
        assert_eq!(summary.total, Price::from_cents(8997));
    }

    #[test]
    fn test_duplicate_entries_are_removed_together() {
        let store = store();
        let p = product(1, 2999);
        store
            .save_cart(&[
                CartItem::new(p.clone()),
                CartItem::new(product(2, 500)),
                CartItem::new(p.clone()),
            ])
            .unwrap();

        let outcome = store.update_quantity(p.id, 3).unwrap();
        assert_eq!(
            outcome,
            QuantityOutcome::Updated {
                previous: 1,
                quantity: 3
            }
        );
        assert!(
            store
                .load_cart()
                .iter()
                .filter(|item| item.id() == p.id)
                .all(|item| item.quantity == 3)
        );

        let removed = store.remove_from_cart(p.id).unwrap();
        assert!(matches!(removed, RemoveOutcome::Removed(ref r) if r.id == p.id));
        assert!(!store.in_cart(p.id));
        assert_eq!(store.cart_count(), 1);
        assert_eq!(store.cart_summary().subtotal, Price::from_cents(500));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;
        use crate::test_support::{arb_collection, arb_collection_and_outsider, arb_product, ids};

        fn seeded(items: &[Product]) -> ShoppingStore<MemoryStorage> {
            let store = store();
            let cart: Vec<CartItem> = items.iter().cloned().map(CartItem::new).collect();
            store.save_cart(&cart).unwrap();
            store
        }

        fn snapshot(store: &ShoppingStore<MemoryStorage>) -> Vec<(i64, u32)> {
            store
                .load_cart()
                .iter()
                .map(|item| (item.id().as_i64(), item.quantity))
                .collect()
        }

        proptest! {
            #[test]
            fn prop_add_to_empty_cart_has_quantity_one(p in arb_product()) {
                let store = store();
                prop_assert_eq!(store.add_to_cart(&p).unwrap(), AddOutcome::Added);
                prop_assert_eq!(snapshot(&store), vec![(p.id.as_i64(), 1)]);
            }

            #[test]
            fn prop_second_add_keeps_length(
                (items, p) in arb_collection_and_outsider(),
                also_existing in any::<bool>()
            ) {
                let store = seeded(&items);
                let target = if also_existing && !items.is_empty() { items[0].clone() } else { p };
                store.add_to_cart(&target).unwrap();
                let after_first = snapshot(&store);

                let mut sub = store.subscribe();
                prop_assert_eq!(store.add_to_cart(&target).unwrap(), AddOutcome::AlreadyInCart);
                prop_assert_eq!(snapshot(&store), after_first);
                prop_assert!(sub.drain().is_empty());
            }

            #[test]
            fn prop_non_positive_quantity_changes_nothing(
                items in arb_collection(),
                pick in any::<prop::sample::Index>(),
                quantity in i64::MIN..=0
            ) {
                let store = seeded(&items);
                let before = snapshot(&store);
                let id = if items.is_empty() {
                    ProductId::new(1)
                } else {
                    items[pick.index(items.len())].id
                };

                let mut sub = store.subscribe();
                prop_assert_eq!(store.update_quantity(id, quantity).unwrap(), QuantityOutcome::Rejected);
                prop_assert_eq!(snapshot(&store), before);
                prop_assert!(sub.drain().is_empty());
            }

            #[test]
            fn prop_removing_absent_id_is_noop((items, outsider) in arb_collection_and_outsider()) {
                let store = seeded(&items);
                let before = snapshot(&store);

                let mut sub = store.subscribe();
                prop_assert_eq!(store.remove_from_cart(outsider.id).unwrap(), RemoveOutcome::NotPresent);
                prop_assert_eq!(snapshot(&store), before);
                prop_assert_eq!(
                    ids(store.load_cart().iter().map(CartItem::id)),
                    ids(items.iter().map(|p| p.id))
                );
                prop_assert!(sub.drain().is_empty());
            }
        }
    }
}
