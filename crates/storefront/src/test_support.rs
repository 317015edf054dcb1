//! Strategies shared by the property tests.

use std::collections::HashSet;

use proptest::prelude::*;
use trocly_core::{Price, Product, ProductId};

const CATEGORIES: [&str; 5] = ["Fashion", "Electronics", "Home & Garden", "Jewelry", "Vehicles"];

/// Any product with an id in `1..1000`.
pub fn arb_product() -> impl Strategy<Value = Product> {
    (
        1i64..1000,
        "[A-Za-z][A-Za-z ]{0,23}",
        1i64..10_000_000,
        proptest::option::of(1i64..10_000_000),
        0u8..=10,
        proptest::sample::select(CATEGORIES.to_vec()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(0u32..500),
    )
        .prop_map(
            |(id, name, cents, original_cents, half_stars, category, is_new, stock)| Product {
                id: ProductId::new(id),
                name,
                description: None,
                price: Price::from_cents(cents),
                original_price: original_cents.map(Price::from_cents),
                image: "/placeholder.svg".to_string(),
                rating: f64::from(half_stars) / 2.0,
                category: category.to_string(),
                is_new,
                is_sale: None,
                specifications: None,
                stock,
                sku: None,
                brand: None,
                features: None,
                available_sizes: None,
                available_colors: None,
            },
        )
}

/// Up to eight products with distinct ids, in arbitrary order.
pub fn arb_collection() -> impl Strategy<Value = Vec<Product>> {
    proptest::collection::vec(arb_product(), 0..8).prop_map(|products| {
        let mut seen = HashSet::new();
        products
            .into_iter()
            .filter(|p| seen.insert(p.id))
            .collect()
    })
}

/// A collection plus a product whose id is not in it.
pub fn arb_collection_and_outsider() -> impl Strategy<Value = (Vec<Product>, Product)> {
    (arb_collection(), arb_product()).prop_filter("outsider id must be absent", |(items, p)| {
        items.iter().all(|item| item.id != p.id)
    })
}

pub fn ids(products: impl IntoIterator<Item = ProductId>) -> Vec<i64> {
    products.into_iter().map(|id| id.as_i64()).collect()
}
