//! File-backed storage across store restarts.
//!
//! Run with: cargo test -p trocly-integration-tests --test file_persistence

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use trocly_core::ProductId;
use trocly_integration_tests::{file_fixture, open_store};
use trocly_storefront::storage::keys;
use trocly_storefront::{AddOutcome, Catalog, KeyValueStore};

#[test]
fn test_state_survives_reopen() {
    let (dir, store) = file_fixture();
    let catalog = Catalog::builtin().unwrap();

    store
        .add_to_cart(catalog.product(ProductId::new(6)).unwrap())
        .unwrap();
    store.update_quantity(ProductId::new(6), 2).unwrap();
    store
        .add_to_wishlist(catalog.product(ProductId::new(5)).unwrap())
        .unwrap();

    assert!(dir.path().join("cart.json").is_file());
    assert!(dir.path().join("wishlist.json").is_file());

    drop(store);
    let reopened = open_store(dir.path());
    let cart = reopened.load_cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id(), ProductId::new(6));
    assert_eq!(cart[0].quantity, 2);
    assert!(reopened.wishlist_status(ProductId::new(5)));
}

#[test]
fn test_persisted_cart_is_flat_json() {
    let (_dir, store) = file_fixture();
    let catalog = Catalog::builtin().unwrap();
    store
        .add_to_cart(catalog.product(ProductId::new(1)).unwrap())
        .unwrap();

    let raw = store.storage().get_item(keys::CART).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["quantity"], 1);
    assert_eq!(entry["originalPrice"], 39.99);
    assert_eq!(entry["isNew"], true);
}

#[test]
fn test_corrupt_file_reads_empty_and_is_overwritten() {
    let (dir, store) = file_fixture();
    std::fs::write(dir.path().join("cart.json"), "{not json").unwrap();

    assert!(store.load_cart().is_empty());

    let catalog = Catalog::builtin().unwrap();
    let outcome = store
        .add_to_cart(catalog.product(ProductId::new(2)).unwrap())
        .unwrap();
    assert_eq!(outcome, AddOutcome::Added);
    assert_eq!(store.cart_count(), 1);
}

#[test]
fn test_hand_written_entries_default_quantity() {
    let (dir, store) = file_fixture();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":3,"name":"Table","price":249.99,"image":"/t.svg","rating":4.5,"category":"Home & Garden"},
            {"id":4,"name":"Necklace","price":399.99,"image":"/n.svg","rating":4.9,"category":"Jewelry","quantity":0}]"#,
    )
    .unwrap();

    let cart = store.load_cart();
    assert_eq!(cart.len(), 2);
    assert!(cart.iter().all(|item| item.quantity == 1));
}

#[test]
fn test_two_stores_on_one_dir_last_writer_wins() {
    let (dir, first) = file_fixture();
    let second = open_store(dir.path());
    let catalog = Catalog::builtin().unwrap();

    // Both read an empty cart, then write in turn.
    first
        .add_to_cart(catalog.product(ProductId::new(1)).unwrap())
        .unwrap();
    second
        .save_cart(&[trocly_storefront::CartItem::new(
            catalog.product(ProductId::new(2)).unwrap().clone(),
        )])
        .unwrap();

    let ids: Vec<i64> = first
        .load_cart()
        .iter()
        .map(|item| item.id().as_i64())
        .collect();
    assert_eq!(ids, vec![2]);
}
