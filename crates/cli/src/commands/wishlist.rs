//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! trocly wishlist toggle 5
//! trocly wishlist move-to-cart 5
//! ```

use std::io::Write;

use trocly_core::ProductId;
use trocly_storefront::{Catalog, Collection, KeyValueStore, ShoppingStore};

use super::{CommandError, CommandResult, lookup, write_notice, write_product_line};

pub fn list<S: KeyValueStore>(out: &mut impl Write, store: &ShoppingStore<S>) -> CommandResult {
    let items = store.load_wishlist();
    if items.is_empty() {
        writeln!(out, "Your wishlist is empty.")?;
        return Ok(());
    }
    for product in &items {
        write_product_line(out, product)?;
    }
    Ok(())
}

/// Add the product if absent, remove it if present.
pub fn toggle<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    catalog: &Catalog,
    id: ProductId,
) -> CommandResult {
    let product = lookup(catalog, id)?;
    let outcome = store.add_to_wishlist(product)?;
    write_notice(out, &outcome.notice(product))?;
    Ok(())
}

pub fn status<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    id: ProductId,
) -> CommandResult {
    let state = if store.wishlist_status(id) {
        "wishlisted"
    } else {
        "not wishlisted"
    };
    writeln!(out, "Product #{id} is {state}.")?;
    Ok(())
}

pub fn remove<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    id: ProductId,
) -> CommandResult {
    let outcome = store.remove_from_wishlist(id)?;
    match outcome.notice(Collection::Wishlist) {
        Some(notice) => write_notice(out, &notice)?,
        None => writeln!(out, "Product #{id} is not in your wishlist.")?,
    }
    Ok(())
}

/// Copy a wishlisted product into the cart. The wishlist entry stays.
pub fn move_to_cart<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    id: ProductId,
) -> CommandResult {
    let moved = store
        .move_to_cart(id)?
        .ok_or(CommandError::NotInWishlist(id))?;
    write_notice(out, &moved.notice())?;
    Ok(())
}
