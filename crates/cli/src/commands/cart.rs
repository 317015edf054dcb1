//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! trocly cart add 10
//! trocly cart quantity 10 3
//! trocly cart remove 10
//! trocly cart summary
//! ```

use std::io::Write;

use trocly_core::ProductId;
use trocly_storefront::{Catalog, Collection, KeyValueStore, QuantityOutcome, ShoppingStore};

use super::{CommandResult, lookup, write_notice};

pub fn list<S: KeyValueStore>(out: &mut impl Write, store: &ShoppingStore<S>) -> CommandResult {
    let items = store.load_cart();
    if items.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }
    for item in &items {
        writeln!(
            out,
            "{:>4}  {:<30} {:>3} x {:>11} = {:>11}",
            item.id(),
            item.product.name,
            item.quantity,
            item.product.price.to_string(),
            item.line_total().to_string()
        )?;
    }
    Ok(())
}

/// Add a catalog product to the cart.
pub fn add<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    catalog: &Catalog,
    id: ProductId,
) -> CommandResult {
    let product = lookup(catalog, id)?;
    let outcome = store.add_to_cart(product)?;
    write_notice(out, &outcome.notice(product))?;
    Ok(())
}

/// Set a line's quantity. Values below 1 are rejected without changes.
pub fn quantity<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    id: ProductId,
    quantity: i64,
) -> CommandResult {
    match store.update_quantity(id, quantity)? {
        QuantityOutcome::Updated { previous, quantity } => {
            writeln!(out, "Quantity for #{id}: {previous} -> {quantity}")?;
        }
        QuantityOutcome::Rejected => {
            writeln!(out, "Quantity must be at least 1; cart unchanged.")?;
        }
        QuantityOutcome::NotInCart => {
            writeln!(out, "Product #{id} is not in your cart.")?;
        }
    }
    Ok(())
}

pub fn remove<S: KeyValueStore>(
    out: &mut impl Write,
    store: &ShoppingStore<S>,
    id: ProductId,
) -> CommandResult {
    let outcome = store.remove_from_cart(id)?;
    match outcome.notice(Collection::Cart) {
        Some(notice) => write_notice(out, &notice)?,
        None => writeln!(out, "Product #{id} is not in your cart.")?,
    }
    Ok(())
}

/// Print the order summary panel.
pub fn summary<S: KeyValueStore>(out: &mut impl Write, store: &ShoppingStore<S>) -> CommandResult {
    let summary = store.cart_summary();
    writeln!(
        out,
        "Items:    {} ({} units)",
        summary.item_count, summary.unit_count
    )?;
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    if !summary.savings.is_zero() {
        writeln!(out, "Savings:  {}", summary.savings)?;
    }
    if summary.shipping.is_zero() {
        writeln!(out, "Shipping: Free")?;
    } else {
        writeln!(out, "Shipping: {}", summary.shipping)?;
    }
    writeln!(out, "Total:    {}", summary.total)?;
    Ok(())
}
