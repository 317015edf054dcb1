//! Command implementations.
//!
//! Every command writes its human-readable output to the supplied writer and
//! logs through `tracing` (stderr), so stdout stays pipeable.

pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::io::Write;

use thiserror::Error;
use trocly_core::{Product, ProductId};
use trocly_storefront::{Catalog, Notice, StoreError};

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown product id {0}")]
    UnknownProduct(ProductId),

    #[error("product {0} is not in the wishlist")]
    NotInWishlist(ProductId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommandResult = Result<(), CommandError>;

/// Resolve a product id against the catalog.
fn lookup(catalog: &Catalog, id: ProductId) -> Result<&Product, CommandError> {
    catalog.product(id).ok_or(CommandError::UnknownProduct(id))
}

/// One listing line: id, name, price, and badges.
fn write_product_line(out: &mut impl Write, product: &Product) -> std::io::Result<()> {
    let mut badges = Vec::new();
    if product.is_new() {
        badges.push("NEW".to_string());
    }
    if product.is_sale() {
        badges.push("SALE".to_string());
    }
    let discount = product.discount_percentage();
    if discount > 0 {
        badges.push(format!("{discount}% OFF"));
    }

    writeln!(
        out,
        "{:>4}  {:<30} {:>11}  {}",
        product.id,
        product.name,
        product.price.to_string(),
        badges.join(" ")
    )
}

fn write_notice(out: &mut impl Write, notice: &Notice) -> std::io::Result<()> {
    writeln!(out, "{notice}")
}
