//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! trocly catalog list --category 3 --sort price-low-high
//! trocly catalog search orange
//! trocly catalog show 10
//! trocly catalog featured new
//! ```

use std::io::Write;

use trocly_core::{Product, ProductId};
use trocly_storefront::{Catalog, CatalogQuery, FeaturedTab};

use super::{CommandResult, lookup, write_product_line};

/// Print products matching the shop filters.
pub fn list(out: &mut impl Write, catalog: &Catalog, query: &CatalogQuery) -> CommandResult {
    let products = catalog.query(query);
    write_products(out, &products)
}

/// Print products matching a free-text search.
pub fn search(out: &mut impl Write, catalog: &Catalog, query: &str) -> CommandResult {
    let products = catalog.search(query);
    write_products(out, &products)
}

/// Print the featured products under a tab.
pub fn featured(out: &mut impl Write, catalog: &Catalog, tab: FeaturedTab) -> CommandResult {
    write_products(out, &catalog.featured(tab))
}

/// Print one product in detail, with related products.
pub fn show(out: &mut impl Write, catalog: &Catalog, id: ProductId) -> CommandResult {
    let product = lookup(catalog, id)?;

    writeln!(out, "{} (#{})", product.name, product.id)?;
    match product.original_price {
        Some(original) if product.discount_percentage() > 0 => writeln!(
            out,
            "Price:    {} (was {}, {}% off)",
            product.price,
            original,
            product.discount_percentage()
        )?,
        _ => writeln!(out, "Price:    {}", product.price)?,
    }
    writeln!(
        out,
        "Rating:   {:.1} {}",
        product.rating,
        "*".repeat(usize::from(product.full_stars()))
    )?;
    writeln!(out, "Category: {}", product.category)?;
    if let Some(brand) = &product.brand {
        writeln!(out, "Brand:    {brand}")?;
    }
    if let Some(stock) = product.stock {
        writeln!(out, "Stock:    {stock}")?;
    }
    if let Some(description) = &product.description {
        writeln!(out, "\n{description}")?;
    }
    if let Some(specs) = &product.specifications {
        writeln!(out, "\nSpecifications:")?;
        for (key, value) in specs {
            writeln!(out, "  {key}: {value}")?;
        }
    }

    let related = catalog.related(id);
    if !related.is_empty() {
        writeln!(out, "\nRelated:")?;
        write_products(out, &related)?;
    }
    Ok(())
}

/// Print every category with its product count.
pub fn categories(out: &mut impl Write, catalog: &Catalog) -> CommandResult {
    for count in catalog.category_counts() {
        writeln!(
            out,
            "{:>4}  {:<20} {:>3} products",
            count.category.id, count.category.name, count.products
        )?;
    }
    Ok(())
}

fn write_products(out: &mut impl Write, products: &[&Product]) -> CommandResult {
    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }
    for product in products {
        write_product_line(out, product)?;
    }
    Ok(())
}
