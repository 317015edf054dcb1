//! Catalog product and category records.
//!
//! These mirror the JSON shape the storefront has always persisted: camelCase
//! keys, optional fields omitted when absent, prices as JSON numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{Price, discount_percentage};

/// A purchasable catalog product.
///
/// Cart and wishlist entries embed a full copy of this record, so any field
/// added here is persisted with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub image: String,
    /// Average review score, 0 to 5.
    pub rating: f64,
    /// Category *name* (not id).
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_colors: Option<Vec<ColorOption>>,
}

impl Product {
    /// Whether the product carries the "new" badge.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    /// Whether the product carries the "sale" badge.
    #[must_use]
    pub fn is_sale(&self) -> bool {
        self.is_sale.unwrap_or(false)
    }

    /// Percentage off the original price, 0 when not discounted.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.original_price)
    }

    /// Whole stars to fill when rendering the rating.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }
}

/// A named color swatch offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

/// A browsable product category.
///
/// Products point at categories by `name`; URLs and filters use `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
}
