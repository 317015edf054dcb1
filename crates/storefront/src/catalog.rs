//! The product catalog.
//!
//! A small static list queried by linear scan. Filters mirror the shop page:
//! optional category, inclusive price range, "new" and "sale" toggles, and a
//! sort order. All sorts are stable, so ties keep catalog order.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use trocly_core::{Category, Price, Product, ProductId};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// Unrecognized sort or tab name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown option '{0}'")]
pub struct UnknownOption(pub String);

/// Shop listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    /// Highest rated first.
    Rating,
}

impl FromStr for SortOrder {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low-high" => Ok(Self::PriceLowHigh),
            "price-high-low" => Ok(Self::PriceHighLow),
            "rating" => Ok(Self::Rating),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Tabs of the featured-products section on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeaturedTab {
    #[default]
    Trending,
    New,
    Sale,
}

impl FromStr for FeaturedTab {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trending" => Ok(Self::Trending),
            "new" => Ok(Self::New),
            "sale" => Ok(Self::Sale),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Shop page filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Category *id*; `None` for all categories.
    pub category_id: Option<String>,
    pub min_price: Price,
    pub max_price: Price,
    pub only_new: bool,
    pub only_sale: bool,
    pub sort: SortOrder,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category_id: None,
            min_price: Price::ZERO,
            max_price: Price::from_cents(6_000_000),
            only_new: false,
            only_sale: false,
            sort: SortOrder::Featured,
        }
    }
}

/// Product count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount<'a> {
    pub category: &'a Category,
    pub products: usize,
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// All purchasable products and their categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Most products [`Self::related`] returns.
    pub const RELATED_LIMIT: usize = 3;

    /// The catalog bundled with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog document with `categories` and `products` arrays.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or duplicate product ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.products, file.categories)
    }

    /// Build a catalog from parts.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateProduct(dup.id));
        }
        debug!(
            products = products.len(),
            categories = categories.len(),
            "Loaded catalog"
        );
        Ok(Self {
            products,
            categories,
        })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Products whose category name matches the category with `category_id`.
    ///
    /// An unknown id yields nothing.
    #[must_use]
    pub fn products_in_category(&self, category_id: &str) -> Vec<&Product> {
        let Some(category) = self.category(category_id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == category.name)
            .collect()
    }

    /// Case-insensitive substring search over name, category and description.
    ///
    /// The query is matched as typed; surrounding whitespace is significant.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Run the shop page filters.
    #[instrument(skip(self))]
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> = match &query.category_id {
            Some(id) => self.products_in_category(id),
            None => self.products.iter().collect(),
        };

        products.retain(|p| {
            p.price >= query.min_price
                && p.price <= query.max_price
                && (!query.only_new || p.is_new())
                && (!query.only_sale || p.is_sale())
        });

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLowHigh => products.sort_by_key(|p| p.price),
            SortOrder::PriceHighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }

        debug!(results = products.len(), "Catalog query");
        products
    }

    /// Products shown under a featured-section tab.
    #[must_use]
    pub fn featured(&self, tab: FeaturedTab) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| match tab {
                FeaturedTab::Trending => true,
                FeaturedTab::New => p.is_new(),
                FeaturedTab::Sale => p.is_sale(),
            })
            .collect()
    }

    /// Up to [`Self::RELATED_LIMIT`] other products in the same category as
    /// `id`, in catalog order.
    #[must_use]
    pub fn related(&self, id: ProductId) -> Vec<&Product> {
        let Some(product) = self.product(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != id)
            .take(Self::RELATED_LIMIT)
            .collect()
    }

    /// Number of products in each category, in category order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<CategoryCount<'_>> {
        self.categories
            .iter()
            .map(|category| CategoryCount {
                category,
                products: self
                    .products
                    .iter()
                    .filter(|p| p.category == category.name)
                    .count(),
            })
            .collect()
    }
}
