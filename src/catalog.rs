//! Product catalog.
//!
//! The catalog is a read-only collection of products sourced from an external
//! feed (JSON) or a fixture document (YAML). The cart copies a subset of
//! product fields when an item is added; nothing in this crate mutates a
//! catalog after construction.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::percent_of;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed JSON product feed.
    #[error("failed to parse product feed: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML fixture document.
    #[error("failed to parse catalog fixture: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// A single catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier, unique within the catalog.
    pub id: u64,

    /// Display title.
    pub title: String,

    /// Unit price in major units.
    pub price: Decimal,

    /// Thumbnail URI.
    pub thumbnail: String,

    /// Gallery image URIs.
    #[serde(default)]
    pub images: Vec<String>,

    /// Category slug, e.g. `smartphones`.
    pub category: String,

    /// Brand name.
    #[serde(default)]
    pub brand: String,

    /// Average review rating.
    #[serde(default)]
    pub rating: Decimal,

    /// Units in stock.
    #[serde(default)]
    pub stock: u32,

    /// Advertised discount, as a percentage of the unit price.
    #[serde(default)]
    pub discount_percentage: Decimal,
}

impl Product {
    /// Whether any units are left to sell.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// The advertised discount as a percentage.
    pub fn discount(&self) -> Percentage {
        Percentage::from(self.discount_percentage / Decimal::ONE_HUNDRED)
    }

    /// Unit price after applying the advertised discount, rounded to cents.
    pub fn discounted_price(&self) -> Decimal {
        self.price - percent_of(self.discount(), self.price)
    }
}

/// Read-only product collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an already-parsed product list.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Parse a catalog from a JSON product feed.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Json`]: the feed was not valid JSON for this shape.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse a catalog from a YAML fixture document.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Yaml`]: the document was not valid YAML for this
    ///   shape.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(raw)?)
    }

    /// All products, in feed order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct category slugs, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();

        for product in &self.products {
            let category = product.category.as_str();
            if !category.is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }

        seen
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
