//! Catalog reference data as returned by the storefront API.
//!
//! The API speaks camelCase JSON. Optional fields may be `null` or omitted
//! entirely; both deserialize to `None`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listed in the storefront. Owned by the remote API and treated as
/// read-only reference data on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, unique across the catalog.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category slug, scoped within [`Product::collection`].
    #[serde(default)]
    pub category: Option<String>,
    /// Collection slug.
    #[serde(default)]
    pub collection: Option<String>,
    /// Missing availability is treated as out of stock.
    #[serde(default)]
    pub in_stock: bool,
    /// Image URL, if the product has one.
    #[serde(default)]
    pub image: Option<String>,
    /// Display price as a decimal string on the wire, e.g. `"1250.00"`.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
}

impl Product {
    /// Returns `true` if `needle` (already lowercased) occurs in the name or
    /// description.
    #[must_use]
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// One page of the product listing: `{items, total}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Number of products matching the filter across all pages.
    pub total: u64,
}

/// Second-level classification. Categories live inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Slug of the owning collection, when the API reports it.
    #[serde(default)]
    pub collection: Option<String>,
}

/// Top-level classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Returns the categories that belong to `collection`, or all of them when no
/// collection is selected. Categories without a reported owner are kept.
#[must_use]
pub fn categories_in<'a>(categories: &'a [Category], collection: Option<&str>) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| match (collection, c.collection.as_deref()) {
            (Some(wanted), Some(owner)) => wanted == owner,
            _ => true,
        })
        .collect()
}
