//! Catalog filter state and pagination arithmetic.
//!
//! [`CatalogFilter`] is the controlled state behind the product listing. It
//! renders into query parameters for `GET /v1/products` and can also be
//! applied locally to an in-memory product list with [`filter_products`].

use crate::products::Product;

/// Filter state for the product listing.
///
/// Fields are private so the reset rules always hold: changing the
/// collection clears the category, and changing any filter other than the
/// page returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    search: String,
    category: Option<String>,
    collection: Option<String>,
    in_stock_only: bool,
    page: u32,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            collection: None,
            in_stock_only: false,
            page: 1,
        }
    }
}

impl CatalogFilter {
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    #[must_use]
    pub fn in_stock_only(&self) -> bool {
        self.in_stock_only
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns `true` if the filter changed.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.search == text {
            return false;
        }
        self.search = text;
        self.page = 1;
        true
    }

    /// Returns `true` if the filter changed.
    pub fn set_category(&mut self, category: Option<String>) -> bool {
        let category = category.filter(|c| !c.is_empty());
        if self.category == category {
            return false;
        }
        self.category = category;
        self.page = 1;
        true
    }

    /// Selects a collection. A different collection also clears the category,
    /// since categories are scoped to their collection.
    pub fn set_collection(&mut self, collection: Option<String>) -> bool {
        let collection = collection.filter(|c| !c.is_empty());
        if self.collection == collection {
            return false;
        }
        self.collection = collection;
        self.category = None;
        self.page = 1;
        true
    }

    /// Returns `true` if the filter changed.
    pub fn set_in_stock_only(&mut self, in_stock_only: bool) -> bool {
        if self.in_stock_only == in_stock_only {
            return false;
        }
        self.in_stock_only = in_stock_only;
        self.page = 1;
        true
    }

    /// Moves to `page`. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Query parameters for the product listing endpoint. Unset filters are
    /// omitted.
    #[must_use]
    pub fn query_pairs(&self, page_size: u32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(collection) = &self.collection {
            pairs.push(("collection", collection.clone()));
        }
        if self.in_stock_only {
            pairs.push(("inStock", "true".to_owned()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", page_size.to_string()));
        pairs
    }

    /// Returns `true` if `product` passes every filter except pagination.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !product.matches_search(&needle) {
            return false;
        }
        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(collection) = &self.collection {
            if product.collection.as_deref() != Some(collection.as_str()) {
                return false;
            }
        }
        !self.in_stock_only || product.in_stock
    }
}

/// Number of pages needed to show `total` items. Never zero: an empty
/// listing still has one (empty) page.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1))).max(1)
}

/// Applies `filter` to an in-memory product list, preserving order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Returns the slice of `items` shown on 1-based `page`. Pages past the end
/// are empty.
#[must_use]
pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}
