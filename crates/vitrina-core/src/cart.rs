//! The consultation cart: products the shopper wants to ask about.
//!
//! A [`CartStore`] is an explicit object owned by whoever drives the UI and
//! passed to the code that needs it. Views that render the cart call
//! [`CartStore::subscribe`] and re-render whenever a new [`CartSnapshot`] is
//! published. A snapshot is published only when a mutation actually changed
//! the cart.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::products::Product;

/// A product reference plus the quantity the shopper is asking about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartItem {
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }
}

/// Serializable view of the cart contents, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
}

/// Ordered cart keyed by product id. Each id appears at most once.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    changes: watch::Sender<CartSnapshot>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = watch::channel(CartSnapshot::default());
        Self {
            items: Vec::new(),
            changes,
        }
    }

    /// Rebuilds a store from a persisted snapshot. Duplicate ids keep their
    /// first occurrence.
    #[must_use]
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let mut items: Vec<CartItem> = Vec::with_capacity(snapshot.items.len());
        for item in snapshot.items {
            if items.iter().any(|i| i.product.id == item.product.id) {
                tracing::warn!(product_id = %item.product.id, "dropping duplicate cart entry from snapshot");
                continue;
            }
            items.push(item);
        }
        let (changes, _) = watch::channel(CartSnapshot {
            items: items.clone(),
        });
        Self { items, changes }
    }

    /// Adds `product` with quantity 1.
    ///
    /// Re-adding a product that is already present, or adding one that is
    /// out of stock, leaves the cart unchanged. Returns `true` if the product
    /// was inserted.
    pub fn add(&mut self, product: &Product) -> bool {
        if !product.in_stock {
            tracing::debug!(product_id = %product.id, "not adding out-of-stock product");
            return false;
        }
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(CartItem {
            product: product.clone(),
            quantity: NonZeroU32::MIN,
        });
        tracing::debug!(product_id = %product.id, len = self.items.len(), "added product to cart");
        self.publish();
        true
    }

    /// Removes the entry for `product_id`. Returns `false` if it was absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        if self.items.len() == before {
            return false;
        }
        tracing::debug!(product_id, len = self.items.len(), "removed product from cart");
        self.publish();
        true
    }

    /// Sets the quantity of a present item. Returns `false` if `product_id`
    /// is not in the cart or already has that quantity.
    pub fn set_quantity(&mut self, product_id: &str, quantity: NonZeroU32) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        self.publish();
        true
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        tracing::debug!("cleared cart");
        self.publish();
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    /// Cart items in insertion order.
    #[must_use]
    pub fn list(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
        }
    }

    /// Returns a receiver that observes every effective cart change.
    ///
    /// The receiver starts with the current contents marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.changes.subscribe()
    }

    fn publish(&self) {
        self.changes.send_replace(self.snapshot());
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
