//! Favorites (wishlist) state manager.
//!
//! A set keyed by product id with strict toggle semantics: toggling an
//! absent id inserts it, toggling a present id removes it. Product
//! snapshots are kept alongside the membership so the wishlist can render
//! without re-fetching. Persists through [`crate::storage`] on every
//! mutation, under a key distinct from the cart's.

use std::sync::Arc;

use pahnawa_core::{Product, ProductId};

use crate::storage::{self, SnapshotStore};

/// Snapshot key the favorites persist under.
pub const FAVORITES_SNAPSHOT_KEY: &str = "favorites";

/// Owner of the saved-products set for one application session.
pub struct FavoritesManager {
    items: Vec<Product>,
    store: Arc<dyn SnapshotStore>,
}

impl FavoritesManager {
    /// Create a manager over `store`, restoring any persisted snapshot.
    ///
    /// A missing or malformed snapshot restores an empty wishlist.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        let items: Vec<Product> = storage::load_snapshot(store.as_ref(), FAVORITES_SNAPSHOT_KEY);
        Self { items, store }
    }

    /// Flip membership for `product`: insert when absent, remove when
    /// present. Applying twice always restores the original state.
    pub fn toggle(&mut self, product: &Product) {
        if self.is_favorite(&product.id) {
            self.items.retain(|item| item.id != product.id);
        } else {
            self.items.push(product.clone());
        }
        self.persist();
    }

    /// Pure membership test.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.id == *product_id)
    }

    /// Remove `product_id` if present. Removing an absent id is a no-op,
    /// not an error.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| item.id != *product_id);
        self.persist();
    }

    /// Saved products in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every entry and the persisted snapshot.
    pub fn clear(&mut self) {
        self.items.clear();
        storage::clear_snapshot(self.store.as_ref(), FAVORITES_SNAPSHOT_KEY);
    }

    fn persist(&self) {
        storage::save_snapshot(self.store.as_ref(), FAVORITES_SNAPSHOT_KEY, &self.items);
    }
}
