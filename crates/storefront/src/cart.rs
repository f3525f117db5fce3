//! Cart state manager.
//!
//! The cart owns its line items exclusively; the UI reads through accessors
//! and mutates through the operations here. Every mutation persists a
//! snapshot through [`crate::storage`] before returning, so a reload loses
//! at most the in-flight change.
//!
//! Merge identity for additions is (product id, selected options): adding
//! the same product with identical add-ons merges by summing quantities,
//! while differing add-ons produce distinct lines. Removal is deliberately
//! coarser - it drops every line for the product regardless of options -
//! because the cart UI groups removal by product, not by variant.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pahnawa_core::{Product, ProductId};

use crate::storage::{self, SnapshotStore};

/// Snapshot key the cart persists under. Distinct from the favorites key so
/// the two managers never write the same record.
pub const CART_SNAPSHOT_KEY: &str = "cart";

// =============================================================================
// SelectedOptions
// =============================================================================

/// Add-on selections attached to a cart line, each with a fixed surcharge
/// (e.g., fall & pico ₹150, tassels ₹250, blouse stitching ₹1200).
///
/// Backed by a `BTreeMap` so equality - and therefore cart merge identity -
/// is independent of selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(BTreeMap<String, Decimal>);

impl SelectedOptions {
    /// No add-ons selected.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, surcharge: Decimal) -> Self {
        self.0.insert(label.into(), surcharge);
        self
    }

    /// Sum of all selected surcharges.
    #[must_use]
    pub fn surcharge_total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Whether any add-on is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (label, surcharge) pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(label, surcharge)| (label.as_str(), *surcharge))
    }
}

// =============================================================================
// CartLine
// =============================================================================

/// One line in the cart: a product snapshot taken at add-time, a quantity
/// of at least 1, and the add-ons selected for this variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product as it looked when added. Keeps its base price; add-on
    /// surcharges are applied by [`CartLine::unit_price`].
    pub product: Product,
    /// Units of this variant, always >= 1.
    pub quantity: u32,
    /// Add-ons selected for this line.
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

impl CartLine {
    /// Effective per-unit price: base price plus selected surcharges.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.price + self.selected_options.surcharge_total()
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    /// Whether `other` addresses the same merge identity.
    fn same_identity(&self, product_id: &ProductId, options: &SelectedOptions) -> bool {
        self.product.id == *product_id && self.selected_options == *options
    }
}

// =============================================================================
// CartManager
// =============================================================================

/// Owner of the cart line items for one application session.
pub struct CartManager {
    lines: Vec<CartLine>,
    open: bool,
    store: Arc<dyn SnapshotStore>,
}

impl CartManager {
    /// Create a manager over `store`, restoring any persisted snapshot.
    ///
    /// A missing or malformed snapshot restores an empty cart.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        let lines: Vec<CartLine> = storage::load_snapshot(store.as_ref(), CART_SNAPSHOT_KEY);
        Self {
            lines,
            open: false,
            store,
        }
    }

    /// Add `quantity` units of `product` with the given add-ons.
    ///
    /// Merges into an existing line when (product id, options) match,
    /// otherwise appends a new line. A quantity of 0 is treated as 1.
    /// Opens the cart affordance flag for the container to read.
    pub fn add(&mut self, product: Product, quantity: u32, selected_options: SelectedOptions) {
        let quantity = quantity.max(1);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.same_identity(&product.id, &selected_options))
        {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product,
                quantity,
                selected_options,
            });
        }

        self.open = true;
        self.persist();
    }

    /// Remove every line for `product_id`, regardless of selected options.
    ///
    /// Removal is coarser than addition by design of the cart UI; see the
    /// module docs. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| line.product.id != *product_id);
        self.persist();
    }

    /// Set the quantity of every line for `product_id` to exactly
    /// `quantity`. Requests below 1 are rejected as a silent no-op, never
    /// clamped.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        for line in self
            .lines
            .iter_mut()
            .filter(|line| line.product.id == *product_id)
        {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Total units across all lines, recomputed on every call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Total price across all lines, recomputed on every call - never
    /// cached, so it cannot drift from the line items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Read access to the current lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart-view openness affordance. The manager only records it;
    /// presenting the cart view is the container's business.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Raise the openness affordance.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Lower the openness affordance.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Drop every line and the persisted snapshot.
    pub fn clear(&mut self) {
        self.lines.clear();
        storage::clear_snapshot(self.store.as_ref(), CART_SNAPSHOT_KEY);
    }

    fn persist(&self) {
        storage::save_snapshot(self.store.as_ref(), CART_SNAPSHOT_KEY, &self.lines);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::storage::MemoryStore;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            original_price: None,
            category: None,
            sub_category: None,
            fabric: None,
            color: None,
            technique: None,
            occasion: None,
            image_urls: vec![],
            featured_image_url: None,
            description: None,
            keywords: vec![],
            stock: None,
            average_rating: None,
            review_count: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn manager() -> CartManager {
        CartManager::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_same_options_merges_quantities() {
        let mut cart = manager();
        cart.add(product("a", 5000), 1, SelectedOptions::none());
        cart.add(product("a", 5000), 2, SelectedOptions::none());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_add_differing_options_stays_distinct() {
        let mut cart = manager();
        let plain = SelectedOptions::none();
        let stitched = SelectedOptions::none().with("Custom Blouse Stitching", Decimal::from(1200));

        cart.add(product("a", 5000), 1, plain);
        cart.add(product("a", 5000), 1, stitched);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_options_identity_ignores_insertion_order() {
        let mut cart = manager();
        let one = SelectedOptions::none()
            .with("Add Fall & Pico", Decimal::from(150))
            .with("Premium Tassels", Decimal::from(250));
        let other = SelectedOptions::none()
            .with("Premium Tassels", Decimal::from(250))
            .with("Add Fall & Pico", Decimal::from(150));

        cart.add(product("a", 5000), 1, one);
        cart.add(product("a", 5000), 1, other);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_quantity_zero_is_treated_as_one() {
        let mut cart = manager();
        cart.add(product("a", 5000), 0, SelectedOptions::none());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_update_quantity_below_one_is_a_no_op() {
        let mut cart = manager();
        cart.add(product("a", 5000), 2, SelectedOptions::none());

        cart.update_quantity(&ProductId::new("a"), 0);
        assert_eq!(cart.count(), 2);

        cart.update_quantity(&ProductId::new("a"), 5);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_remove_drops_every_variant_of_the_product() {
        let mut cart = manager();
        let stitched = SelectedOptions::none().with("Custom Blouse Stitching", Decimal::from(1200));
        cart.add(product("a", 5000), 1, SelectedOptions::none());
        cart.add(product("a", 5000), 1, stitched);
        cart.add(product("b", 2000), 1, SelectedOptions::none());

        cart.remove(&ProductId::new("a"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().product.id, ProductId::new("b"));
    }

    #[test]
    fn test_total_is_recomputed_from_lines() {
        let mut cart = manager();
        let addons = SelectedOptions::none().with("Add Fall & Pico", Decimal::from(150));
        cart.add(product("a", 5000), 2, addons); // 2 x 5150
        cart.add(product("b", 2000), 1, SelectedOptions::none());

        assert_eq!(cart.total(), Decimal::from(12300));

        cart.update_quantity(&ProductId::new("a"), 1);
        assert_eq!(cart.total(), Decimal::from(7150));

        cart.remove(&ProductId::new("b"));
        assert_eq!(cart.total(), Decimal::from(5150));
    }

    #[test]
    fn test_add_opens_the_cart_affordance() {
        let mut cart = manager();
        assert!(!cart.is_open());

        cart.add(product("a", 5000), 1, SelectedOptions::none());
        assert!(cart.is_open());

        cart.close();
        assert!(!cart.is_open());
    }

    #[test]
    fn test_snapshot_restores_across_managers() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());

        let mut cart = CartManager::new(Arc::clone(&store));
        cart.add(product("a", 5000), 2, SelectedOptions::none());

        let restored = CartManager::new(Arc::clone(&store));
        assert_eq!(restored.count(), 2);
        assert_eq!(restored.total(), Decimal::from(10000));
        // The openness affordance is per-session, not persisted.
        assert!(!restored.is_open());
    }

    #[test]
    fn test_clear_empties_cart_and_snapshot() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());

        let mut cart = CartManager::new(Arc::clone(&store));
        cart.add(product("a", 5000), 1, SelectedOptions::none());
        cart.clear();

        assert!(cart.is_empty());
        let restored = CartManager::new(store);
        assert!(restored.is_empty());
    }
}
