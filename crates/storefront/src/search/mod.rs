//! Client-side search and result ordering.
//!
//! The engine is a pure, synchronous function of (catalog entries, query):
//! it is recomputed whole on every query change, never patched
//! incrementally. Debounce policy belongs to the UI adapter, which keeps
//! everything here independently testable without timers.
//!
//! Free-text matching runs in two phases over the normalized search text:
//!
//! 1. **Strict (AND)**: keep entries containing *every* query term.
//! 2. **Loose fallback (OR)**: only when the strict phase finds nothing,
//!    re-filter the full catalog keeping entries containing *any* term -
//!    the typo/partial-match safety net.
//!
//! The engine imposes no minimum query length; "too short to search" gates
//! are caller policy layered on top.

mod filters;

pub use filters::{FilterGroup, FilterSelection};

use pahnawa_core::Product;

use crate::catalog::CatalogEntry;

/// Result cap for compact/popup search contexts. The dedicated search page
/// passes no limit.
pub const POPUP_RESULT_LIMIT: usize = 5;

/// Two-phase free-text search over the catalog.
///
/// An empty or whitespace-only query yields an empty result set, not
/// "match everything". Results keep catalog order and are truncated to
/// `limit` when one is given.
#[must_use]
pub fn search(entries: &[CatalogEntry], query: &str, limit: Option<usize>) -> Vec<Product> {
    let query = query.trim().to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    // Phase A: every term must appear somewhere in the entry.
    let mut matches: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| terms.iter().all(|term| entry.search_text.contains(term)))
        .collect();

    // Phase B: nothing matched strictly, fall back to any-term matching.
    if matches.is_empty() {
        matches = entries
            .iter()
            .filter(|entry| terms.iter().any(|term| entry.search_text.contains(term)))
            .collect();
    }

    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    matches.into_iter().map(|entry| entry.product.clone()).collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Result ordering, independent of filtering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Creation timestamp descending, product id ascending on ties.
    #[default]
    Newest,
    /// Price ascending; a zero price sorts first.
    PriceLow,
    /// Price descending.
    PriceHigh,
}

impl SortOrder {
    /// Parse from URL parameter value. Unknown values fall back to newest.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            _ => Self::Newest,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    /// Human label shown in the sort dropdown.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
        }
    }
}

/// Sort `products` in place. Price sorts are stable, so equal prices keep
/// their prior (newest-first) relative order.
pub fn sort_products(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Newest => crate::catalog::sort_newest_first(products),
        SortOrder::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Apply structured filters then sort: the shop listing pipeline.
#[must_use]
pub fn filtered_products(
    entries: &[CatalogEntry],
    selection: &FilterSelection,
    order: SortOrder,
) -> Vec<Product> {
    let mut products: Vec<Product> = entries
        .iter()
        .filter(|entry| selection.matches(&entry.product))
        .map(|entry| entry.product.clone())
        .collect();
    sort_products(&mut products, order);
    products
}
