//! End-to-end catalog scenarios: sort, structured filters, and search over
//! one seeded session, mirroring how the Shop and Search pages drive the
//! layer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pahnawa_core::ProductId;
use pahnawa_integration_tests::{day, init_tracing, product, seeded_session};
use pahnawa_storefront::search::{FilterGroup, FilterSelection, SortOrder};
use pahnawa_storefront::storage::MemoryStore;

// =============================================================================
// The reference scenario
// =============================================================================

/// Catalog: a red Banarasi saree (older, ₹5000) and a blue cotton suit
/// (newer, ₹2000).
fn two_product_session() -> pahnawa_storefront::session::StorefrontSession {
    init_tracing();

    let mut saree = product("a", "Banarasi Silk Saree", 5000, day(1));
    saree.color = Some("Red".to_owned());

    let mut suit = product("b", "Cotton Suit", 2000, day(2));
    suit.color = Some("Blue".to_owned());

    seeded_session(vec![saree, suit], Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_newest_sort_puts_the_later_product_first() {
    let session = two_product_session();
    let products = session
        .shop_products(
            &FilterSelection::new(),
            SortOrder::Newest,
            &CancellationToken::new(),
        )
        .await;

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_price_low_sort_puts_the_cheaper_product_first() {
    let session = two_product_session();
    let products = session
        .shop_products(
            &FilterSelection::new(),
            SortOrder::PriceLow,
            &CancellationToken::new(),
        )
        .await;

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_color_filter_narrows_to_the_red_saree() {
    let session = two_product_session();

    let mut selection = FilterSelection::new();
    selection.select(FilterGroup::Color, "Red");

    let products = session
        .shop_products(&selection, SortOrder::Newest, &CancellationToken::new())
        .await;

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[tokio::test]
async fn test_search_finds_the_suit() {
    let session = two_product_session();
    let results = session
        .search_page("suit", &CancellationToken::new())
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results.first().map(|p| p.id.clone()),
        Some(ProductId::new("b"))
    );
}

// =============================================================================
// Determinism and cancellation
// =============================================================================

#[tokio::test]
async fn test_equal_timestamps_order_by_id() {
    init_tracing();
    let session = seeded_session(
        vec![
            product("z", "Saree Three", 100, day(5)),
            product("a", "Saree One", 100, day(5)),
            product("m", "Saree Two", 100, day(5)),
        ],
        Arc::new(MemoryStore::new()),
    );

    let products = session
        .shop_products(
            &FilterSelection::new(),
            SortOrder::Newest,
            &CancellationToken::new(),
        )
        .await;

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "m", "z"]);
}

#[tokio::test]
async fn test_cancelled_refresh_never_commits() {
    init_tracing();
    let session = seeded_session(
        vec![product("a", "Banarasi Silk Saree", 5000, day(1))],
        Arc::new(MemoryStore::new()),
    );

    // The owning view tore down before the response landed: whatever the
    // fetch produced (including the empty degradation) must be dropped.
    let cancel = CancellationToken::new();
    cancel.cancel();
    session.catalog().refresh(None, &cancel).await;

    assert_eq!(session.catalog().len(), 1);
}

#[tokio::test]
async fn test_guard_skips_refetch_when_loaded() {
    let session = two_product_session();

    // With a snapshot present, ensure_loaded never reaches the network,
    // so the seeded products survive untouched.
    session
        .catalog()
        .ensure_loaded(None, &CancellationToken::new())
        .await;

    assert_eq!(session.catalog().len(), 2);
}
