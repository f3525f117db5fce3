//! Integration tests for Pahnawa.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pahnawa-integration-tests
//! ```
//!
//! The scenarios exercise the catalog interaction layer end to end:
//! sessions are seeded with a known catalog snapshot (no network) and
//! cart/favorites persistence runs against real snapshot stores.
//!
//! This crate's library part holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;

use pahnawa_core::{Product, ProductId};
use pahnawa_storefront::config::{DEFAULT_SEARCH_CACHE_LIMIT, FirestoreConfig, PahnawaConfig};
use pahnawa_storefront::session::StorefrontSession;
use pahnawa_storefront::storage::SnapshotStore;

/// Initialize test logging once per process. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A config pointing at a test project; never contacted by the scenarios.
#[must_use]
pub fn test_config() -> PahnawaConfig {
    PahnawaConfig {
        firestore: FirestoreConfig {
            project_id: "pahnawa-test".to_owned(),
            database: "(default)".to_owned(),
            api_key: SecretString::from("test-key"),
        },
        search_cache_limit: DEFAULT_SEARCH_CACHE_LIMIT,
        snapshot_dir: ".pahnawa-test".into(),
    }
}

/// A session over `store` with `products` pre-installed as the catalog
/// snapshot, so no fetch ever leaves the process.
#[must_use]
pub fn seeded_session(
    products: Vec<Product>,
    store: Arc<dyn SnapshotStore>,
) -> StorefrontSession {
    let session = StorefrontSession::new(test_config(), store);
    session.catalog().install(products);
    session
}

/// Day `day` of January 2024, the fixture timeline.
#[must_use]
pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Fixture product with the fields the scenarios care about.
#[must_use]
pub fn product(id: &str, name: &str, price: i64, created: DateTime<Utc>) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
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
        created_at: created,
    }
}
