//! Catalog fetch and normalize.
//!
//! Pulls a bounded, newest-first product list from the remote store and
//! derives the search text each product is matched against. The service
//! starts empty; the first loader populates it and subsequent loads skip
//! the fetch while products are present.
//!
//! Fetch failures are caught at this boundary, logged, and degrade to an
//! empty catalog - they never reach the UI layer. Overlapping fetches are
//! not de-duplicated: a late-arriving response simply overwrites state
//! (last write wins), unless its cancellation token fired first, in which
//! case the result is dropped without committing.

mod normalize;

pub use normalize::search_text;

use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use pahnawa_core::Product;

use crate::firestore::FirestoreClient;

/// One catalog entry: the product plus its derived search text.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    /// Lowercase concatenation of the searchable attributes; rebuilt on
    /// every fetch, never persisted.
    pub search_text: String,
}

impl CatalogEntry {
    fn new(product: Product) -> Self {
        let search_text = search_text(&product);
        Self {
            product,
            search_text,
        }
    }
}

/// Fetch products newest-first, degrading to an empty list on failure.
///
/// Ordering is made deterministic here: creation timestamp descending with
/// the product id ascending as tie-break, regardless of what the remote
/// store returned.
#[instrument(skip(client))]
pub async fn fetch_catalog(client: &FirestoreClient, limit: Option<u32>) -> Vec<Product> {
    match client.get_products(limit).await {
        Ok(mut products) => {
            sort_newest_first(&mut products);
            debug!(count = products.len(), "Fetched catalog");
            products
        }
        Err(e) => {
            warn!(error = %e, "Catalog fetch failed, degrading to empty");
            Vec::new()
        }
    }
}

/// Sort newest-first with product id as the stable tie-break.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// =============================================================================
// CatalogService
// =============================================================================

/// The in-memory catalog for one application session.
///
/// Cheaply cloneable; clones share the same snapshot. Starts empty and is
/// populated by [`CatalogService::ensure_loaded`].
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    client: FirestoreClient,
    entries: RwLock<Vec<CatalogEntry>>,
}

impl CatalogService {
    /// Create an empty catalog over `client`.
    #[must_use]
    pub fn new(client: FirestoreClient) -> Self {
        Self {
            inner: Arc::new(CatalogServiceInner {
                client,
                entries: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Whether a snapshot is present.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner
            .entries
            .read()
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Load the catalog unless products are already present.
    ///
    /// This is the guard against redundant fetches; it does not cancel an
    /// in-flight load from another caller. Pass the token of the owning
    /// view so a teardown drops the result instead of committing it.
    pub async fn ensure_loaded(&self, limit: Option<u32>, cancel: &CancellationToken) {
        if self.is_loaded() {
            debug!("Catalog already loaded, skipping fetch");
            return;
        }
        self.refresh(limit, cancel).await;
    }

    /// Fetch unconditionally and commit unless `cancel` fired first.
    pub async fn refresh(&self, limit: Option<u32>, cancel: &CancellationToken) {
        let products = fetch_catalog(&self.inner.client, limit).await;

        // The owning view went away while the request was in flight; a
        // late result must not resurrect its state.
        if cancel.is_cancelled() {
            debug!("Catalog fetch cancelled before commit, dropping result");
            return;
        }

        let count = products.len();
        self.install(products);
        info!(count, "Catalog snapshot committed");
    }

    /// Replace the snapshot with `products` (last write wins). Search text
    /// is re-derived here, which is what invalidates stale entries.
    pub fn install(&self, products: Vec<Product>) {
        let entries: Vec<CatalogEntry> = products.into_iter().map(CatalogEntry::new).collect();
        if let Ok(mut guard) = self.inner.entries.write() {
            *guard = entries;
        }
    }

    /// Clear the snapshot; the next `ensure_loaded` fetches again.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.inner.entries.write() {
            guard.clear();
        }
    }

    /// A copy of the current entries.
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.inner
            .entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// A copy of the current products, without search text.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner
            .entries
            .read()
            .map(|entries| entries.iter().map(|e| e.product.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of products in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
