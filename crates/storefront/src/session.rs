//! Application session state.
//!
//! One [`StorefrontSession`] per running app instance composes the catalog,
//! cart, and favorites over a caller-injected snapshot store. There are no
//! module-level singletons: construct, use, and [`StorefrontSession::reset`]
//! for a clean slate (which is what test isolation leans on).

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pahnawa_core::{CurrentUser, Product, ProductId};

use crate::cart::{CartManager, SelectedOptions};
use crate::catalog::CatalogService;
use crate::config::PahnawaConfig;
use crate::favorites::FavoritesManager;
use crate::firestore::FirestoreClient;
use crate::search::{self, FilterSelection, SortOrder};
use crate::storage::SnapshotStore;

/// Queries shorter than this are "too short to search" on the dedicated
/// search page. The engine itself has no minimum; this is caller policy.
pub const MIN_PAGE_QUERY_LEN: usize = 2;

/// Session-scoped state for the storefront.
pub struct StorefrontSession {
    config: PahnawaConfig,
    catalog: CatalogService,
    cart: CartManager,
    favorites: FavoritesManager,
    current_user: Option<CurrentUser>,
}

impl StorefrontSession {
    /// Create a session over `store`, restoring persisted cart/favorites
    /// snapshots.
    #[must_use]
    pub fn new(config: PahnawaConfig, store: Arc<dyn SnapshotStore>) -> Self {
        let client = FirestoreClient::new(&config.firestore);
        Self {
            config,
            catalog: CatalogService::new(client),
            cart: CartManager::new(Arc::clone(&store)),
            favorites: FavoritesManager::new(store),
            current_user: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The session catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Read access to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// Mutable access to the cart.
    pub const fn cart_mut(&mut self) -> &mut CartManager {
        &mut self.cart
    }

    /// Read access to the favorites.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesManager {
        &self.favorites
    }

    /// Mutable access to the favorites.
    pub const fn favorites_mut(&mut self) -> &mut FavoritesManager {
        &mut self.favorites
    }

    /// The signed-in identity, when the auth provider supplied one.
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Record the identity read from the auth provider.
    pub fn set_current_user(&mut self, user: Option<CurrentUser>) {
        self.current_user = user;
    }

    // =========================================================================
    // Search contexts
    // =========================================================================

    /// Compact popup search: bounded catalog fetch, top results only.
    ///
    /// The catalog is fetched once per session (capped at the configured
    /// search-cache limit) and reused for instant matching on later
    /// keystrokes. Debounce stays with the UI.
    pub async fn search_popup(&self, query: &str, cancel: &CancellationToken) -> Vec<Product> {
        self.catalog
            .ensure_loaded(Some(self.config.search_cache_limit), cancel)
            .await;
        search::search(
            &self.catalog.entries(),
            query,
            Some(search::POPUP_RESULT_LIMIT),
        )
    }

    /// Dedicated search page: unbounded catalog, unbounded results, with
    /// the page's minimum-length gate applied.
    pub async fn search_page(&self, query: &str, cancel: &CancellationToken) -> Vec<Product> {
        if query.trim().chars().count() < MIN_PAGE_QUERY_LEN {
            return Vec::new();
        }
        self.catalog.ensure_loaded(None, cancel).await;
        search::search(&self.catalog.entries(), query, None)
    }

    /// Shop listing: structured filters plus sort over the full catalog.
    pub async fn shop_products(
        &self,
        selection: &FilterSelection,
        order: SortOrder,
        cancel: &CancellationToken,
    ) -> Vec<Product> {
        self.catalog.ensure_loaded(None, cancel).await;
        search::filtered_products(&self.catalog.entries(), selection, order)
    }

    // =========================================================================
    // Cross-manager flows
    // =========================================================================

    /// Wishlist "move to cart": add one unit with no add-ons, then drop the
    /// wishlist entry. A no-op when the product is not saved.
    pub fn move_to_cart(&mut self, product_id: &ProductId) {
        let Some(product) = self
            .favorites
            .items()
            .iter()
            .find(|item| item.id == *product_id)
            .cloned()
        else {
            return;
        };

        self.cart.add(product, 1, SelectedOptions::none());
        self.favorites.remove(product_id);
    }

    /// Tear the session down to a clean slate: empty cart and favorites
    /// (persisted snapshots included), cleared catalog, no identity.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.cart.close();
        self.favorites.clear();
        self.catalog.invalidate();
        self.current_user = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use secrecy::SecretString;

    use crate::config::{DEFAULT_SEARCH_CACHE_LIMIT, FirestoreConfig};
    use crate::storage::MemoryStore;

    fn config() -> PahnawaConfig {
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

    fn session() -> StorefrontSession {
        StorefrontSession::new(config(), Arc::new(MemoryStore::new()))
    }

    fn product(id: &str, name: &str, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::from(1000),
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
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_search_page_gates_short_queries() {
        let session = session();
        session
            .catalog()
            .install(vec![product("a", "Banarasi Saree", 1)]);

        let cancel = CancellationToken::new();
        assert!(session.search_page("b", &cancel).await.is_empty());
        assert_eq!(session.search_page("ba", &cancel).await.len(), 1);
    }

    #[tokio::test]
    async fn test_search_popup_caps_results() {
        let session = session();
        let products: Vec<Product> = (0..8)
            .map(|i| product(&format!("p{i}"), "Silk Saree", 1))
            .collect();
        session.catalog().install(products);

        let results = session
            .search_popup("saree", &CancellationToken::new())
            .await;
        assert_eq!(results.len(), search::POPUP_RESULT_LIMIT);
    }

    #[test]
    fn test_move_to_cart_transfers_the_product() {
        let mut session = session();
        let p = product("a", "Banarasi Saree", 1);

        session.favorites_mut().toggle(&p);
        session.move_to_cart(&ProductId::new("a"));

        assert_eq!(session.cart().count(), 1);
        assert!(!session.favorites().is_favorite(&ProductId::new("a")));

        // Moving an unsaved product changes nothing.
        session.move_to_cart(&ProductId::new("missing"));
        assert_eq!(session.cart().count(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session();
        let p = product("a", "Banarasi Saree", 1);

        session.catalog().install(vec![p.clone()]);
        session.cart_mut().add(p.clone(), 2, SelectedOptions::none());
        session.favorites_mut().toggle(&p);
        session.set_current_user(Some(CurrentUser {
            uid: pahnawa_core::UserId::new("u1"),
            display_name: None,
            email: None,
            photo_url: None,
        }));

        session.reset();

        assert!(session.cart().is_empty());
        assert!(!session.cart().is_open());
        assert!(session.favorites().is_empty());
        assert!(session.catalog().is_empty());
        assert!(session.current_user().is_none());
    }
}
