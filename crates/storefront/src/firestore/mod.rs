//! Firestore REST API client.
//!
//! # Architecture
//!
//! - The hosted document store is the source of truth - NO local sync,
//!   direct `runQuery` calls over plain JSON (no codegen layer needed)
//! - In-memory caching via `moka` for query responses (5 minute TTL)
//! - Typed field values decode through [`value::FirestoreValue`]; document
//!   to domain-record conversion lives in [`conversions`] and skips
//!   malformed documents with a warning rather than failing the batch
//!
//! # Example
//!
//! ```rust,ignore
//! use pahnawa_storefront::firestore::FirestoreClient;
//!
//! let client = FirestoreClient::new(&config.firestore);
//!
//! // Newest 100 products for the search popup
//! let products = client.get_products(Some(100)).await?;
//! ```

mod conversions;
pub mod value;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use pahnawa_core::Product;

use crate::config::FirestoreConfig;
use crate::spots::Spot;
use conversions::{product_from_document, spot_from_document};
use value::FirestoreValue;

/// Collection holding catalog products.
const PRODUCTS_COLLECTION: &str = "products";
/// Collection holding discovery-directory spots.
const SPOTS_COLLECTION: &str = "spots";

/// Errors that can occur when querying the document store.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// One row of a `runQuery` response. Rows without a `document` key carry
/// only read metadata and are skipped.
#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<Document>,
}

/// A Firestore document: full resource name plus typed fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name; the trailing path segment is the document id.
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FirestoreValue>,
    /// Server-side creation time, the fallback when a document carries no
    /// `createdAt` field.
    pub create_time: Option<DateTime<Utc>>,
}

impl Document {
    /// The document id: the last segment of the resource name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Cached query responses.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Spots(Vec<Spot>),
}

// =============================================================================
// FirestoreClient
// =============================================================================

/// Client for the Firestore REST API.
///
/// Provides read access to products and spots. Query responses are cached
/// for 5 minutes.
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<FirestoreClientInner>,
}

struct FirestoreClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl FirestoreClient {
    /// Create a new client for the configured project.
    #[must_use]
    pub fn new(config: &FirestoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents",
            config.project_id, config.database
        );

        Self {
            inner: Arc::new(FirestoreClientInner {
                client: reqwest::Client::new(),
                endpoint,
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Run a structured query against `collection`, ordered newest-first
    /// by `createdAt`, optionally bounded by `limit`.
    async fn run_query(
        &self,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, FirestoreError> {
        let mut structured_query = serde_json::json!({
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": "createdAt" },
                "direction": "DESCENDING"
            }]
        });
        if let Some(limit) = limit
            && let Some(query) = structured_query.as_object_mut()
        {
            query.insert("limit".to_string(), serde_json::json!(limit));
        }

        let url = format!("{}:runQuery", self.inner.endpoint);
        let response = self
            .inner
            .client
            .post(&url)
            .query(&[("key", &self.inner.api_key)])
            .json(&serde_json::json!({ "structuredQuery": structured_query }))
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FirestoreError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Firestore returned non-success status"
            );
            return Err(FirestoreError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let rows: Vec<QueryRow> = match serde_json::from_str(&response_text) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Firestore query response"
                );
                return Err(FirestoreError::Parse(e));
            }
        };

        Ok(rows.into_iter().filter_map(|row| row.document).collect())
    }

    /// Fetch products, newest-first, optionally capped at `limit`.
    ///
    /// Malformed documents are skipped with a warning; they never fail the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FirestoreError> {
        let cache_key = limit.map_or_else(
            || "products:all".to_string(),
            |n| format!("products:limit={n}"),
        );

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let documents = self.run_query(PRODUCTS_COLLECTION, limit).await?;
        let products: Vec<Product> = documents.iter().filter_map(product_from_document).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch directory spots, newest-first. City narrowing happens
    /// client-side, like every other directory filter.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn get_spots(&self) -> Result<Vec<Spot>, FirestoreError> {
        let cache_key = "spots:all".to_string();

        if let Some(CacheValue::Spots(spots)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for spots");
            return Ok(spots);
        }

        let documents = self.run_query(SPOTS_COLLECTION, None).await?;
        let spots: Vec<Spot> = documents.iter().filter_map(spot_from_document).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Spots(spots.clone()))
            .await;

        Ok(spots)
    }

    /// Drop every cached response. The next query goes to the network.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}
