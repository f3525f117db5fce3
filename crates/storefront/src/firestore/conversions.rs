//! Document to domain-record conversion.
//!
//! All optional-field defaulting happens here, once, so downstream code
//! never re-implements fallback chains: absent text fields become `None`,
//! an absent price becomes zero, and `createdAt` falls back to the server
//! creation time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use pahnawa_core::{Product, ProductId, SpotId};

use crate::spots::Spot;

use super::Document;
use super::value::FirestoreValue;

/// Convert a product document, skipping (with a warning) documents that
/// lack a display name.
pub fn product_from_document(doc: &Document) -> Option<Product> {
    let Some(name) = text_field(doc, "name") else {
        warn!(id = %doc.id(), "Product document has no name, skipping");
        return None;
    };

    let price = doc
        .fields
        .get("price")
        .and_then(FirestoreValue::as_decimal)
        .unwrap_or(Decimal::ZERO);

    // Older documents record the weaving technique under `weave`.
    let technique = text_field(doc, "technique").or_else(|| text_field(doc, "weave"));

    Some(Product {
        id: ProductId::new(doc.id()),
        name,
        price,
        original_price: doc
            .fields
            .get("originalPrice")
            .and_then(FirestoreValue::as_decimal),
        category: text_field(doc, "category"),
        sub_category: text_field(doc, "subCategory"),
        fabric: text_field(doc, "fabric"),
        color: text_field(doc, "color"),
        technique,
        occasion: text_field(doc, "occasion"),
        image_urls: doc
            .fields
            .get("imageUrls")
            .map(FirestoreValue::as_string_array)
            .unwrap_or_default(),
        featured_image_url: text_field(doc, "featuredImageUrl"),
        description: text_field(doc, "description"),
        keywords: doc
            .fields
            .get("keywords")
            .map(FirestoreValue::as_string_array)
            .unwrap_or_default(),
        stock: doc.fields.get("stock").and_then(FirestoreValue::as_u32),
        average_rating: doc
            .fields
            .get("averageRating")
            .and_then(FirestoreValue::as_f64),
        review_count: doc
            .fields
            .get("reviewCount")
            .and_then(FirestoreValue::as_u32),
        created_at: created_at(doc),
    })
}

/// Convert a spot document, skipping (with a warning) documents that lack
/// a display name.
pub fn spot_from_document(doc: &Document) -> Option<Spot> {
    let Some(name) = text_field(doc, "name") else {
        warn!(id = %doc.id(), "Spot document has no name, skipping");
        return None;
    };

    Some(Spot {
        id: SpotId::new(doc.id()),
        name,
        city: text_field(doc, "city"),
        category: text_field(doc, "category"),
        price_range: text_field(doc, "priceRange"),
        average_rating: doc
            .fields
            .get("averageRating")
            .and_then(FirestoreValue::as_f64),
        review_count: doc
            .fields
            .get("reviewCount")
            .and_then(FirestoreValue::as_u32),
    })
}

/// A non-empty text field, trimmed. Empty strings normalize to `None`.
fn text_field(doc: &Document, key: &str) -> Option<String> {
    doc.fields
        .get(key)
        .and_then(FirestoreValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// The `createdAt` field, falling back to server creation time, then to
/// the epoch so a timestamp always exists for ordering.
fn created_at(doc: &Document) -> DateTime<Utc> {
    doc.fields
        .get("createdAt")
        .and_then(FirestoreValue::as_timestamp)
        .or(doc.create_time)
        .unwrap_or(DateTime::UNIX_EPOCH)
}
