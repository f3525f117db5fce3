//! The catalog product record.
//!
//! Products are read-only documents sourced from the hosted store. Every
//! optional field has a documented default applied once at the catalog
//! normalize boundary, so downstream code never re-implements fallback
//! chains.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A handloom product as presented to the catalog interaction layer.
///
/// The identifier is stable and unique within a fetch snapshot. `price` is
/// always present by the time a product reaches the cart or favorites;
/// documents without a price decode as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque document identifier assigned by the remote store.
    pub id: ProductId,
    /// Display name (e.g., "Banarasi Silk Saree").
    pub name: String,
    /// Price in INR. Defaults to zero when the document carries none.
    pub price: Decimal,
    /// Pre-discount price, shown struck through when present.
    pub original_price: Option<Decimal>,
    /// Top-level category (e.g., "Sarees").
    pub category: Option<String>,
    /// Finer-grained category (e.g., "Bridal Sarees").
    pub sub_category: Option<String>,
    /// Base fabric (e.g., "Katan Silk").
    pub fabric: Option<String>,
    /// Dominant colour (e.g., "Red").
    pub color: Option<String>,
    /// Weaving technique (e.g., "Kadhua"). Documents may carry this under
    /// the legacy `weave` field; the decode boundary folds both into here.
    pub technique: Option<String>,
    /// Occasion tag (e.g., "Bridal").
    pub occasion: Option<String>,
    /// Gallery image URLs, possibly empty.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Hero image URL, preferred over the first gallery image.
    pub featured_image_url: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Merchandising keywords used only for search.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Units in stock, when the document tracks inventory.
    pub stock: Option<u32>,
    /// Aggregate review rating (1.0 - 5.0).
    pub average_rating: Option<f64>,
    /// Number of reviews behind the aggregate rating.
    pub review_count: Option<u32>,
    /// Creation timestamp; drives the default newest-first ordering.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The image to lead with: the featured image, falling back to the
    /// first gallery image.
    #[must_use]
    pub fn display_image(&self) -> Option<&str> {
        self.featured_image_url
            .as_deref()
            .or_else(|| self.image_urls.first().map(String::as_str))
    }

    /// Whether a pre-discount price exists and exceeds the current price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Banarasi Silk Saree".to_owned(),
            price: Decimal::from(5000),
            original_price: None,
            category: Some("Sarees".to_owned()),
            sub_category: None,
            fabric: Some("Katan Silk".to_owned()),
            color: Some("Red".to_owned()),
            technique: None,
            occasion: None,
            image_urls: vec!["https://img.example/a.jpg".to_owned()],
            featured_image_url: None,
            description: None,
            keywords: vec![],
            stock: None,
            average_rating: None,
            review_count: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_display_image_falls_back_to_gallery() {
        let mut p = product();
        assert_eq!(p.display_image(), Some("https://img.example/a.jpg"));

        p.featured_image_url = Some("https://img.example/hero.jpg".to_owned());
        assert_eq!(p.display_image(), Some("https://img.example/hero.jpg"));

        p.featured_image_url = None;
        p.image_urls.clear();
        assert_eq!(p.display_image(), None);
    }

    #[test]
    fn test_is_discounted() {
        let mut p = product();
        assert!(!p.is_discounted());

        p.original_price = Some(Decimal::from(6500));
        assert!(p.is_discounted());

        // An "original" price at or below the current price is not a discount.
        p.original_price = Some(Decimal::from(5000));
        assert!(!p.is_discounted());
    }
}
