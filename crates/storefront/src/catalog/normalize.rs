//! Search-text derivation.
//!
//! Each fetched product gets one lowercase concatenation of its searchable
//! attributes. The engine matches query terms against this string only, so
//! it is rebuilt whenever the catalog is re-fetched and never persisted.

use pahnawa_core::Product;

/// Build the normalized search text for one product.
///
/// Joins name, category, sub-category, fabric, color, technique,
/// description, and keywords with single spaces, lowercased. Absent fields
/// contribute nothing (never a placeholder word).
#[must_use]
pub fn search_text(product: &Product) -> String {
    let mut parts: Vec<&str> = vec![product.name.as_str()];

    for field in [
        product.category.as_deref(),
        product.sub_category.as_deref(),
        product.fabric.as_deref(),
        product.color.as_deref(),
        product.technique.as_deref(),
        product.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        parts.push(field);
    }

    for keyword in &product.keywords {
        parts.push(keyword.as_str());
    }

    parts.join(" ").to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pahnawa_core::ProductId;
    use rust_decimal::Decimal;

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
            technique: Some("Kadhua".to_owned()),
            occasion: None,
            image_urls: vec![],
            featured_image_url: None,
            description: None,
            keywords: vec!["bridal".to_owned(), "wedding".to_owned()],
            stock: None,
            average_rating: None,
            review_count: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_search_text_is_lowercased_and_joined() {
        assert_eq!(
            search_text(&product()),
            "banarasi silk saree sarees katan silk red kadhua bridal wedding"
        );
    }

    #[test]
    fn test_absent_fields_contribute_nothing() {
        let mut p = product();
        p.category = None;
        p.fabric = None;
        p.color = None;
        p.technique = None;
        p.keywords.clear();

        let text = search_text(&p);
        assert_eq!(text, "banarasi silk saree");
        // No placeholder words leak into the index.
        assert!(!text.contains("undefined"));
        assert!(!text.contains("null"));
    }
}
