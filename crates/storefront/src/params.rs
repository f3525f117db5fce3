//! Route query-parameter seeding.
//!
//! The Shop page reads `?cat=sarees` to pre-select a category filter and
//! the Search page reads `?q=banarasi` to seed the query text. Parsing is
//! pure over the raw query string; navigation itself belongs to the UI
//! shell.

use url::form_urlencoded;

use crate::search::{FilterGroup, FilterSelection};

/// Initial state the Shop page derives from its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopParams {
    /// Category seeded from `?cat=`, capitalized for the filter sidebar.
    pub category: Option<String>,
}

impl ShopParams {
    /// Parse a raw query string (`cat=sarees&utm_source=...`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let category = param(query, "cat").map(|cat| capitalize_first(&cat));
        Self { category }
    }

    /// Seed a filter selection from the parsed category, if any.
    #[must_use]
    pub fn initial_filters(&self) -> FilterSelection {
        let mut selection = FilterSelection::new();
        if let Some(category) = &self.category {
            selection.select(FilterGroup::Category, category);
        }
        selection
    }
}

/// Initial query text the Search page derives from `?q=`.
///
/// Blank values are treated as absent.
#[must_use]
pub fn initial_search_query(query: &str) -> Option<String> {
    param(query, "q").filter(|q| !q.trim().is_empty())
}

/// First occurrence of `key` in the query string, percent-decoded.
fn param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Uppercase the first character ("sarees" -> "Sarees").
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
