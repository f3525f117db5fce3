//! City/spot discovery directory records and the global list filter.
//!
//! Spots are places (cafes, ghats, stores) listed per city with reviews and
//! a free-text price range. The directory pages narrow a fetched list with
//! one of four global filters; everything here is pure and synchronous.

use serde::{Deserialize, Serialize};

use pahnawa_core::SpotId;

/// A directory spot as presented to the discovery pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Opaque document identifier assigned by the remote store.
    pub id: SpotId,
    /// Display name.
    pub name: String,
    /// City the spot belongs to (e.g., "Varanasi").
    pub city: Option<String>,
    /// Directory category (e.g., "Street Food").
    pub category: Option<String>,
    /// Free-text price range as entered by ambassadors (e.g., "₹200-₹350").
    pub price_range: Option<String>,
    /// Aggregate review rating (1.0 - 5.0).
    pub average_rating: Option<f64>,
    /// Number of reviews behind the aggregate rating.
    pub review_count: Option<u32>,
}

/// Ratings at or above this are "Popular".
const POPULAR_RATING_THRESHOLD: f64 = 4.5;
/// Spots whose lowest listed price is at or under this are "Budget".
const BUDGET_PRICE_CEILING: u32 = 350;
/// Spots need more than this many reviews to be "Recommended".
const RECOMMENDED_REVIEW_FLOOR: u32 = 10;

/// Global quick-filter applied across directory listings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GlobalFilter {
    #[default]
    All,
    Popular,
    Budget,
    Recommended,
}

impl GlobalFilter {
    /// Parse from a filter chip id. Unknown ids fall back to `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Popular" => Self::Popular,
            "Budget" => Self::Budget,
            "Recommended" => Self::Recommended,
            _ => Self::All,
        }
    }

    /// The filter chip id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Popular => "Popular",
            Self::Budget => "Budget",
            Self::Recommended => "Recommended",
        }
    }

    /// Human label shown on the chip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Popular => "Popular",
            Self::Budget => "Budget Friendly",
            Self::Recommended => "Recommended",
        }
    }

    /// Whether `spot` passes this filter.
    #[must_use]
    pub fn matches(self, spot: &Spot) -> bool {
        match self {
            Self::All => true,
            Self::Popular => spot.average_rating.unwrap_or(0.0) >= POPULAR_RATING_THRESHOLD,
            Self::Budget => spot
                .price_range
                .as_deref()
                .and_then(first_number)
                .is_some_and(|price| price <= BUDGET_PRICE_CEILING),
            Self::Recommended => spot.review_count.unwrap_or(0) > RECOMMENDED_REVIEW_FLOOR,
        }
    }
}

/// Narrow `spots` to those passing `filter`, preserving order.
#[must_use]
pub fn apply_global_filter(spots: &[Spot], filter: GlobalFilter) -> Vec<Spot> {
    spots
        .iter()
        .filter(|spot| filter.matches(spot))
        .cloned()
        .collect()
}

/// First run of digits in a free-text price range ("₹200-₹350" -> 200).
fn first_number(raw: &str) -> Option<u32> {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
