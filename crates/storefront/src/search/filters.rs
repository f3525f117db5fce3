//! Structured filter groups.
//!
//! A selection maps each filter group to the labels currently chosen in
//! the sidebar. Groups compose conjunctively: a product must satisfy every
//! active group. Within a group, matching any selected label suffices, and
//! the substring test runs both ways so partial and pluralized labels
//! ("Saree" vs "Sarees", "Silk" vs "Katan Silk") still hit.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use pahnawa_core::Product;

/// The sidebar filter groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FilterGroup {
    Category,
    Color,
    Fabric,
    Craft,
    Occasion,
}

impl FilterGroup {
    /// All groups in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Category,
        Self::Color,
        Self::Fabric,
        Self::Craft,
        Self::Occasion,
    ];

    /// Parse from a group title.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Category" => Some(Self::Category),
            "Color" => Some(Self::Color),
            "Fabric" => Some(Self::Fabric),
            "Craft" => Some(Self::Craft),
            "Occasion" => Some(Self::Occasion),
            _ => None,
        }
    }

    /// The group title.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Color => "Color",
            Self::Fabric => "Fabric",
            Self::Craft => "Craft",
            Self::Occasion => "Occasion",
        }
    }
}

/// The active filter selections.
///
/// Invariant: a group with no selected labels is absent from the map
/// entirely - absence means "no constraint from this group", never
/// "exclude everything". [`FilterSelection::toggle`] and
/// [`FilterSelection::remove`] maintain this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    groups: BTreeMap<FilterGroup, BTreeSet<String>>,
}

impl FilterSelection {
    /// No active filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `label` within `group`: select when absent, deselect when
    /// present. Deselecting the last label drops the group key.
    pub fn toggle(&mut self, group: FilterGroup, label: &str) {
        let labels = self.groups.entry(group).or_default();
        if !labels.remove(label) {
            labels.insert(label.to_owned());
        }
        if labels.is_empty() {
            self.groups.remove(&group);
        }
    }

    /// Select `label` within `group` (idempotent).
    pub fn select(&mut self, group: FilterGroup, label: &str) {
        self.groups.entry(group).or_default().insert(label.to_owned());
    }

    /// Deselect `label` within `group`, dropping the group key when it
    /// empties. Deselecting an absent label is a no-op.
    pub fn remove(&mut self, group: FilterGroup, label: &str) {
        if let Some(labels) = self.groups.get_mut(&group) {
            labels.remove(label);
            if labels.is_empty() {
                self.groups.remove(&group);
            }
        }
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Whether `label` is selected within `group`.
    #[must_use]
    pub fn is_selected(&self, group: FilterGroup, label: &str) -> bool {
        self.groups
            .get(&group)
            .is_some_and(|labels| labels.contains(label))
    }

    /// The labels selected within `group`, `None` when the group is
    /// inactive.
    #[must_use]
    pub fn selected(&self, group: FilterGroup) -> Option<&BTreeSet<String>> {
        self.groups.get(&group)
    }

    /// Whether no group is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Active (group, labels) pairs.
    pub fn active_groups(&self) -> impl Iterator<Item = (FilterGroup, &BTreeSet<String>)> {
        self.groups.iter().map(|(group, labels)| (*group, labels))
    }

    /// Total selected labels across all groups.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Whether `product` satisfies every active group.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.groups.iter().all(|(group, labels)| {
            match group {
                // Category also accepts a hit on the finer sub-category.
                FilterGroup::Category => {
                    value_matches(product.category.as_deref(), labels)
                        || value_matches(product.sub_category.as_deref(), labels)
                }
                FilterGroup::Color => value_matches(product.color.as_deref(), labels),
                FilterGroup::Fabric => value_matches(product.fabric.as_deref(), labels),
                FilterGroup::Craft => value_matches(product.technique.as_deref(), labels),
                FilterGroup::Occasion => value_matches(product.occasion.as_deref(), labels),
            }
        })
    }
}

/// Bidirectional, case-insensitive substring test against any label.
///
/// An absent attribute normalizes to the empty string, which every label
/// trivially contains, so such products pass the group.
fn value_matches(value: Option<&str>, labels: &BTreeSet<String>) -> bool {
    let value = value.unwrap_or("").to_lowercase();
    labels.iter().any(|label| {
        let label = label.to_lowercase();
        value.contains(&label) || label.contains(&value)
    })
}
