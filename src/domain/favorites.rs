//! Session-scoped cache of favorite paper identifiers.
//!
//! The set is loaded once from the favorites listing and afterwards changes
//! only when an add/remove request succeeds. Feed enrichment borrows it
//! immutably, so nothing on the fetch path can write to it.

use super::paper::FeedPage;
use std::collections::HashSet;

/// Page size used when pulling favorite identifiers in bulk.
///
/// Favorites beyond this many are not loaded; the listing is fetched as a
/// single page rather than walked.
pub const DEFAULT_FAVORITES_CAP: u32 = 1000;

/// Set of paper identifiers the current user has marked as favorite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from any iterator of identifiers.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a set from a bulk favorites listing page.
    ///
    /// Logs when the listing reports more favorites than the page carried,
    /// since membership for the remainder is unknown.
    #[must_use]
    pub fn from_listing(page: &FeedPage) -> Self {
        let set = Self::from_ids(page.papers.iter().map(|p| p.id.clone()));
        if page.total > set.len() as u64 {
            tracing::warn!(
                loaded = set.len(),
                total = page.total,
                "favorites listing exceeds bulk cap; membership beyond cap unknown"
            );
        }
        set
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Records a successful add. Returns `false` if the id was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Records a successful removal. Returns `false` if the id was absent.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paper::PaperRecord;

    fn page(ids: &[&str], total: u64) -> FeedPage {
        FeedPage {
            papers: ids
                .iter()
                .map(|id| serde_json::from_value::<PaperRecord>(serde_json::json!({ "id": id })).unwrap())
                .collect(),
            total,
        }
    }

    #[test]
    fn listing_builds_membership() {
        let set = FavoriteSet::from_listing(&page(&["a", "b"], 2));
        assert!(set.contains("a"));
        assert!(set.contains("b"));
        assert!(!set.contains("c"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn listing_over_cap_keeps_what_was_loaded() {
        let set = FavoriteSet::from_listing(&page(&["a"], 1500));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn insert_and_remove_report_changes() {
        let mut set = FavoriteSet::new();
        assert!(set.insert("x"));
        assert!(!set.insert("x"));
        assert!(set.remove("x"));
        assert!(!set.remove("x"));
        assert!(set.is_empty());
    }
}
