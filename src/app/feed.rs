//! Feed controller: filters, pagination and last-request-wins fetching.
//!
//! The controller never performs I/O. Every trigger (filter change, page
//! change, reload) returns a [`FeedFetch`] describing the request to send,
//! stamped with a fresh sequence number. When a response comes back,
//! [`FeedController::complete`] applies it only if its sequence number is
//! the latest one issued; anything older is discarded as stale.
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready
//!                   │ ▲            │
//!                  err└───load─────┘
//!                   ▼
//!                 Failed ──load──▶ Loading
//! ```

use crate::api::{ApiResult, FeedSource};
use crate::domain::favorites::FavoriteSet;
use crate::domain::filter::{FilterChange, FilterState};
use crate::domain::paper::{FeedPage, FeedRow};
use crate::pagination::{self, PageToken};
use crate::query::{self, FeedQuery};

/// Page size used by both feed screens unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Lifecycle of the displayed page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Carries the message shown to the user.
    Failed(String),
}

/// A fetch the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFetch {
    pub source: FeedSource,
    pub seq: u64,
    pub query: FeedQuery,
}

/// What happened when a response was handed to [`FeedController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Rows and totals were replaced.
    Applied,
    /// The fetch failed; rows were kept and the state is `Failed`.
    Failed,
    /// A newer fetch is outstanding; nothing changed.
    Stale,
    /// The page was applied but the current page fell past the end, so it was
    /// clamped and this follow-up fetch must be sent.
    Refetch(FeedFetch),
}

/// Drives one paginated listing (the feed or the favorites screen).
#[derive(Debug, Clone)]
pub struct FeedController {
    source: FeedSource,
    filters: FilterState,
    page_size: u32,
    current_page: u32,
    total_items: u64,
    total_pages: u32,
    rows: Vec<FeedRow>,
    state: LoadState,
    latest_seq: u64,
    selected: usize,
    expanded: bool,
}

impl FeedController {
    #[must_use]
    pub fn new(source: FeedSource, page_size: u32) -> Self {
        Self {
            source,
            filters: FilterState::default(),
            page_size: page_size.max(1),
            current_page: 1,
            total_items: 0,
            total_pages: 0,
            rows: Vec::new(),
            state: LoadState::Idle,
            latest_seq: 0,
            selected: 0,
            expanded: false,
        }
    }

    #[must_use]
    pub const fn source(&self) -> FeedSource {
        self.source
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn rows(&self) -> &[FeedRow] {
        &self.rows
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sequence number of the most recent fetch.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Applies one filter edit, returns to page 1 and starts a fetch.
    pub fn on_filter_change(&mut self, change: FilterChange) -> FeedFetch {
        self.filters = self.filters.set_field(change);
        self.current_page = 1;
        tracing::debug!(
            source = ?self.source,
            active_tags = self.filters.active_tag_count(),
            sort = self.filters.sort.as_param(),
            date_preset = self.filters.date_preset.as_param(),
            "filters changed"
        );
        self.load()
    }

    /// Moves to page `n`, clamped into the known page range.
    ///
    /// Returns `None` when the clamped page is the page already on screen.
    pub fn on_page_change(&mut self, n: u32) -> Option<FeedFetch> {
        let page = n.clamp(1, self.total_pages.max(1));
        if page == self.current_page && self.state == LoadState::Ready {
            return None;
        }
        self.current_page = page;
        Some(self.load())
    }

    pub fn next_page(&mut self) -> Option<FeedFetch> {
        self.on_page_change(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<FeedFetch> {
        self.on_page_change(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Option<FeedFetch> {
        self.on_page_change(1)
    }

    pub fn last_page(&mut self) -> Option<FeedFetch> {
        self.on_page_change(self.total_pages)
    }

    /// Starts a fetch for the current filters and page.
    pub fn load(&mut self) -> FeedFetch {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        let query = query::encode(&self.filters, self.current_page, self.page_size);
        tracing::debug!(
            source = ?self.source,
            seq = self.latest_seq,
            page = self.current_page,
            "feed fetch issued"
        );
        FeedFetch {
            source: self.source,
            seq: self.latest_seq,
            query,
        }
    }

    /// Whether any fetch has been issued yet.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.state != LoadState::Idle
    }

    /// Applies the response to fetch `seq`.
    ///
    /// Rows are enriched with membership from `favorites`; a missing set
    /// marks every feed row as not favorite. On the favorites screen every
    /// row is a favorite by definition.
    pub fn complete(
        &mut self,
        seq: u64,
        result: ApiResult<FeedPage>,
        favorites: Option<&FavoriteSet>,
    ) -> Completion {
        if seq != self.latest_seq {
            tracing::debug!(
                source = ?self.source,
                seq,
                latest = self.latest_seq,
                "discarding stale feed response"
            );
            return Completion::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(failure) => {
                tracing::warn!(source = ?self.source, seq, error = %failure, "feed fetch failed");
                self.state = LoadState::Failed(self.failure_message().to_string());
                return Completion::Failed;
            }
        };

        self.rows = match self.source {
            FeedSource::Feed => page
                .papers
                .into_iter()
                .map(|record| FeedRow::enrich(record, favorites))
                .collect(),
            FeedSource::Favorites => page
                .papers
                .into_iter()
                .map(|record| FeedRow::from_record(record, true))
                .collect(),
        };
        self.total_items = page.total;
        self.total_pages = pagination::total_pages(page.total, self.page_size);
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.expanded = false;
        self.state = LoadState::Ready;

        tracing::debug!(
            source = ?self.source,
            seq,
            rows = self.rows.len(),
            total = self.total_items,
            total_pages = self.total_pages,
            "feed page applied"
        );

        if self.total_pages > 0 && self.current_page > self.total_pages {
            self.current_page = self.total_pages;
            return Completion::Refetch(self.load());
        }

        Completion::Applied
    }

    const fn failure_message(&self) -> &'static str {
        match self.source {
            FeedSource::Feed => "Failed to load your feed.",
            FeedSource::Favorites => "Failed to load favorites.",
        }
    }

    /// Reflects a confirmed favorite change on the rows already on screen.
    pub fn mark_favorite(&mut self, paper_id: &str, favorite: bool) {
        for row in self.rows.iter_mut().filter(|r| r.id == paper_id) {
            row.is_favorite = favorite;
        }
    }

    /// Pagination bar tokens for the current page.
    #[must_use]
    pub fn page_window(&self) -> Vec<PageToken> {
        pagination::window(self.current_page, self.total_pages)
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&FeedRow> {
        self.rows.get(self.selected)
    }

    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
            self.expanded = false;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.expanded = false;
        }
    }

    pub fn toggle_expanded(&mut self) {
        if !self.rows.is_empty() {
            self.expanded = !self.expanded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;
    use crate::domain::filter::{DatePreset, SortOrder, TagKind};
    use crate::domain::paper::PaperRecord;

    fn page(ids: &[&str], total: u64) -> FeedPage {
        FeedPage {
            papers: ids
                .iter()
                .map(|id| {
                    serde_json::from_value::<PaperRecord>(serde_json::json!({ "id": id, "title": id }))
                        .unwrap()
                })
                .collect(),
            total,
        }
    }

    fn ready(total: u64) -> FeedController {
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let fetch = feed.load();
        assert_eq!(feed.complete(fetch.seq, Ok(page(&["a"], total)), None), Completion::Applied);
        feed
    }

    #[test]
    fn every_filter_change_resets_to_first_page() {
        let changes = [
            FilterChange::Tags(TagKind::Subspecialty, ["Epilepsy".to_string()].into()),
            FilterChange::Tags(TagKind::ResearchType, ["RCT".to_string()].into()),
            FilterChange::Tags(TagKind::Journal, ["Brain".to_string()].into()),
            FilterChange::Sort(SortOrder::Title),
            FilterChange::DatePreset(DatePreset::All),
        ];
        for change in changes {
            let mut feed = ready(300);
            feed.on_page_change(5);
            assert_eq!(feed.current_page(), 5);

            let fetch = feed.on_filter_change(change);
            assert_eq!(feed.current_page(), 1);
            assert_eq!(fetch.query.values("page"), vec!["1"]);
            assert_eq!(feed.state(), &LoadState::Loading);
        }
    }

    #[test]
    fn page_change_clamps_to_known_range() {
        let mut feed = ready(40);
        assert_eq!(feed.total_pages(), 3);

        let fetch = feed.on_page_change(99).unwrap();
        assert_eq!(feed.current_page(), 3);
        assert_eq!(fetch.query.values("page"), vec!["3"]);

        feed.on_page_change(0);
        assert_eq!(feed.current_page(), 1);
    }

    #[test]
    fn same_page_on_ready_feed_is_a_no_op() {
        let mut feed = ready(40);
        assert!(feed.on_page_change(1).is_none());
        assert!(feed.prev_page().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let first = feed.load();
        let second = feed.on_filter_change(FilterChange::Sort(SortOrder::Title));

        assert_eq!(feed.complete(second.seq, Ok(page(&["new"], 1)), None), Completion::Applied);
        assert_eq!(feed.complete(first.seq, Ok(page(&["old"], 1)), None), Completion::Stale);

        assert_eq!(feed.rows()[0].id, "new");
        assert_eq!(feed.filters().sort, SortOrder::Title);
        assert_eq!(feed.state(), &LoadState::Ready);
    }

    #[test]
    fn stale_failure_does_not_flip_state() {
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let first = feed.load();
        let second = feed.load();
        feed.complete(second.seq, Ok(page(&["a"], 1)), None);
        let outcome = feed.complete(first.seq, Err(ApiFailure::Status { status: 500 }), None);
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(feed.state(), &LoadState::Ready);
    }

    #[test]
    fn failure_keeps_rows_and_reports_generic_message() {
        let mut feed = ready(1);
        let fetch = feed.load();
        let outcome = feed.complete(fetch.seq, Err(ApiFailure::Status { status: 503 }), None);

        assert_eq!(outcome, Completion::Failed);
        assert_eq!(feed.rows().len(), 1);
        assert_eq!(feed.state(), &LoadState::Failed("Failed to load your feed.".to_string()));
    }

    #[test]
    fn enrichment_uses_the_favorite_set() {
        let favorites = FavoriteSet::from_ids(["b"]);
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let fetch = feed.load();
        feed.complete(fetch.seq, Ok(page(&["a", "b"], 2)), Some(&favorites));

        let flags: Vec<_> = feed.rows().iter().map(|r| (r.id.as_str(), r.is_favorite)).collect();
        assert_eq!(flags, vec![("a", false), ("b", true)]);
    }

    #[test]
    fn favorites_screen_marks_every_row() {
        let mut feed = FeedController::new(FeedSource::Favorites, 15);
        let fetch = feed.load();
        feed.complete(fetch.seq, Ok(page(&["a", "b"], 2)), None);
        assert!(feed.rows().iter().all(|r| r.is_favorite));
    }

    #[test]
    fn shrinking_results_clamp_and_refetch() {
        let mut feed = ready(100);
        feed.on_page_change(7);
        let fetch = feed.load();

        let outcome = feed.complete(fetch.seq, Ok(page(&[], 20)), None);
        let Completion::Refetch(next) = outcome else {
            panic!("expected refetch, got {outcome:?}");
        };
        assert_eq!(feed.current_page(), 2);
        assert_eq!(next.seq, feed.latest_seq());
        assert_eq!(next.query.values("page"), vec!["2"]);
    }

    #[test]
    fn empty_results_keep_page_one() {
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let fetch = feed.load();
        assert_eq!(feed.complete(fetch.seq, Ok(page(&[], 0)), None), Completion::Applied);
        assert_eq!(feed.current_page(), 1);
        assert!(feed.page_window().is_empty());
    }

    #[test]
    fn mark_favorite_updates_rows_in_place() {
        let mut feed = ready(1);
        feed.mark_favorite("a", true);
        assert!(feed.rows()[0].is_favorite);
        feed.mark_favorite("a", false);
        assert!(!feed.rows()[0].is_favorite);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut feed = FeedController::new(FeedSource::Feed, 15);
        let fetch = feed.load();
        feed.complete(fetch.seq, Ok(page(&["a", "b"], 2)), None);

        feed.select_prev();
        assert_eq!(feed.selected_index(), 0);
        feed.select_next();
        feed.select_next();
        assert_eq!(feed.selected_row().map(|r| r.id.as_str()), Some("b"));

        feed.toggle_expanded();
        assert!(feed.is_expanded());
        feed.select_prev();
        assert!(!feed.is_expanded());
    }
}
