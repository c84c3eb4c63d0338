//! Application state and view model computation.
//!
//! [`AppState`] owns everything the plugin knows during a session: the two
//! feed controllers, the preference controller, the favorite set, the
//! filter-option catalogs and the transient input state of the pickers. The
//! favorite set lives here rather than inside a controller so that feed
//! enrichment can only ever borrow it.

use super::feed::{FeedController, FeedFetch, LoadState};
use super::modes::{InputMode, Screen};
use super::preferences::{PreferenceSyncController, SyncStatus};
use crate::api::{ApiClient, ApiRequest, FeedSource};
use crate::domain::catalog::{self, CatalogEntry};
use crate::domain::favorites::FavoriteSet;
use crate::domain::filter::TagKind;
use crate::domain::paper::{FeedRow, FilterOptions};
use crate::domain::preferences::PreferenceKind;
use crate::ui::helpers::{truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailInfo, EmptyState, FeedView, FooterInfo, HeaderInfo, InputBoxInfo, PaperItem,
    PickerInfo, PickerOption, SettingsLine, SettingsView, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Rows taken by header, subtitle, borders, column headers, pagination,
/// status line and footer.
const FEED_CHROME_ROWS: usize = 10;
/// Rows taken by a bordered input box.
const INPUT_BOX_ROWS: usize = 3;
const JOURNAL_COLUMN_WIDTH: usize = 22;
const DATE_COLUMN_WIDTH: usize = 10;

/// A transient message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// One selectable row of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Key(PreferenceKind, CatalogEntry),
    Email,
    Push,
    Whatsapp,
    Frequency,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub input_mode: InputMode,

    /// The personalised feed.
    pub feed: FeedController,
    /// The favorites listing.
    pub favorites_view: FeedController,
    pub preferences: PreferenceSyncController,

    /// `None` until the bulk favorites listing has arrived.
    pub favorites: Option<FavoriteSet>,
    /// Papers with an add/remove request in flight.
    pub pending_favorites: HashSet<String>,
    pub filter_options: FilterOptions,

    pub client: ApiClient,
    pub favorites_cap: u32,

    pub picker_query: String,
    pub picker_cursor: usize,
    pub date_buffer: String,
    pub settings_cursor: usize,

    pub notice: Option<Notice>,
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(client: ApiClient, page_size: u32, favorites_cap: u32, theme: Theme) -> Self {
        Self {
            screen: Screen::Feed,
            input_mode: InputMode::Normal,
            feed: FeedController::new(FeedSource::Feed, page_size),
            favorites_view: FeedController::new(FeedSource::Favorites, page_size),
            preferences: PreferenceSyncController::new(),
            favorites: None,
            pending_favorites: HashSet::new(),
            filter_options: FilterOptions::default(),
            client,
            favorites_cap,
            picker_query: String::new(),
            picker_cursor: 0,
            date_buffer: String::new(),
            settings_cursor: 0,
            notice: None,
            theme,
        }
    }

    /// Which listing the current screen shows, if any.
    #[must_use]
    pub const fn active_source(&self) -> Option<FeedSource> {
        match self.screen {
            Screen::Feed => Some(FeedSource::Feed),
            Screen::Favorites => Some(FeedSource::Favorites),
            Screen::Settings => None,
        }
    }

    #[must_use]
    pub const fn controller(&self, source: FeedSource) -> &FeedController {
        match source {
            FeedSource::Feed => &self.feed,
            FeedSource::Favorites => &self.favorites_view,
        }
    }

    pub fn controller_mut(&mut self, source: FeedSource) -> &mut FeedController {
        match source {
            FeedSource::Feed => &mut self.feed,
            FeedSource::Favorites => &mut self.favorites_view,
        }
    }

    #[must_use]
    pub fn active_feed(&self) -> Option<&FeedController> {
        self.active_source().map(|source| self.controller(source))
    }

    pub fn active_feed_mut(&mut self) -> Option<&mut FeedController> {
        let source = self.active_source()?;
        Some(self.controller_mut(source))
    }

    /// Turns a controller fetch into an HTTP request.
    #[must_use]
    pub fn fetch_request(&self, fetch: &FeedFetch) -> ApiRequest {
        self.client.feed_page(fetch.source, fetch.seq, &fetch.query)
    }

    /// Options of the open picker that match the typed query, with the
    /// matched character indices.
    #[must_use]
    pub fn picker_matches(&self, kind: TagKind) -> Vec<(&str, Vec<usize>)> {
        use fuzzy_matcher::FuzzyMatcher;

        let options = self.filter_options.for_kind(kind);
        if self.picker_query.is_empty() {
            return options.iter().map(|o| (o.as_str(), Vec::new())).collect();
        }

        let matcher = SkimMatcherV2::default();
        options
            .iter()
            .filter_map(|option| {
                matcher
                    .fuzzy_indices(option, &self.picker_query)
                    .map(|(_score, indices)| (option.as_str(), indices))
            })
            .collect()
    }

    /// The picker option under the cursor.
    #[must_use]
    pub fn picker_selection(&self, kind: TagKind) -> Option<String> {
        self.picker_matches(kind)
            .get(self.picker_cursor)
            .map(|(label, _)| (*label).to_string())
    }

    /// Every selectable settings row in display order.
    #[must_use]
    pub fn settings_items() -> Vec<SettingsItem> {
        [PreferenceKind::Subspecialty, PreferenceKind::ResearchType]
            .into_iter()
            .flat_map(|kind| {
                catalog::entries(kind)
                    .iter()
                    .map(move |entry| SettingsItem::Key(kind, *entry))
            })
            .chain([
                SettingsItem::Email,
                SettingsItem::Push,
                SettingsItem::Whatsapp,
                SettingsItem::Frequency,
            ])
            .collect()
    }

    #[must_use]
    pub fn selected_settings_item(&self) -> Option<SettingsItem> {
        Self::settings_items().get(self.settings_cursor).copied()
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.active_source() {
            Some(source) => Body::Feed(self.compute_feed_view(self.controller(source), rows, cols)),
            None => Body::Settings(self.compute_settings_view(rows)),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = Screen::ALL
            .iter()
            .map(|screen| {
                if *screen == self.screen {
                    format!("[{}]", screen.title())
                } else {
                    screen.title().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        let subtitle = match self.active_feed() {
            Some(feed) => {
                let filters = feed.filters();
                let noun = match feed.source() {
                    FeedSource::Feed => "papers",
                    FeedSource::Favorites => "favorites",
                };
                let mut parts = vec![
                    format!("{} {noun}", feed.total_items()),
                    filters.sort.label().to_string(),
                    filters.date_label(),
                ];
                let tags = filters.active_tag_count();
                if tags > 0 {
                    parts.push(format!("{tags} tag filter{}", if tags == 1 { "" } else { "s" }));
                }
                parts.join(" · ")
            }
            None => {
                if self.preferences.is_dirty() {
                    "Reading preferences · unsaved changes".to_string()
                } else {
                    "Reading preferences".to_string()
                }
            }
        };

        HeaderInfo {
            title: format!(" paperfeed  {tabs} "),
            subtitle,
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(notice) = &self.notice {
            return Some(StatusLine {
                text: notice.text.clone(),
                is_error: notice.is_error,
            });
        }

        let (text, is_error) = match self.active_feed() {
            Some(feed) => match feed.state() {
                LoadState::Loading => ("Loading…".to_string(), false),
                LoadState::Failed(message) => (message.clone(), true),
                LoadState::Idle | LoadState::Ready => return None,
            },
            None => match self.preferences.status() {
                SyncStatus::Loading => ("Loading preferences…".to_string(), false),
                SyncStatus::Saving => ("Saving…".to_string(), false),
                SyncStatus::Saved => ("Preferences saved".to_string(), false),
                SyncStatus::Failed(message) => (message.clone(), true),
                SyncStatus::Idle | SyncStatus::Ready => return None,
            },
        };
        Some(StatusLine { text, is_error })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.screen) {
            (InputMode::Picker(_), _) => {
                "Type to filter  ↑/↓: move  Enter: toggle  Ctrl+a: all/none  Esc: close"
            }
            (InputMode::DateEntry(_), _) => "YYYY-MM-DD  Enter: apply (blank clears)  Esc: cancel",
            (InputMode::Normal, Screen::Settings) => {
                "j/k: move  Space: toggle  a: all/none  s: save  r: reload  Tab: next  q: quit"
            }
            (InputMode::Normal, _) => {
                "j/k: move  h/l: page  Enter: details  f: favorite  o: sort  d: date  c: custom  x: clear  1/2/3: filters  r: reload  Tab: next  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_feed_view(&self, feed: &FeedController, rows: usize, cols: usize) -> FeedView {
        let mut available = rows.saturating_sub(FEED_CHROME_ROWS);

        let picker = match self.input_mode {
            InputMode::Picker(kind) => Some(self.compute_picker(feed, kind, available)),
            _ => None,
        };

        let input_box = match self.input_mode {
            InputMode::DateEntry(field) => {
                available = available.saturating_sub(INPUT_BOX_ROWS);
                Some(InputBoxInfo {
                    label: format!("{} date", field.label()),
                    text: self.date_buffer.clone(),
                })
            }
            _ => None,
        };

        let detail = if feed.is_expanded() && picker.is_none() {
            feed.selected_row().map(|row| {
                let mut info = Self::compute_detail(row, cols);
                let budget = (available / 2).saturating_sub(4);
                info.lines.truncate(budget);
                available = available.saturating_sub(info.lines.len() + 4);
                info
            })
        } else {
            None
        };

        let (start, end) = visible_range(feed.selected_index(), feed.rows().len(), available);
        let title_width = cols.saturating_sub(2 + JOURNAL_COLUMN_WIDTH + DATE_COLUMN_WIDTH + 4);
        let rows_vm = feed.rows()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| PaperItem {
                title: truncate(&row.title, title_width),
                journal: truncate(row.journal.as_deref().unwrap_or(""), JOURNAL_COLUMN_WIDTH),
                date: row
                    .publication_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                is_favorite: row.is_favorite,
                is_selected: start + offset == feed.selected_index(),
            })
            .collect();

        FeedView {
            rows: rows_vm,
            pagination: feed.page_window(),
            current_page: feed.current_page(),
            detail,
            empty_state: Self::compute_empty_state(feed),
            picker,
            input_box,
        }
    }

    fn compute_empty_state(feed: &FeedController) -> Option<EmptyState> {
        if !feed.rows().is_empty() {
            return None;
        }
        match (feed.state(), feed.source()) {
            (LoadState::Failed(message), _) => Some(EmptyState {
                message: message.clone(),
                subtitle: "Press r to retry".to_string(),
            }),
            (LoadState::Ready, FeedSource::Feed) => Some(EmptyState {
                message: "No papers match your filters".to_string(),
                subtitle: "Press x to widen the date range or 1/2/3 to adjust tags".to_string(),
            }),
            (LoadState::Ready, FeedSource::Favorites) => Some(EmptyState {
                message: "No favorites yet".to_string(),
                subtitle: "Press f on a paper in the feed to save it here".to_string(),
            }),
            (LoadState::Idle | LoadState::Loading, _) => None,
        }
    }

    fn compute_detail(row: &FeedRow, cols: usize) -> DetailInfo {
        let width = cols.saturating_sub(4).max(20);

        let mut byline = vec![row.authors_line()];
        byline.extend(row.journal.clone());
        byline.extend(row.publication_date.map(|d| d.format("%Y-%m-%d").to_string()));
        byline.retain(|part| !part.is_empty());

        let mut lines = Vec::new();
        if let Some(text) = &row.abstract_text {
            lines.extend(wrap(text, width));
        }
        if let Some(summary) = &row.summary {
            for (label, section) in [
                ("Methods", &summary.methods),
                ("Results", &summary.results),
                ("Conclusion", &summary.conclusion),
            ] {
                if let Some(text) = section.as_deref().filter(|t| !t.is_empty()) {
                    lines.extend(wrap(&format!("{label}: {text}"), width));
                }
            }
            for point in &summary.key_points {
                lines.extend(wrap(&format!("• {point}"), width));
            }
        }
        if let Some(link) = &row.link {
            lines.push(truncate(&format!("Link: {link}"), width));
        }

        DetailInfo {
            title: truncate(&row.title, width),
            byline: truncate(&byline.join(" · "), width),
            tags: truncate(&row.tags.join(", "), width),
            lines,
        }
    }

    fn compute_picker(&self, feed: &FeedController, kind: TagKind, available: usize) -> PickerInfo {
        let selected = feed.filters().tags(kind);
        let matches = self.picker_matches(kind);
        let list_rows = available.saturating_sub(INPUT_BOX_ROWS);
        let (start, end) = visible_range(self.picker_cursor, matches.len(), list_rows);

        let options = matches[start..end]
            .iter()
            .enumerate()
            .map(|(offset, (label, indices))| PickerOption {
                label: (*label).to_string(),
                is_checked: selected.contains(*label),
                is_cursor: start + offset == self.picker_cursor,
                highlight_ranges: coalesce_ranges(indices),
            })
            .collect();

        PickerInfo {
            input: InputBoxInfo {
                label: kind.label().to_string(),
                text: self.picker_query.clone(),
            },
            options,
            all_selected: feed
                .filters()
                .is_all_selected(kind, self.filter_options.for_kind(kind)),
        }
    }

    fn compute_settings_view(&self, rows: usize) -> SettingsView {
        let working = self.preferences.working();
        let notifications = working.notifications.clone().unwrap_or_default();
        let check = |on: bool| if on { "[x]" } else { "[ ]" }.to_string();

        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut last_section: Option<&str> = None;

        for (idx, item) in Self::settings_items().into_iter().enumerate() {
            let section = match item {
                SettingsItem::Key(kind, _) => kind.label(),
                _ => "Notifications",
            };
            if last_section != Some(section) {
                let title = match item {
                    SettingsItem::Key(kind, _) => {
                        let keys = catalog::keys(kind);
                        if self.preferences.is_all_selected(kind, &keys) {
                            format!("{section} (all)")
                        } else {
                            section.to_string()
                        }
                    }
                    _ => section.to_string(),
                };
                lines.push(SettingsLine::Section(title));
                last_section = Some(section);
            }

            let (label, value) = match item {
                SettingsItem::Key(kind, entry) => (
                    entry.label.to_string(),
                    check(working.keys(kind).contains(entry.key)),
                ),
                SettingsItem::Email => ("Email".to_string(), check(notifications.email_enabled)),
                SettingsItem::Push => ("Push".to_string(), check(notifications.push_enabled)),
                SettingsItem::Whatsapp => {
                    ("WhatsApp".to_string(), check(notifications.whatsapp_enabled))
                }
                SettingsItem::Frequency => (
                    "Frequency".to_string(),
                    format!("< {} >", notifications.frequency.label()),
                ),
            };

            let is_cursor = idx == self.settings_cursor;
            if is_cursor {
                cursor_line = lines.len();
            }
            lines.push(SettingsLine::Item {
                label,
                value,
                is_cursor,
            });
        }

        let available = rows.saturating_sub(FEED_CHROME_ROWS);
        let (start, end) = visible_range(cursor_line, lines.len(), available);

        SettingsView {
            lines: lines[start..end].to_vec(),
            is_dirty: self.preferences.is_dirty(),
            can_save: self.preferences.can_save(),
        }
    }
}

/// The `[start, end)` window of `len` items that fits `available` rows and
/// keeps `selected` roughly centred.
fn visible_range(selected: usize, len: usize, available: usize) -> (usize, usize) {
    if len == 0 || available == 0 {
        return (0, 0);
    }
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);
    if end - start < available && len >= available {
        start = end.saturating_sub(available);
    }
    (start, end)
}

/// Collapses sorted character indices into `(start, end)` runs.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
