//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings and flags only; all
//! truncation, windowing and highlight computation has already happened.

use crate::pagination::PageToken;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    /// Loading, error or confirmation message for the status line.
    pub status: Option<StatusLine>,
    pub footer: FooterInfo,
}

/// Screen-specific content between header and footer.
#[derive(Debug, Clone)]
pub enum Body {
    Feed(FeedView),
    Settings(SettingsView),
}

/// Title bar plus the one-line summary under it.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Screen tabs with the active one bracketed.
    pub title: String,
    /// Result count and active filters, or the settings summary.
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// The feed and favorites screens.
#[derive(Debug, Clone)]
pub struct FeedView {
    /// Rows in the visible window.
    pub rows: Vec<PaperItem>,
    /// Pagination tokens; empty when there is nothing to page through.
    pub pagination: Vec<PageToken>,
    pub current_page: u32,
    pub detail: Option<DetailInfo>,
    pub empty_state: Option<EmptyState>,
    /// Open filter picker, drawn over the table.
    pub picker: Option<PickerInfo>,
    /// Custom-date text entry box.
    pub input_box: Option<InputBoxInfo>,
}

/// One row of the paper table.
#[derive(Debug, Clone)]
pub struct PaperItem {
    pub title: String,
    pub journal: String,
    pub date: String,
    pub is_favorite: bool,
    pub is_selected: bool,
}

/// Expanded view of the selected paper.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    pub byline: String,
    pub tags: String,
    /// Pre-wrapped body lines (abstract, summary sections, key points, link).
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Filter picker overlay.
#[derive(Debug, Clone)]
pub struct PickerInfo {
    pub input: InputBoxInfo,
    pub options: Vec<PickerOption>,
    pub all_selected: bool,
}

#[derive(Debug, Clone)]
pub struct PickerOption {
    pub label: String,
    pub is_checked: bool,
    pub is_cursor: bool,
    /// Character ranges matched by the picker query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A bordered single-line text box.
#[derive(Debug, Clone)]
pub struct InputBoxInfo {
    pub label: String,
    pub text: String,
}

/// The preferences screen.
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub lines: Vec<SettingsLine>,
    pub is_dirty: bool,
    pub can_save: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsLine {
    Section(String),
    Item {
        label: String,
        /// `[x]`/`[ ]` for toggles, free text for the frequency.
        value: String,
        is_cursor: bool,
    },
}
