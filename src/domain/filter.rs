//! Filter, sort and date-range selection for the paper feed.
//!
//! [`FilterState`] is a value object: every change goes through
//! [`FilterState::set_field`], which returns a new state and leaves its input
//! untouched. Pagination is deliberately absent here; resetting the page on a
//! filter change is the feed controller's job.

use super::error::{PaperfeedError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sort order requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Date,
    /// Oldest first.
    DateAsc,
    /// Title A-Z.
    Title,
    /// Title Z-A.
    TitleDesc,
    /// Journal name.
    Journal,
}

impl SortOrder {
    /// Every sort order in cycling order.
    pub const ALL: [Self; 5] = [
        Self::Date,
        Self::DateAsc,
        Self::Title,
        Self::TitleDesc,
        Self::Journal,
    ];

    /// Wire value for the `sort` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateAsc => "date_asc",
            Self::Title => "title",
            Self::TitleDesc => "title_desc",
            Self::Journal => "journal",
        }
    }

    /// Human-readable label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Newest First",
            Self::DateAsc => "Oldest First",
            Self::Title => "Alphabetical (A-Z)",
            Self::TitleDesc => "Alphabetical (Z-A)",
            Self::Journal => "Journal Name",
        }
    }

    /// The next sort order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Publication date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "today")]
    Today,
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    TwelveMonths,
    #[serde(rename = "all")]
    All,
    /// Explicit `date_from`/`date_to` range.
    #[serde(rename = "custom")]
    Custom,
}

impl DatePreset {
    /// Presets reachable by cycling; `Custom` is entered through date input.
    const CYCLE: [Self; 7] = [
        Self::Today,
        Self::SevenDays,
        Self::ThirtyDays,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::TwelveMonths,
        Self::All,
    ];

    /// Wire value for the `date_preset` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::TwelveMonths => "12m",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::SevenDays => "Last 7 days",
            Self::ThirtyDays => "Last 30 days",
            Self::ThreeMonths => "Last 3 months",
            Self::SixMonths => "Last 6 months",
            Self::TwelveMonths => "Last 12 months",
            Self::All => "All time",
            Self::Custom => "Custom range",
        }
    }

    /// The next non-custom preset. `Custom` cycles back to `Today`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::CYCLE
            .iter()
            .position(|p| *p == self)
            .map_or(Self::Today, |idx| Self::CYCLE[(idx + 1) % Self::CYCLE.len()])
    }
}

/// The three multi-valued tag filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Subspecialty,
    ResearchType,
    Journal,
}

impl TagKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subspecialty => "Subspecialties",
            Self::ResearchType => "Research Types",
            Self::Journal => "Journals",
        }
    }
}

/// A single-field edit applied through [`FilterState::set_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Replace the whole tag set of one kind.
    Tags(TagKind, BTreeSet<String>),
    Sort(SortOrder),
    DatePreset(DatePreset),
    DateFrom(Option<NaiveDate>),
    DateTo(Option<NaiveDate>),
}

/// The user's composite filter, sort and date selection.
///
/// Tag sets are `BTreeSet`s so that iteration order (and therefore the encoded
/// query) does not depend on the order in which tags were picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub subspecialties: BTreeSet<String>,
    pub research_types: BTreeSet<String>,
    pub journals: BTreeSet<String>,
    pub sort: SortOrder,
    pub date_preset: DatePreset,
    /// Only ever `Some` while `date_preset` is [`DatePreset::Custom`].
    pub date_from: Option<NaiveDate>,
    /// Only ever `Some` while `date_preset` is [`DatePreset::Custom`].
    pub date_to: Option<NaiveDate>,
}

impl FilterState {
    /// Returns the tag set for `kind`.
    #[must_use]
    pub const fn tags(&self, kind: TagKind) -> &BTreeSet<String> {
        match kind {
            TagKind::Subspecialty => &self.subspecialties,
            TagKind::ResearchType => &self.research_types,
            TagKind::Journal => &self.journals,
        }
    }

    fn tags_mut(&mut self, kind: TagKind) -> &mut BTreeSet<String> {
        match kind {
            TagKind::Subspecialty => &mut self.subspecialties,
            TagKind::ResearchType => &mut self.research_types,
            TagKind::Journal => &mut self.journals,
        }
    }

    /// Applies one field change and returns the resulting state.
    ///
    /// Switching the preset away from `Custom` clears both dates. Setting a
    /// date while another preset is active switches the preset to `Custom`,
    /// so a date is never present outside a custom range.
    ///
    /// # Example
    ///
    /// ```
    /// use paperfeed::domain::filter::{DatePreset, FilterChange, FilterState};
    /// use chrono::NaiveDate;
    ///
    /// let custom = FilterState::default()
    ///     .set_field(FilterChange::DateFrom(NaiveDate::from_ymd_opt(2024, 1, 1)));
    /// assert_eq!(custom.date_preset, DatePreset::Custom);
    ///
    /// let cleared = custom.set_field(FilterChange::DatePreset(DatePreset::ThirtyDays));
    /// assert!(cleared.date_from.is_none());
    /// assert!(custom.date_from.is_some());
    /// ```
    #[must_use]
    pub fn set_field(&self, change: FilterChange) -> Self {
        let mut next = self.clone();
        match change {
            FilterChange::Tags(kind, values) => *next.tags_mut(kind) = values,
            FilterChange::Sort(sort) => next.sort = sort,
            FilterChange::DatePreset(preset) => {
                next.date_preset = preset;
                if preset != DatePreset::Custom {
                    next.date_from = None;
                    next.date_to = None;
                }
            }
            FilterChange::DateFrom(date) => {
                if date.is_some() {
                    next.date_preset = DatePreset::Custom;
                }
                next.date_from = date;
            }
            FilterChange::DateTo(date) => {
                if date.is_some() {
                    next.date_preset = DatePreset::Custom;
                }
                next.date_to = date;
            }
        }
        next
    }

    /// Builds the change that adds `tag` to, or removes it from, the `kind` set.
    #[must_use]
    pub fn toggled(&self, kind: TagKind, tag: &str) -> FilterChange {
        let mut values = self.tags(kind).clone();
        if !values.remove(tag) {
            values.insert(tag.to_string());
        }
        FilterChange::Tags(kind, values)
    }

    /// Whether every catalog entry is selected. An empty catalog never is.
    #[must_use]
    pub fn is_all_selected<S: AsRef<str>>(&self, kind: TagKind, catalog: &[S]) -> bool {
        let selected = self.tags(kind);
        !catalog.is_empty() && catalog.iter().all(|c| selected.contains(c.as_ref()))
    }

    /// Builds the "select all / deselect all" change for a filter group.
    ///
    /// Selects the whole catalog unless it is already fully selected, in
    /// which case the group is cleared.
    #[must_use]
    pub fn with_all<S: AsRef<str>>(&self, kind: TagKind, catalog: &[S]) -> FilterChange {
        if self.is_all_selected(kind, catalog) {
            FilterChange::Tags(kind, BTreeSet::new())
        } else {
            FilterChange::Tags(
                kind,
                catalog.iter().map(|c| c.as_ref().to_string()).collect(),
            )
        }
    }

    /// The change behind the "clear date filter" control.
    #[must_use]
    pub const fn clear_date_filter() -> FilterChange {
        FilterChange::DatePreset(DatePreset::All)
    }

    /// Short description of the date window, including a custom range.
    #[must_use]
    pub fn date_label(&self) -> String {
        if self.date_preset != DatePreset::Custom {
            return self.date_preset.label().to_string();
        }
        let fmt = |d: Option<NaiveDate>| {
            d.map_or_else(|| "…".to_string(), |d| d.format("%Y-%m-%d").to_string())
        };
        format!("{} → {}", fmt(self.date_from), fmt(self.date_to))
    }

    /// Number of selected tags across all three groups.
    #[must_use]
    pub fn active_tag_count(&self) -> usize {
        self.subspecialties.len() + self.research_types.len() + self.journals.len()
    }
}

/// Parses a typed custom-range date.
///
/// Blank input clears the date.
///
/// # Errors
///
/// Returns [`PaperfeedError::Validation`] unless the input is `YYYY-MM-DD`.
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| PaperfeedError::Validation(format!("expected YYYY-MM-DD, got {trimmed:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_match_the_feed_screen() {
        let state = FilterState::default();
        assert_eq!(state.sort, SortOrder::Date);
        assert_eq!(state.date_preset, DatePreset::SevenDays);
        assert!(state.date_from.is_none());
        assert_eq!(state.active_tag_count(), 0);
    }

    #[test]
    fn set_field_does_not_mutate_input() {
        let original = FilterState::default();
        let next = original.set_field(FilterChange::Sort(SortOrder::Title));
        assert_eq!(original.sort, SortOrder::Date);
        assert_eq!(next.sort, SortOrder::Title);
    }

    #[test]
    fn leaving_custom_clears_dates_for_every_preset() {
        let custom = FilterState::default()
            .set_field(FilterChange::DatePreset(DatePreset::Custom))
            .set_field(FilterChange::DateFrom(Some(date(2024, 1, 1))))
            .set_field(FilterChange::DateTo(Some(date(2024, 2, 1))));

        for preset in DatePreset::CYCLE {
            let next = custom.set_field(FilterChange::DatePreset(preset));
            assert_eq!(next.date_preset, preset);
            assert!(next.date_from.is_none(), "{preset:?} kept date_from");
            assert!(next.date_to.is_none(), "{preset:?} kept date_to");
        }
    }

    #[test]
    fn reselecting_custom_keeps_dates() {
        let custom = FilterState::default()
            .set_field(FilterChange::DateFrom(Some(date(2024, 1, 1))));
        let again = custom.set_field(FilterChange::DatePreset(DatePreset::Custom));
        assert_eq!(again.date_from, Some(date(2024, 1, 1)));
    }

    #[test]
    fn setting_a_date_switches_to_custom() {
        let next = FilterState::default().set_field(FilterChange::DateTo(Some(date(2024, 3, 9))));
        assert_eq!(next.date_preset, DatePreset::Custom);
        assert_eq!(next.date_to, Some(date(2024, 3, 9)));
    }

    #[test]
    fn clearing_a_date_keeps_the_preset() {
        let custom = FilterState::default().set_field(FilterChange::DateFrom(Some(date(2024, 1, 1))));
        let next = custom.set_field(FilterChange::DateFrom(None));
        assert_eq!(next.date_preset, DatePreset::Custom);
        assert!(next.date_from.is_none());
    }

    #[test]
    fn toggled_adds_then_removes() {
        let state = FilterState::default();
        let added = state.set_field(state.toggled(TagKind::Journal, "Neurology"));
        assert!(added.journals.contains("Neurology"));

        let removed = added.set_field(added.toggled(TagKind::Journal, "Neurology"));
        assert!(removed.journals.is_empty());
    }

    #[test]
    fn with_all_selects_then_clears() {
        let catalog = ["Epilepsy", "Stroke"];
        let state = FilterState::default();

        let all = state.set_field(state.with_all(TagKind::Subspecialty, &catalog));
        assert_eq!(all.subspecialties.len(), 2);
        assert!(all.is_all_selected(TagKind::Subspecialty, &catalog));

        let none = all.set_field(all.with_all(TagKind::Subspecialty, &catalog));
        assert!(none.subspecialties.is_empty());
    }

    #[test]
    fn empty_catalog_is_never_all_selected() {
        let empty: [&str; 0] = [];
        assert!(!FilterState::default().is_all_selected(TagKind::Journal, &empty));
    }

    #[test]
    fn clear_date_filter_means_all_time() {
        let custom = FilterState::default().set_field(FilterChange::DateFrom(Some(date(2024, 1, 1))));
        let cleared = custom.set_field(FilterState::clear_date_filter());
        assert_eq!(cleared.date_preset, DatePreset::All);
        assert!(cleared.date_from.is_none());
    }

    #[test]
    fn sort_and_preset_cycle() {
        assert_eq!(SortOrder::Journal.next(), SortOrder::Date);
        assert_eq!(SortOrder::Date.next(), SortOrder::DateAsc);
        assert_eq!(DatePreset::All.next(), DatePreset::Today);
        assert_eq!(DatePreset::Custom.next(), DatePreset::Today);
        assert_eq!(DatePreset::SevenDays.next(), DatePreset::ThirtyDays);
    }

    #[test]
    fn wire_names_match_serde() {
        for preset in DatePreset::CYCLE {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.as_param()));
        }
        for sort in SortOrder::ALL {
            let json = serde_json::to_string(&sort).unwrap();
            assert_eq!(json, format!("\"{}\"", sort.as_param()));
        }
    }

    #[test]
    fn date_input_parses_or_rejects() {
        assert_eq!(parse_date_input(" 2024-02-29 ").unwrap(), Some(date(2024, 2, 29)));
        assert_eq!(parse_date_input("").unwrap(), None);
        assert!(matches!(
            parse_date_input("2023-02-29"),
            Err(PaperfeedError::Validation(_))
        ));
        assert!(parse_date_input("29/02/2024").is_err());
    }

    #[test]
    fn date_label_describes_custom_range() {
        let state = FilterState::default().set_field(FilterChange::DateFrom(Some(date(2024, 1, 5))));
        assert_eq!(state.date_label(), "2024-01-05 → …");
        assert_eq!(FilterState::default().date_label(), "Last 7 days");
    }
}
