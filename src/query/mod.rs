//! Deterministic encoding of a [`FilterState`] into feed query parameters.
//!
//! Two equal filter states at the same page always produce byte-identical
//! query strings. Parameters are emitted in a fixed order:
//!
//! ```text
//! page, page_size, subspecialties*, research_types*, journals*,
//! sort, date_preset, date_from?, date_to?
//! ```
//!
//! Multi-valued fields become one repeated parameter per value, in the set's
//! sorted order. Dates are only emitted for a custom range, and only when
//! set.

use crate::domain::filter::{DatePreset, FilterState};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An ordered list of query parameters for the feed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedQuery {
    params: Vec<(&'static str, String)>,
}

impl FeedQuery {
    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.params.push((key, value.into()));
    }

    /// The raw, unescaped parameters in emission order.
    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Values of every parameter named `key`, in order.
    #[must_use]
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// `key=value` pairs joined with `&`, values percent-escaped.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Encodes `filters` for page `page` of size `page_size`.
///
/// # Example
///
/// ```
/// use paperfeed::domain::filter::FilterState;
/// use paperfeed::query::encode;
///
/// let q = encode(&FilterState::default(), 1, 15);
/// assert_eq!(q.to_query_string(), "page=1&page_size=15&sort=date&date_preset=7d");
/// ```
#[must_use]
pub fn encode(filters: &FilterState, page: u32, page_size: u32) -> FeedQuery {
    let mut query = FeedQuery::default();
    query.push("page", page.to_string());
    query.push("page_size", page_size.to_string());

    for tag in &filters.subspecialties {
        query.push("subspecialties", tag.as_str());
    }
    for tag in &filters.research_types {
        query.push("research_types", tag.as_str());
    }
    for tag in &filters.journals {
        query.push("journals", tag.as_str());
    }

    query.push("sort", filters.sort.as_param());
    query.push("date_preset", filters.date_preset.as_param());

    if filters.date_preset == DatePreset::Custom {
        if let Some(from) = filters.date_from {
            query.push("date_from", from.format(DATE_FORMAT).to_string());
        }
        if let Some(to) = filters.date_to {
            query.push("date_to", to.format(DATE_FORMAT).to_string());
        }
    }

    query
}
