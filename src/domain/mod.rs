//! Domain layer for the paperfeed plugin.
//!
//! Plain data types and the rules that govern them, with no dependency on
//! Zellij or on the HTTP layer.
//!
//! # Organization
//!
//! - [`filter`]: filter/sort/date selection and its single-field updates
//! - [`paper`]: wire records, feed pages and enriched display rows
//! - [`favorites`]: the session's favorite identifier set
//! - [`preferences`]: the remote preference document and its dirty diff
//! - [`catalog`]: default taxonomy for the preferences screen
//! - [`error`]: error types and result alias
//!
//! # Examples
//!
//! ```
//! use paperfeed::domain::{FavoriteSet, FeedRow, PaperRecord};
//!
//! let favorites = FavoriteSet::from_ids(["b"]);
//! let record: PaperRecord = serde_json::from_str(r#"{"id": "b", "title": "B"}"#).unwrap();
//! assert!(FeedRow::enrich(record, Some(&favorites)).is_favorite);
//! ```

pub mod catalog;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod paper;
pub mod preferences;

pub use error::{PaperfeedError, Result};
pub use favorites::{FavoriteSet, DEFAULT_FAVORITES_CAP};
pub use filter::{DatePreset, FilterChange, FilterState, SortOrder, TagKind};
pub use paper::{FeedPage, FeedRow, FilterOptions, PaperRecord, PaperSummary};
pub use preferences::{
    Frequency, NotificationSetting, Notifications, PreferenceDocument, PreferenceKind,
};
