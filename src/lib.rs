//! paperfeed: a Zellij plugin for browsing a personalised feed of
//! research-paper summaries.
//!
//! The plugin talks to a paper-summary backend over HTTP and provides:
//! - A paginated feed filtered by subspecialty, research type, journal,
//!   sort order and publication date window
//! - A favorites screen, with favorite stars on every feed row
//! - A settings screen that edits the reading-preference document and only
//!   offers to save when something actually changed

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web_request
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - FeedController (last request wins)               │
//! │  - PreferenceSyncController (snapshot vs working)   │
//! │  - Event handling, view model computation           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Query Layer   │
//! │ (ui/)         │   │ (api/)        │   │ (query/,      │
//! │ - Rendering   │   │ - Requests    │   │  pagination)  │
//! │ - Theming     │   │ - Decoding    │   │ - Encoding    │
//! │ - Components  │   │ - traceparent │   │ - Page window │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Filters, papers, favorites, preferences          │
//! │  - Sandbox paths                                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/paperfeed.wasm" {
//!         api_base_url "https://papers.example.org/api/v1"
//!         api_token "..."
//!         page_size "15"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use paperfeed::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! for action in &actions {
//!     // The plugin shim hands each request to Zellij's web_request.
//!     assert!(action.request().is_some());
//! }
//! # Ok::<(), paperfeed::PaperfeedError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod pagination;
pub mod query;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen};
pub use domain::{PaperfeedError, Result};
pub use ui::Theme;

use api::{ApiClient, DEFAULT_BASE_URL};
use app::feed::DEFAULT_PAGE_SIZE;
use domain::DEFAULT_FAVORITES_CAP;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
///
/// ```kdl
/// plugin location="file:/path/to/paperfeed.wasm" {
///     api_base_url "http://127.0.0.1:8001/api/v1"
///     api_token "secret"
///     page_size "20"
///     favorites_cap "500"
///     theme "catppuccin-latte"
///     theme_file "~/.config/paperfeed/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend root, without a trailing slash.
    pub api_base_url: String,

    /// Bearer token sent on every request, if any.
    pub api_token: Option<String>,

    /// Papers per page on both feed screens. Default: 15
    pub page_size: u32,

    /// How many favorite identifiers to pull in the one bulk request.
    /// Default: 1000
    pub favorites_cap: u32,

    /// Built-in theme: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` maps to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            favorites_cap: DEFAULT_FAVORITES_CAP,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

/// Parses a positive integer option, falling back to `default`.
fn positive(config: &BTreeMap<String, String>, key: &str, default: u32) -> u32 {
    match config.get(key).map(|s| s.trim().parse::<u32>()) {
        Some(Ok(n)) if n > 0 => n,
        Some(_) => {
            tracing::warn!(key, value = ?config.get(key), default, "invalid option, using default");
            default
        }
        None => default,
    }
}

impl Config {
    /// Parses configuration from the map Zellij passes to `load`.
    ///
    /// Unknown keys are ignored; malformed numbers fall back to defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use paperfeed::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), "https://x.test/api/".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base_url, "https://x.test/api");
    /// assert_eq!(config.page_size, 25);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            api_base_url: non_empty("api_base_url")
                .map_or_else(|| DEFAULT_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string()),
            api_token: non_empty("api_token"),
            page_size: positive(config, "page_size", DEFAULT_PAGE_SIZE),
            favorites_cap: positive(config, "favorites_cap", DEFAULT_FAVORITES_CAP),
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Resolves the configured theme, falling back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial `AppState` from configuration.
///
/// Nothing is fetched here; the first requests go out once Zellij grants
/// web access and the shim sends [`Event::Start`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.api_base_url, "initializing paperfeed plugin");

    let client = ApiClient::new(config.api_base_url.clone(), config.api_token.clone());
    AppState::new(client, config.page_size, config.favorites_cap, config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[("page_size", "0"), ("favorites_cap", "many")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.favorites_cap, DEFAULT_FAVORITES_CAP);
    }

    #[test]
    fn blank_token_is_none() {
        let config = Config::from_zellij(&map(&[("api_token", "  ")]));
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("nope".into()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn initialize_applies_page_size() {
        let config = Config {
            page_size: 30,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.feed.page_size(), 30);
        assert_eq!(state.client.base_url(), DEFAULT_BASE_URL);
    }
}
