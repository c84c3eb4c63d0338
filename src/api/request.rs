//! Outgoing request construction.
//!
//! [`ApiClient`] turns controller intents into [`ApiRequest`] values. A
//! request is plain data: the plugin shim hands it to Zellij's
//! `web_request`, and Zellij echoes the request's `context` map back with
//! the response. The context carries the request kind, the sequence number
//! and (for favorite mutations) the paper id, which is all
//! [`super::decode_response`] needs to route the reply.

use super::trace::TraceParent;
use crate::domain::favorites::DEFAULT_FAVORITES_CAP;
use crate::domain::preferences::PreferenceDocument;
use crate::domain::Result;
use crate::query::FeedQuery;
use std::collections::BTreeMap;

/// Default backend location when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001/api/v1";

pub(crate) const CONTEXT_KIND: &str = "kind";
pub(crate) const CONTEXT_SEQ: &str = "seq";
pub(crate) const CONTEXT_PAPER_ID: &str = "paper_id";

/// HTTP verbs used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Which paginated listing a feed fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedSource {
    /// The personalised feed.
    Feed,
    /// The user's favorites, with the same filter contract.
    Favorites,
}

impl FeedSource {
    const fn path(self) -> &'static str {
        match self {
            Self::Feed => "/feed",
            Self::Favorites => "/favorites/",
        }
    }
}

/// Tag stored under the `kind` context key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Feed,
    Favorites,
    FavoriteIds,
    AddFavorite,
    RemoveFavorite,
    FilterOptions,
    LoadPreferences,
    SavePreferences,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Favorites => "favorites",
            Self::FavoriteIds => "favorite_ids",
            Self::AddFavorite => "add_favorite",
            Self::RemoveFavorite => "remove_favorite",
            Self::FilterOptions => "filter_options",
            Self::LoadPreferences => "load_preferences",
            Self::SavePreferences => "save_preferences",
        }
    }

    /// Parses a context tag. Unknown tags belong to someone else.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        [
            Self::Feed,
            Self::Favorites,
            Self::FavoriteIds,
            Self::AddFavorite,
            Self::RemoveFavorite,
            Self::FilterOptions,
            Self::LoadPreferences,
            Self::SavePreferences,
        ]
        .into_iter()
        .find(|k| k.as_str() == tag)
    }
}

impl From<FeedSource> for RequestKind {
    fn from(source: FeedSource) -> Self {
        match source {
            FeedSource::Feed => Self::Feed,
            FeedSource::Favorites => Self::Favorites,
        }
    }
}

/// A fully-built HTTP request ready for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub kind: RequestKind,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Echoed back verbatim with the response.
    pub context: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Sequence number stored in the context, if any.
    #[must_use]
    pub fn seq(&self) -> Option<u64> {
        self.context.get(CONTEXT_SEQ).and_then(|s| s.parse().ok())
    }
}

/// Builds requests against one backend with one bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

impl ApiClient {
    /// Creates a client. Trailing slashes on `base_url` are dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        kind: RequestKind,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
    ) -> ApiRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(token) = &self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        if let Some(parent) = TraceParent::from_current() {
            headers.insert("traceparent".to_string(), parent.header_value());
        }

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KIND.to_string(), kind.as_str().to_string());

        ApiRequest {
            kind,
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
            context,
        }
    }

    fn with_seq(mut request: ApiRequest, seq: u64) -> ApiRequest {
        request.context.insert(CONTEXT_SEQ.to_string(), seq.to_string());
        request
    }

    fn with_paper(mut request: ApiRequest, paper_id: &str) -> ApiRequest {
        request
            .context
            .insert(CONTEXT_PAPER_ID.to_string(), paper_id.to_string());
        request
    }

    /// One page of the feed or the favorites listing.
    #[must_use]
    pub fn feed_page(&self, source: FeedSource, seq: u64, query: &FeedQuery) -> ApiRequest {
        let path = format!("{}?{}", source.path(), query.to_query_string());
        Self::with_seq(
            self.request(source.into(), HttpMethod::Get, &path, Vec::new()),
            seq,
        )
    }

    /// Bulk listing used to seed the favorite set.
    #[must_use]
    pub fn favorite_ids(&self, cap: u32) -> ApiRequest {
        let cap = if cap == 0 { DEFAULT_FAVORITES_CAP } else { cap };
        let path = format!("/favorites/?page=1&page_size={cap}");
        self.request(RequestKind::FavoriteIds, HttpMethod::Get, &path, Vec::new())
    }

    #[must_use]
    pub fn add_favorite(&self, paper_id: &str) -> ApiRequest {
        let path = format!("/favorites/{}", urlencoding::encode(paper_id));
        Self::with_paper(
            self.request(RequestKind::AddFavorite, HttpMethod::Post, &path, Vec::new()),
            paper_id,
        )
    }

    #[must_use]
    pub fn remove_favorite(&self, paper_id: &str) -> ApiRequest {
        let path = format!("/favorites/{}", urlencoding::encode(paper_id));
        Self::with_paper(
            self.request(RequestKind::RemoveFavorite, HttpMethod::Delete, &path, Vec::new()),
            paper_id,
        )
    }

    #[must_use]
    pub fn filter_options(&self) -> ApiRequest {
        self.request(RequestKind::FilterOptions, HttpMethod::Get, "/filters", Vec::new())
    }

    #[must_use]
    pub fn load_preferences(&self, seq: u64) -> ApiRequest {
        Self::with_seq(
            self.request(RequestKind::LoadPreferences, HttpMethod::Get, "/me/preferences/", Vec::new()),
            seq,
        )
    }

    /// Submits the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaperfeedError::Decode`] if the document cannot be
    /// serialized.
    pub fn save_preferences(&self, seq: u64, document: &PreferenceDocument) -> Result<ApiRequest> {
        let body = serde_json::to_vec(document)?;
        Ok(Self::with_seq(
            self.request(RequestKind::SavePreferences, HttpMethod::Put, "/me/preferences/", body),
            seq,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterState;
    use crate::query::encode;

    #[test]
    fn feed_request_targets_query_and_carries_seq() {
        let client = ApiClient::new("http://api.test/v1/", Some("tok".to_string()));
        let query = encode(&FilterState::default(), 2, 15);
        let req = client.feed_page(FeedSource::Feed, 7, &query);

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://api.test/v1/feed?page=2&page_size=15&sort=date&date_preset=7d"
        );
        assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer tok"));
        assert_eq!(req.seq(), Some(7));
        assert_eq!(req.context.get("kind").map(String::as_str), Some("feed"));
    }

    #[test]
    fn favorites_listing_uses_trailing_slash_path() {
        let client = ApiClient::default();
        let query = encode(&FilterState::default(), 1, 15);
        let req = client.feed_page(FeedSource::Favorites, 1, &query);
        assert!(req.url.starts_with("http://127.0.0.1:8001/api/v1/favorites/?page=1"));
        assert_eq!(req.kind, RequestKind::Favorites);
    }

    #[test]
    fn missing_token_sends_no_authorization() {
        let req = ApiClient::new("http://x", Some(String::new())).filter_options();
        assert!(!req.headers.contains_key("Authorization"));
        assert_eq!(req.url, "http://x/filters");
    }

    #[test]
    fn favorite_mutations_remember_the_paper() {
        let client = ApiClient::default();
        let add = client.add_favorite("p 1");
        assert_eq!(add.method, HttpMethod::Post);
        assert!(add.url.ends_with("/favorites/p%201"));
        assert_eq!(add.context.get("paper_id").map(String::as_str), Some("p 1"));

        let remove = client.remove_favorite("p1");
        assert_eq!(remove.method, HttpMethod::Delete);
    }

    #[test]
    fn favorite_ids_fetch_one_capped_page() {
        let req = ApiClient::default().favorite_ids(1000);
        assert!(req.url.ends_with("/favorites/?page=1&page_size=1000"));
        assert_eq!(req.seq(), None);
    }

    #[test]
    fn save_sends_full_document() {
        let mut doc = PreferenceDocument::default();
        doc.subspecialties.insert("Epilepsy".to_string());
        let req = ApiClient::default().save_preferences(3, &doc).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        let sent: PreferenceDocument = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(sent, doc);
    }

    #[test]
    fn kinds_round_trip_through_context_tags() {
        assert_eq!(RequestKind::parse("save_preferences"), Some(RequestKind::SavePreferences));
        assert_eq!(RequestKind::parse("other-plugin"), None);
    }
}
