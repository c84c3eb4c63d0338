//! Incoming response decoding.
//!
//! [`decode_response`] takes what Zellij delivers in a `WebRequestResult`
//! (status, body and the echoed context map) and produces a typed
//! [`ApiEvent`]. Failures are carried inside the event rather than returned,
//! so every response reaches the controller that is waiting on it.

use super::request::{FeedSource, RequestKind, CONTEXT_KIND, CONTEXT_PAPER_ID, CONTEXT_SEQ};
use crate::domain::paper::{FeedPage, FilterOptions};
use crate::domain::preferences::PreferenceDocument;
use crate::domain::PaperfeedError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a request did not yield a usable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// Non-2xx status. Zellij also reports requests it could not send this way.
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// 2xx status, but the body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<ApiFailure> for PaperfeedError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Status { .. } => Self::Network(failure.to_string()),
            ApiFailure::Decode(msg) => Self::Decode(msg),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiFailure>;

/// A decoded backend reply, tagged with whatever the request carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    FeedPage {
        source: FeedSource,
        seq: u64,
        result: ApiResult<FeedPage>,
    },
    FavoriteIds {
        result: ApiResult<FeedPage>,
    },
    /// Reply to an add (`favorite == true`) or remove.
    FavoriteToggled {
        paper_id: String,
        favorite: bool,
        result: ApiResult<()>,
    },
    FilterOptions {
        result: ApiResult<FilterOptions>,
    },
    PreferencesLoaded {
        seq: u64,
        result: ApiResult<PreferenceDocument>,
    },
    PreferencesSaved {
        seq: u64,
        result: ApiResult<()>,
    },
}

fn check_status(status: u16) -> ApiResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiFailure::Status { status })
    }
}

fn decode_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiResult<T> {
    check_status(status)?;
    serde_json::from_slice(body).map_err(|e| ApiFailure::Decode(e.to_string()))
}

/// Accepts both `{"data": T}` and a bare `T`.
///
/// When a `data` key is present its value must decode as `T`; a bad payload
/// is a decode failure rather than a fallback to the outer object.
fn decode_enveloped<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiResult<T> {
    let mut value: Value = decode_body(status, body)?;
    let payload = match value.as_object_mut().and_then(|obj| obj.remove("data")) {
        Some(data) => data,
        None => value,
    };
    serde_json::from_value(payload).map_err(|e| ApiFailure::Decode(e.to_string()))
}

/// Decodes one response.
///
/// Returns `None` when the context does not identify a paperfeed request
/// (unknown `kind`, or a missing `seq`/`paper_id` the kind requires).
#[must_use]
pub fn decode_response(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Option<ApiEvent> {
    let kind = RequestKind::parse(context.get(CONTEXT_KIND)?)?;
    let seq = || context.get(CONTEXT_SEQ).and_then(|s| s.parse::<u64>().ok());
    let paper_id = || context.get(CONTEXT_PAPER_ID).cloned();

    let event = match kind {
        RequestKind::Feed | RequestKind::Favorites => ApiEvent::FeedPage {
            source: if kind == RequestKind::Feed {
                FeedSource::Feed
            } else {
                FeedSource::Favorites
            },
            seq: seq()?,
            result: decode_body(status, body),
        },
        RequestKind::FavoriteIds => ApiEvent::FavoriteIds {
            result: decode_body(status, body),
        },
        RequestKind::AddFavorite | RequestKind::RemoveFavorite => ApiEvent::FavoriteToggled {
            paper_id: paper_id()?,
            favorite: kind == RequestKind::AddFavorite,
            result: check_status(status),
        },
        RequestKind::FilterOptions => ApiEvent::FilterOptions {
            result: decode_body(status, body),
        },
        RequestKind::LoadPreferences => ApiEvent::PreferencesLoaded {
            seq: seq()?,
            result: decode_enveloped(status, body),
        },
        RequestKind::SavePreferences => ApiEvent::PreferencesSaved {
            seq: seq()?,
            result: check_status(status),
        },
    };

    tracing::debug!(kind = kind.as_str(), status, "decoded api response");
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn feed_page_decodes_with_seq() {
        let body = br#"{"papers": [{"id": 1, "title": "A"}], "total": 31}"#;
        let event = decode_response(200, body, &ctx(&[("kind", "feed"), ("seq", "4")])).unwrap();
        match event {
            ApiEvent::FeedPage { source, seq, result } => {
                assert_eq!(source, FeedSource::Feed);
                assert_eq!(seq, 4);
                let page = result.unwrap();
                assert_eq!(page.total, 31);
                assert_eq!(page.papers[0].id, "1");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let event = decode_response(500, b"oops", &ctx(&[("kind", "favorites"), ("seq", "1")])).unwrap();
        assert_eq!(
            event,
            ApiEvent::FeedPage {
                source: FeedSource::Favorites,
                seq: 1,
                result: Err(ApiFailure::Status { status: 500 }),
            }
        );
    }

    #[test]
    fn malformed_body_is_a_decode_failure() {
        let event = decode_response(200, b"not json", &ctx(&[("kind", "filter_options")])).unwrap();
        assert!(matches!(
            event,
            ApiEvent::FilterOptions { result: Err(ApiFailure::Decode(_)) }
        ));
    }

    #[test]
    fn preferences_accept_data_envelope() {
        let wrapped = br#"{"data": {"subspecialties": ["Epilepsy"]}}"#;
        let bare = br#"{"subspecialties": ["Epilepsy"]}"#;
        let context = ctx(&[("kind", "load_preferences"), ("seq", "2")]);

        for body in [&wrapped[..], &bare[..]] {
            match decode_response(200, body, &context).unwrap() {
                ApiEvent::PreferencesLoaded { result, .. } => {
                    assert!(result.unwrap().subspecialties.contains("Epilepsy"));
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    fn loaded_preferences(body: &[u8]) -> ApiResult<PreferenceDocument> {
        let context = ctx(&[("kind", "load_preferences"), ("seq", "1")]);
        match decode_response(200, body, &context).unwrap() {
            ApiEvent::PreferencesLoaded { result, .. } => result,
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn enveloped_preferences_keep_unknown_frequency() {
        let body = br#"{"data": {"subspecialties": ["stroke"],
            "notifications": {"email_enabled": true, "frequency": "biweekly"}}}"#;
        let doc = loaded_preferences(body).unwrap();
        assert!(doc.subspecialties.contains("stroke"));
        assert_eq!(doc.notifications.unwrap().frequency.label(), "biweekly");
    }

    #[test]
    fn bad_envelope_payload_is_a_decode_failure() {
        let body = br#"{"data": {"subspecialties": ["stroke"],
            "notifications": {"email_enabled": null}}}"#;
        assert!(matches!(loaded_preferences(body), Err(ApiFailure::Decode(_))));

        let body = br#"{"data": "nope"}"#;
        assert!(matches!(loaded_preferences(body), Err(ApiFailure::Decode(_))));
    }

    #[test]
    fn favorite_toggle_ignores_body() {
        let event = decode_response(
            201,
            b"",
            &ctx(&[("kind", "add_favorite"), ("paper_id", "p9")]),
        )
        .unwrap();
        assert_eq!(
            event,
            ApiEvent::FavoriteToggled {
                paper_id: "p9".to_string(),
                favorite: true,
                result: Ok(()),
            }
        );
    }

    #[test]
    fn foreign_or_incomplete_context_is_ignored() {
        assert!(decode_response(200, b"{}", &ctx(&[("kind", "weather")])).is_none());
        assert!(decode_response(200, b"{}", &ctx(&[("kind", "feed")])).is_none());
        assert!(decode_response(200, b"{}", &BTreeMap::new()).is_none());
    }

    #[test]
    fn failures_map_into_crate_errors() {
        let err: PaperfeedError = ApiFailure::Status { status: 502 }.into();
        assert!(matches!(err, PaperfeedError::Network(_)));
    }
}
