//! Paper wire records and the enriched rows shown in the feed.
//!
//! [`PaperRecord`] mirrors what the backend returns inside a feed page.
//! [`FeedRow`] is the display shape: tags are flattened, the abstract falls
//! back to the summary objective, and `is_favorite` is filled in during
//! enrichment. Rows are rebuilt from records on every fetch.

use super::favorites::FavoriteSet;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts identifiers sent either as JSON strings or numbers.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accepts key points sent either as a list or as one block of text.
fn deserialize_key_points<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPoints {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<RawPoints>::deserialize(deserializer)? {
        Some(RawPoints::Many(points)) => points,
        Some(RawPoints::One(text)) => text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    })
}

/// Structured summary attached to a paper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaperSummary {
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub methods: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default, deserialize_with = "deserialize_key_points")]
    pub key_points: Vec<String>,
}

/// One paper as returned by the feed and favorites listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub full_text_link: Option<String>,
    #[serde(default)]
    pub subspecialties: Option<Vec<String>>,
    #[serde(default)]
    pub research_type: Option<String>,
    #[serde(default)]
    pub summary: Option<PaperSummary>,
}

/// A page of papers plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub papers: Vec<PaperRecord>,
    #[serde(default)]
    pub total: u64,
}

/// The option catalogs used to render the filter pickers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub subspecialties: Vec<String>,
    #[serde(default)]
    pub research_types: Vec<String>,
    #[serde(default)]
    pub journals: Vec<String>,
}

impl FilterOptions {
    /// Options for one tag kind.
    #[must_use]
    pub fn for_kind(&self, kind: super::filter::TagKind) -> &[String] {
        use super::filter::TagKind;
        match kind {
            TagKind::Subspecialty => &self.subspecialties,
            TagKind::ResearchType => &self.research_types,
            TagKind::Journal => &self.journals,
        }
    }
}

/// A paper ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: Option<String>,
    pub publication_date: Option<NaiveDate>,
    /// Summary objective when present, otherwise the raw abstract.
    pub abstract_text: Option<String>,
    pub summary: Option<PaperSummary>,
    /// Subspecialties followed by the research type, blanks removed.
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub is_favorite: bool,
}

impl FeedRow {
    /// Builds a display row, taking favorite membership from `favorites`.
    ///
    /// A missing favorite set marks every row as not favorite.
    #[must_use]
    pub fn enrich(record: PaperRecord, favorites: Option<&FavoriteSet>) -> Self {
        let is_favorite = favorites.is_some_and(|set| set.contains(&record.id));
        Self::from_record(record, is_favorite)
    }

    /// Builds a display row with an explicit favorite flag.
    #[must_use]
    pub fn from_record(record: PaperRecord, is_favorite: bool) -> Self {
        let abstract_text = record
            .summary
            .as_ref()
            .and_then(|s| s.objective.clone())
            .filter(|s| !s.is_empty())
            .or(record.abstract_text);

        let tags = record
            .subspecialties
            .unwrap_or_default()
            .into_iter()
            .chain(record.research_type)
            .filter(|t| !t.trim().is_empty())
            .collect();

        let publication_date = record.publication_date.as_deref().and_then(parse_publication_date);

        Self {
            id: record.id,
            title: record.title,
            authors: record.authors.unwrap_or_default(),
            journal: record.journal,
            publication_date,
            abstract_text,
            summary: record.summary,
            tags,
            link: record.full_text_link,
            is_favorite,
        }
    }

    /// Authors joined for a single line, abbreviated after three names.
    #[must_use]
    pub fn authors_line(&self) -> String {
        match self.authors.len() {
            0 => String::new(),
            1..=3 => self.authors.join(", "),
            _ => format!("{} et al.", self.authors[..3].join(", ")),
        }
    }
}

/// Parses `YYYY-MM-DD`, ignoring any time component that follows.
fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PaperRecord {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("Paper {id}") }))
            .unwrap()
    }

    #[test]
    fn enrichment_reads_favorite_membership() {
        let favorites = FavoriteSet::from_ids(["b"]);
        let rows: Vec<FeedRow> = vec![record("a"), record("b")]
            .into_iter()
            .map(|r| FeedRow::enrich(r, Some(&favorites)))
            .collect();

        assert_eq!(rows[0].id, "a");
        assert!(!rows[0].is_favorite);
        assert_eq!(rows[1].id, "b");
        assert!(rows[1].is_favorite);
    }

    #[test]
    fn missing_favorite_set_means_not_favorite() {
        let row = FeedRow::enrich(record("a"), None);
        assert!(!row.is_favorite);
    }

    #[test]
    fn numeric_ids_decode_as_strings() {
        let rec: PaperRecord = serde_json::from_str(r#"{"id": 42, "title": "T"}"#).unwrap();
        assert_eq!(rec.id, "42");
    }

    #[test]
    fn tags_flatten_and_drop_blanks() {
        let rec: PaperRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "title": "T",
            "subspecialties": ["Epilepsy", "", "Stroke"],
            "research_type": "Review Article"
        }))
        .unwrap();
        let row = FeedRow::from_record(rec, false);
        assert_eq!(row.tags, vec!["Epilepsy", "Stroke", "Review Article"]);
    }

    #[test]
    fn tags_skip_missing_research_type() {
        let rec: PaperRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "subspecialties": ["Epilepsy"],
            "research_type": null
        }))
        .unwrap();
        assert_eq!(FeedRow::from_record(rec, false).tags, vec!["Epilepsy"]);
    }

    #[test]
    fn abstract_prefers_summary_objective() {
        let rec: PaperRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "abstract": "raw abstract",
            "summary": { "objective": "why it matters", "key_points": ["one", "two"] }
        }))
        .unwrap();
        let row = FeedRow::from_record(rec, false);
        assert_eq!(row.abstract_text.as_deref(), Some("why it matters"));
        assert_eq!(row.summary.unwrap().key_points, vec!["one", "two"]);
    }

    #[test]
    fn abstract_falls_back_to_raw_text() {
        let rec: PaperRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "abstract": "raw abstract",
            "summary": { "methods": "rct" }
        }))
        .unwrap();
        assert_eq!(FeedRow::from_record(rec, false).abstract_text.as_deref(), Some("raw abstract"));
    }

    #[test]
    fn key_points_accept_a_text_block() {
        let summary: PaperSummary =
            serde_json::from_str(r#"{"key_points": "first\n\n second "}"#).unwrap();
        assert_eq!(summary.key_points, vec!["first", "second"]);
    }

    #[test]
    fn publication_dates_tolerate_timestamps() {
        assert_eq!(
            parse_publication_date("2024-05-06T00:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
        assert_eq!(parse_publication_date("May 2024"), None);
    }

    #[test]
    fn authors_line_abbreviates() {
        let mut row = FeedRow::from_record(record("a"), false);
        row.authors = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        assert_eq!(row.authors_line(), "A, B, C et al.");
        row.authors.truncate(2);
        assert_eq!(row.authors_line(), "A, B");
    }
}
