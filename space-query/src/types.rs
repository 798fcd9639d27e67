//! Core types for intents, sources, and query results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ErrorKind;

/// Coarse category of user need inferred from query tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Mars, its rovers and missions.
    Mars,
    /// The Moon and lunar programmes.
    Moon,
    /// SpaceX vehicles and launches.
    SpaceX,
    /// The International Space Station.
    Iss,
    /// Astronomy and astrophysics beyond the solar neighbourhood.
    Astronomy,
    /// No specific intent matched.
    General,
}

impl Intent {
    /// Returns the lower-case tag of this intent.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mars => "mars",
            Self::Moon => "moon",
            Self::SpaceX => "spacex",
            Self::Iss => "iss",
            Self::Astronomy => "astronomy",
            Self::General => "general",
        }
    }

    /// Returns all intent variants.
    pub fn all() -> &'static [Intent] {
        &[
            Self::Mars,
            Self::Moon,
            Self::SpaceX,
            Self::Iss,
            Self::Astronomy,
            Self::General,
        ]
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External content providers the engine knows how to query and parse.
///
/// Each variant maps to exactly one extraction function in
/// [`crate::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// NASA news and search.
    #[serde(rename = "NASA")]
    Nasa,
    /// NASA Science mission directorate.
    #[serde(rename = "NASA Science")]
    NasaScience,
    /// SpaceX home page.
    #[serde(rename = "SpaceX")]
    SpaceX,
    /// Space.com news search.
    #[serde(rename = "Space.com")]
    SpaceCom,
    /// English Wikipedia search.
    #[serde(rename = "Wikipedia")]
    Wikipedia,
    /// Universe Today news search.
    #[serde(rename = "Universe Today")]
    UniverseToday,
    /// USGS Astrogeology Science Center.
    #[serde(rename = "USGS Astrogeology")]
    Astrogeology,
    /// Space Facts topic pages. No search; one page per body or topic.
    #[serde(rename = "Space Facts")]
    SpaceFacts,
}

impl SourceId {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nasa => "NASA",
            Self::NasaScience => "NASA Science",
            Self::SpaceX => "SpaceX",
            Self::SpaceCom => "Space.com",
            Self::Wikipedia => "Wikipedia",
            Self::UniverseToday => "Universe Today",
            Self::Astrogeology => "USGS Astrogeology",
            Self::SpaceFacts => "Space Facts",
        }
    }

    /// Returns the default authority weight for this source in ranking.
    /// Official agency and operator sites score above encyclopedias and news.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Nasa => 1.0,
            Self::NasaScience => 1.0,
            Self::SpaceX => 1.0,
            Self::Astrogeology => 0.95,
            Self::Wikipedia => 0.85,
            Self::SpaceCom => 0.8,
            Self::UniverseToday => 0.75,
            Self::SpaceFacts => 0.7,
        }
    }

    /// Returns all source variants in catalog order.
    pub fn all() -> &'static [SourceId] {
        &[
            Self::Nasa,
            Self::NasaScience,
            Self::SpaceX,
            Self::SpaceCom,
            Self::Wikipedia,
            Self::UniverseToday,
            Self::Astrogeology,
            Self::SpaceFacts,
        ]
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One item extracted from a source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Headline or page title.
    pub title: String,
    /// Cleaned text snippet, possibly empty.
    pub snippet: String,
    /// Absolute URL of the item.
    pub url: String,
    /// Which source produced this item.
    pub source: SourceId,
    /// When the page containing this item was retrieved.
    pub retrieved_at: DateTime<Utc>,
    /// Publication time, when the markup carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// A [`RawResult`] with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub result: RawResult,
    /// Normalised relevance in `[0, 1]`.
    pub relevance_score: f64,
}

/// A source that failed to contribute to a query, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: SourceId,
    pub kind: ErrorKind,
    pub message: String,
}

/// Final, immutable answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The query exactly as the caller supplied it.
    pub query: String,
    /// Normalised tokens derived from the query.
    pub tokens: Vec<String>,
    /// Detected intents, in declaration order.
    pub intents: Vec<Intent>,
    /// Ranked results, best first.
    pub results: Vec<ScoredResult>,
    /// Unique results found before truncation to the configured maximum.
    pub total_found: usize,
    /// Sources that were selected and fetched, in priority order.
    pub sources_queried: Vec<SourceId>,
    /// Sources that contributed at least one result, in priority order.
    pub sources_used: Vec<SourceId>,
    /// Number of extracted results per contributing source.
    pub result_counts: BTreeMap<SourceId, usize>,
    /// Sources that failed, with the failure category.
    pub failures: Vec<SourceFailure>,
    /// Wall time spent answering this call, in milliseconds.
    pub duration_ms: u64,
    /// Whether this result was served from the cache.
    pub from_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_display() {
        assert_eq!(Intent::Mars.to_string(), "mars");
        assert_eq!(Intent::SpaceX.to_string(), "spacex");
        assert_eq!(Intent::General.to_string(), "general");
    }

    #[test]
    fn intent_serializes_lowercase() {
        let json = serde_json::to_string(&Intent::SpaceX).expect("serialize");
        assert_eq!(json, "\"spacex\"");
        let decoded: Intent = serde_json::from_str("\"iss\"").expect("deserialize");
        assert_eq!(decoded, Intent::Iss);
    }

    #[test]
    fn intent_all_has_every_variant() {
        assert_eq!(Intent::all().len(), 6);
        assert!(Intent::all().contains(&Intent::General));
    }

    #[test]
    fn source_display_and_serde_use_site_names() {
        assert_eq!(SourceId::SpaceCom.to_string(), "Space.com");
        let json = serde_json::to_string(&SourceId::SpaceCom).expect("serialize");
        assert_eq!(json, "\"Space.com\"");
        let decoded: SourceId = serde_json::from_str("\"USGS Astrogeology\"").expect("deserialize");
        assert_eq!(decoded, SourceId::Astrogeology);
        let json = serde_json::to_string(&SourceId::SpaceFacts).expect("serialize");
        assert_eq!(json, "\"Space Facts\"");
    }

    #[test]
    fn official_sources_outweigh_news() {
        assert!(SourceId::Nasa.weight() > SourceId::SpaceCom.weight());
        assert!(SourceId::SpaceX.weight() > SourceId::SpaceCom.weight());
        assert!(SourceId::Wikipedia.weight() > SourceId::UniverseToday.weight());
    }

    #[test]
    fn source_weights_within_unit_interval() {
        for source in SourceId::all() {
            let w = source.weight();
            assert!((0.0..=1.0).contains(&w), "{source} weight {w}");
        }
    }

    #[test]
    fn scored_result_flattens_raw_fields() {
        let scored = ScoredResult {
            result: RawResult {
                title: "Perseverance finds organics".into(),
                snippet: "Jezero crater".into(),
                url: "https://www.nasa.gov/perseverance".into(),
                source: SourceId::Nasa,
                retrieved_at: Utc::now(),
                published_at: None,
            },
            relevance_score: 0.75,
        };
        let value = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(value["title"], "Perseverance finds organics");
        assert_eq!(value["source"], "NASA");
        assert!(value.get("published_at").is_none());
        assert!((value["relevance_score"].as_f64().unwrap_or_default() - 0.75).abs() < f64::EPSILON);
    }
}
