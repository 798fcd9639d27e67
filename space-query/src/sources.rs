//! Source catalog and per-query source selection.
//!
//! A [`SourceCatalog`] holds the immutable [`SourceSpec`] for every known
//! source and, per [`Intent`], the sources to consult in priority order.
//! [`SourceCatalog::select_sources`] merges those lists for a query's
//! intents into one deduplicated, capped fan-out list.

use std::collections::BTreeSet;

use crate::query::Query;
use crate::types::{Intent, SourceId};

/// Placeholder in endpoint templates replaced by the encoded search terms.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Placeholder replaced by the topic page path chosen from the query, for
/// sites organised as one page per topic instead of a search.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Topic words and the page path each selects, in tie-break order. The
/// path for a query with no topic word is the empty string.
const TOPIC_PAGES: &[(&str, &str)] = &[
    ("mars", "mars/"),
    ("earth", "earth/"),
    ("moon", "moon/"),
    ("sun", "sun/"),
    ("mercury", "mercury/"),
    ("venus", "venus/"),
    ("jupiter", "jupiter/"),
    ("saturn", "saturn/"),
    ("uranus", "uranus/"),
    ("neptune", "neptune/"),
    ("pluto", "pluto/"),
    ("planet", "planets/"),
    ("solar system", "solar-system/"),
];

/// Page path for the topic sharing the most words with `tokens`.
///
/// Ties go to the earlier topic; no shared word selects the site root.
pub fn topic_page(tokens: &[String]) -> &'static str {
    let mut best = ("", 0usize);
    for (topic, path) in TOPIC_PAGES {
        let matches = tokens
            .iter()
            .filter(|token| topic.split(' ').any(|word| word == token.as_str()))
            .count();
        if matches > best.1 {
            best = (path, matches);
        }
    }
    best.0
}

/// Static description of one external source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    /// Which source this is; also selects the extraction function.
    pub id: SourceId,
    /// URL template. `{query}` is replaced by the URL-encoded search terms;
    /// templates without it are fetched as-is.
    pub endpoint: String,
    /// Site root, used to resolve relative links and as `Referer`.
    pub home_url: String,
    /// Authority weight in `[0, 1]` used by the ranker.
    pub weight: f64,
}

impl SourceSpec {
    /// Create a spec with the source's default authority weight.
    pub fn new(id: SourceId, endpoint: impl Into<String>, home_url: impl Into<String>) -> Self {
        Self {
            id,
            endpoint: endpoint.into(),
            home_url: home_url.into(),
            weight: id.weight(),
        }
    }

    /// Override the authority weight. Clamped to `[0, 1]`.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Returns `true` if the endpoint is one fixed page for every query.
    pub fn is_fixed_page(&self) -> bool {
        !self.endpoint.contains(QUERY_PLACEHOLDER) && !self.endpoint.contains(TOPIC_PLACEHOLDER)
    }

    /// Build the URL to fetch for `query`.
    pub fn search_url(&self, query: &Query) -> String {
        if self.endpoint.contains(TOPIC_PLACEHOLDER) {
            return self
                .endpoint
                .replace(TOPIC_PLACEHOLDER, topic_page(query.tokens()));
        }
        if !self.endpoint.contains(QUERY_PLACEHOLDER) {
            return self.endpoint.clone();
        }
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.search_terms(query).as_bytes()).collect();
        self.endpoint.replace(QUERY_PLACEHOLDER, &encoded)
    }

    /// Search terms sent to this source. Wikipedia gets astronomy context
    /// for queries with no specific intent, so "black hole" style searches
    /// land on the astronomy article rather than a disambiguation page.
    fn search_terms(&self, query: &Query) -> String {
        let terms = query.search_terms();
        match self.id {
            SourceId::Wikipedia if query.is_general() => format!("{terms} space astronomy"),
            _ => terms,
        }
    }
}

/// Immutable table of sources and per-intent routing.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    sources: Vec<SourceSpec>,
    routes: Vec<(Intent, Vec<SourceId>)>,
}

impl SourceCatalog {
    /// Build a catalog from explicit sources and routes.
    ///
    /// Catalog order of `sources` breaks ties during selection.
    pub fn new(sources: Vec<SourceSpec>, routes: Vec<(Intent, Vec<SourceId>)>) -> Self {
        Self { sources, routes }
    }

    /// The built-in catalog of space news and reference sites.
    pub fn space() -> Self {
        use SourceId::*;

        let sources = vec![
            SourceSpec::new(Nasa, "https://www.nasa.gov/?s={query}", "https://www.nasa.gov/"),
            SourceSpec::new(
                NasaScience,
                "https://science.nasa.gov/?s={query}",
                "https://science.nasa.gov/",
            ),
            SourceSpec::new(SpaceX, "https://www.spacex.com/", "https://www.spacex.com/"),
            SourceSpec::new(
                SpaceCom,
                "https://www.space.com/search?q={query}",
                "https://www.space.com/",
            ),
            SourceSpec::new(
                Wikipedia,
                "https://en.wikipedia.org/w/index.php?search={query}",
                "https://en.wikipedia.org/",
            ),
            SourceSpec::new(
                UniverseToday,
                "https://www.universetoday.com/?s={query}",
                "https://www.universetoday.com/",
            ),
            SourceSpec::new(
                Astrogeology,
                "https://astrogeology.usgs.gov/search/results?q={query}",
                "https://astrogeology.usgs.gov/",
            ),
            SourceSpec::new(
                SpaceFacts,
                "https://space-facts.com/{topic}",
                "https://space-facts.com/",
            ),
        ];

        let routes = vec![
            (
                Intent::Mars,
                vec![Nasa, SpaceCom, Wikipedia, Astrogeology, SpaceFacts],
            ),
            (
                Intent::Moon,
                vec![Nasa, Astrogeology, Wikipedia, SpaceCom, SpaceFacts],
            ),
            (Intent::SpaceX, vec![SpaceX, SpaceCom]),
            (Intent::Iss, vec![Nasa, SpaceCom, Wikipedia]),
            (
                Intent::Astronomy,
                vec![NasaScience, Wikipedia, UniverseToday, SpaceCom, SpaceFacts],
            ),
            (
                Intent::General,
                vec![Nasa, SpaceCom, Wikipedia, UniverseToday],
            ),
        ];

        Self::new(sources, routes)
    }

    /// Replace the endpoint template of one source.
    pub fn with_endpoint(mut self, id: SourceId, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        if let Some(spec) = self.sources.iter_mut().find(|s| s.id == id) {
            spec.endpoint = endpoint;
        }
        self
    }

    /// Look up the spec for a source.
    pub fn source(&self, id: SourceId) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Sources routed for `intent`, in priority order.
    pub fn sources_for(&self, intent: Intent) -> &[SourceId] {
        self.routes
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Merge the routes of `intents` into one ordered fan-out list.
    ///
    /// Each source appears once, at the best position it holds in any
    /// contributing intent's list; equal positions keep catalog order. At
    /// most `cap` sources are returned.
    pub fn select_sources(&self, intents: &BTreeSet<Intent>, cap: usize) -> Vec<SourceSpec> {
        // (best position, catalog index, source)
        let mut ranked: Vec<(usize, usize, SourceId)> = Vec::new();

        for intent in intents {
            for (position, id) in self.sources_for(*intent).iter().enumerate() {
                let Some(catalog_index) = self.sources.iter().position(|s| s.id == *id) else {
                    continue;
                };
                match ranked.iter_mut().find(|(_, _, seen)| seen == id) {
                    Some(entry) => entry.0 = entry.0.min(position),
                    None => ranked.push((position, catalog_index, *id)),
                }
            }
        }

        ranked.sort_by_key(|(position, catalog_index, _)| (*position, *catalog_index));

        let selected: Vec<SourceSpec> = ranked
            .into_iter()
            .filter_map(|(_, _, id)| self.source(id).cloned())
            .take(cap)
            .collect();

        tracing::debug!(
            intents = ?intents,
            sources = ?selected.iter().map(|s| s.id.name()).collect::<Vec<_>>(),
            "sources selected"
        );
        selected
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Lexicon;

    fn intents(list: &[Intent]) -> BTreeSet<Intent> {
        list.iter().copied().collect()
    }

    fn ids(specs: &[SourceSpec]) -> Vec<SourceId> {
        specs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn spacex_routes_to_spacex_then_space_com() {
        let selected = SourceCatalog::space().select_sources(&intents(&[Intent::SpaceX]), 5);
        assert_eq!(ids(&selected), vec![SourceId::SpaceX, SourceId::SpaceCom]);
    }

    #[test]
    fn mars_priority_order() {
        let selected = SourceCatalog::space().select_sources(&intents(&[Intent::Mars]), 5);
        assert_eq!(
            ids(&selected),
            vec![
                SourceId::Nasa,
                SourceId::SpaceCom,
                SourceId::Wikipedia,
                SourceId::Astrogeology,
                SourceId::SpaceFacts
            ]
        );
    }

    #[test]
    fn overlapping_intents_keep_best_position() {
        let selected =
            SourceCatalog::space().select_sources(&intents(&[Intent::Mars, Intent::Moon]), 10);
        // Astrogeology is position 1 for moon, so it moves ahead of Wikipedia.
        assert_eq!(
            ids(&selected),
            vec![
                SourceId::Nasa,
                SourceId::SpaceCom,
                SourceId::Astrogeology,
                SourceId::Wikipedia,
                SourceId::SpaceFacts
            ]
        );
    }

    #[test]
    fn selection_never_duplicates_and_respects_cap() {
        let catalog = SourceCatalog::space();
        let all: BTreeSet<Intent> = Intent::all().iter().copied().collect();
        for cap in 1..=8 {
            let selected = catalog.select_sources(&all, cap);
            assert!(selected.len() <= cap);
            let unique: BTreeSet<SourceId> = selected.iter().map(|s| s.id).collect();
            assert_eq!(unique.len(), selected.len(), "duplicates at cap {cap}");
        }
    }

    #[test]
    fn cap_truncates_lowest_priority() {
        let selected = SourceCatalog::space().select_sources(&intents(&[Intent::Mars]), 2);
        assert_eq!(ids(&selected), vec![SourceId::Nasa, SourceId::SpaceCom]);
    }

    #[test]
    fn unrouted_intent_selects_nothing() {
        let catalog = SourceCatalog::new(SourceCatalog::space().sources.clone(), vec![]);
        assert!(catalog.select_sources(&intents(&[Intent::Mars]), 5).is_empty());
    }

    #[test]
    fn routes_to_unknown_source_are_skipped() {
        let catalog = SourceCatalog::new(
            vec![SourceSpec::new(
                SourceId::Nasa,
                "https://www.nasa.gov/?s={query}",
                "https://www.nasa.gov/",
            )],
            vec![(Intent::General, vec![SourceId::Wikipedia, SourceId::Nasa])],
        );
        let selected = catalog.select_sources(&intents(&[Intent::General]), 5);
        assert_eq!(ids(&selected), vec![SourceId::Nasa]);
    }

    #[test]
    fn search_url_encodes_terms() {
        let catalog = SourceCatalog::space();
        let query = Query::parse("Mars rover & samples", &Lexicon::space()).expect("parse");
        let spec = catalog.source(SourceId::SpaceCom).expect("space.com");
        assert_eq!(
            spec.search_url(&query),
            "https://www.space.com/search?q=Mars+rover+%26+samples"
        );
    }

    #[test]
    fn search_url_without_placeholder_is_verbatim() {
        let catalog = SourceCatalog::space();
        let query = Query::parse("starship", &Lexicon::space()).expect("parse");
        let spec = catalog.source(SourceId::SpaceX).expect("spacex");
        assert_eq!(spec.search_url(&query), "https://www.spacex.com/");
        assert!(spec.is_fixed_page());
    }

    #[test]
    fn topic_page_follows_query_words() {
        let catalog = SourceCatalog::space();
        let spec = catalog.source(SourceId::SpaceFacts).expect("space facts");
        let url = |text: &str| {
            let query = Query::parse(text, &Lexicon::space()).expect("parse");
            spec.search_url(&query)
        };
        assert_eq!(url("Mars rover landing"), "https://space-facts.com/mars/");
        assert_eq!(url("lunar craters on the moon"), "https://space-facts.com/moon/");
        assert_eq!(
            url("solar system exploration"),
            "https://space-facts.com/solar-system/"
        );
        assert_eq!(url("Hubble telescope discoveries"), "https://space-facts.com/");
        assert!(!spec.is_fixed_page());
    }

    #[test]
    fn topic_ties_go_to_earlier_topic() {
        let tokens: Vec<String> = ["moon", "mars"].iter().map(|t| t.to_string()).collect();
        assert_eq!(topic_page(&tokens), "mars/");
        assert_eq!(topic_page(&[]), "");
    }

    #[test]
    fn wikipedia_pads_general_queries() {
        let catalog = SourceCatalog::space();
        let spec = catalog.source(SourceId::Wikipedia).expect("wikipedia");

        let general = Query::parse("weather report", &Lexicon::space()).expect("parse");
        assert!(spec.search_url(&general).ends_with("weather+report+space+astronomy"));

        let specific = Query::parse("mars rover", &Lexicon::space()).expect("parse");
        assert!(spec.search_url(&specific).ends_with("search=mars+rover"));
    }

    #[test]
    fn with_endpoint_overrides_template() {
        let catalog = SourceCatalog::space()
            .with_endpoint(SourceId::Nasa, "http://127.0.0.1:9/nasa?q={query}");
        let spec = catalog.source(SourceId::Nasa).expect("nasa");
        assert_eq!(spec.endpoint, "http://127.0.0.1:9/nasa?q={query}");
    }

    #[test]
    fn with_weight_clamps() {
        let spec = SourceSpec::new(SourceId::Nasa, "x", "y").with_weight(1.7);
        assert!((spec.weight - 1.0).abs() < f64::EPSILON);
    }
}
