//! Order-preserving removal of repeated results.
//!
//! Runs after ranking, so the first occurrence kept is always the
//! highest-ranked one. Results are the same when their normalised URLs
//! match. Results that only link to their source's home page or fixed
//! landing page (SpaceX sections, for example) all share one URL, so those
//! compare by case-insensitive title instead. Links to a section of a page
//! (`#anchor`) compare by page and title, since normalisation drops the
//! anchor.

use std::collections::HashSet;

use url::Url;

use crate::sources::SourceSpec;
use crate::types::ScoredResult;

use super::url_normalize::normalize_url;

#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupKey {
    Url(String),
    HomeTitle(String),
    SectionTitle(String, String),
}

fn has_fragment(raw: &str) -> bool {
    Url::parse(raw.trim())
        .ok()
        .and_then(|url| url.fragment().map(|f| !f.is_empty()))
        .unwrap_or(false)
}

/// Drop every result that repeats an earlier one, keeping order.
pub fn deduplicate(ranked: Vec<ScoredResult>, sources: &[SourceSpec]) -> Vec<ScoredResult> {
    let home_pages: HashSet<String> = sources
        .iter()
        .flat_map(|s| {
            let landing = s.is_fixed_page().then(|| normalize_url(&s.endpoint));
            std::iter::once(normalize_url(&s.home_url)).chain(landing)
        })
        .collect();

    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(ranked.len());
    let before = ranked.len();

    let unique: Vec<ScoredResult> = ranked
        .into_iter()
        .filter(|scored| {
            let url = normalize_url(&scored.result.url);
            let title = || scored.result.title.trim().to_lowercase();
            let key = if home_pages.contains(&url) {
                DedupKey::HomeTitle(title())
            } else if has_fragment(&scored.result.url) {
                DedupKey::SectionTitle(url, title())
            } else {
                DedupKey::Url(url)
            };
            seen.insert(key)
        })
        .collect();

    if unique.len() < before {
        tracing::debug!(removed = before - unique.len(), "duplicate results removed");
    }
    unique
}
