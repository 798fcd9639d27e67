//! Per-source result extraction from fetched pages.
//!
//! [`extract`] dispatches on [`SourceId`] to one parser per site. News and
//! agency sites share the article-card parser in [`cards`]; SpaceX,
//! Wikipedia and the Space Facts topic pages have their own layouts. Each parser is a plain function over a
//! parsed [`Html`] document so it can be tested against fixture markup.

mod astrogeology;
mod cards;
mod nasa;
mod nasa_science;
mod space_com;
mod space_facts;
mod spacex;
pub mod text;
mod universe_today;
mod wikipedia;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{Html, Selector};
use url::Url;

use crate::error::{QueryError, Result};
use crate::fetch::FetchedPage;
use crate::sources::SourceSpec;
use crate::types::{RawResult, SourceId};

/// Per-page inputs shared by every parser.
pub(crate) struct ExtractContext<'a> {
    pub source: &'a SourceSpec,
    /// Final URL the page was served from.
    pub page_url: &'a str,
    pub retrieved_at: DateTime<Utc>,
}

impl ExtractContext<'_> {
    /// Resolve `href` against the source's home page.
    ///
    /// Returns `None` for fragments, `javascript:`/`mailto:` links and
    /// anything that does not end up as an `http(s)` URL.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }
        let base = Url::parse(&self.source.home_url).ok()?;
        let url = base.join(href).ok()?;
        matches!(url.scheme(), "http" | "https").then(|| url.to_string())
    }

    pub fn result(
        &self,
        title: String,
        snippet: String,
        url: String,
        published_at: Option<DateTime<Utc>>,
    ) -> RawResult {
        RawResult {
            title,
            snippet,
            url,
            source: self.source.id,
            retrieved_at: self.retrieved_at,
            published_at,
        }
    }
}

/// Extract up to `max_results` results from a page fetched from `source`.
///
/// A page with no matching markup yields `Ok` with no results.
///
/// # Errors
///
/// Returns [`QueryError::ExtractionFailed`] if the body is empty or is not
/// HTML.
pub fn extract(
    source: &SourceSpec,
    page: &FetchedPage,
    max_results: usize,
    retrieved_at: DateTime<Utc>,
) -> Result<Vec<RawResult>> {
    let html = String::from_utf8_lossy(&page.body);
    let trimmed = html.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return Err(QueryError::ExtractionFailed(format!(
            "{} returned an empty page",
            source.id
        )));
    }
    if !trimmed.starts_with('<') {
        return Err(QueryError::ExtractionFailed(format!(
            "{} returned a non-HTML body",
            source.id
        )));
    }

    let document = Html::parse_document(&html);
    let ctx = ExtractContext {
        source,
        page_url: &page.url,
        retrieved_at,
    };

    let mut results = match source.id {
        SourceId::Nasa => nasa::parse(&document, &ctx)?,
        SourceId::NasaScience => nasa_science::parse(&document, &ctx)?,
        SourceId::SpaceX => spacex::parse(&document, &ctx)?,
        SourceId::SpaceCom => space_com::parse(&document, &ctx)?,
        SourceId::Wikipedia => wikipedia::parse(&document, &ctx)?,
        SourceId::UniverseToday => universe_today::parse(&document, &ctx)?,
        SourceId::Astrogeology => astrogeology::parse(&document, &ctx)?,
        SourceId::SpaceFacts => space_facts::parse(&document, &ctx)?,
    };
    results.truncate(max_results);

    tracing::debug!(source = %source.id, count = results.len(), "results extracted");
    Ok(results)
}

/// Parse a CSS selector, mapping failure to [`QueryError::ExtractionFailed`].
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| QueryError::ExtractionFailed(format!("invalid selector {css:?}: {e:?}")))
}

/// Parse a `<time datetime>` value.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and a bare
/// date (midnight UTC).
pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
