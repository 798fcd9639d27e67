//! English Wikipedia search.
//!
//! `index.php?search=` serves either a result list or, on an exact title
//! match, redirects straight to the article. Both shapes are handled: the
//! result list yields one result per hit, an article yields a single result
//! built from its lead paragraphs.

use scraper::Html;

use super::text::{clean_snippet, element_text};
use super::{selector, ExtractContext};
use crate::error::Result;
use crate::types::RawResult;

/// Lead paragraphs shorter than this are hatnotes or coordinates.
const MIN_PARAGRAPH_CHARS: usize = 51;
const LEAD_PARAGRAPHS: usize = 3;

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let hit_sel = selector(".mw-search-result")?;
    if document.select(&hit_sel).next().is_some() {
        return parse_search_results(document, ctx);
    }
    // An empty result list still has a page heading; only real articles
    // carry a parser-output body.
    let search_page_sel = selector(".searchresults, #mw-search-top-table")?;
    if document.select(&search_page_sel).next().is_some() {
        return Ok(Vec::new());
    }
    parse_article(document, ctx)
}

fn parse_search_results(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let hit_sel = selector(".mw-search-result")?;
    let link_sel = selector(".mw-search-result-heading a[href]")?;
    let snippet_sel = selector(".searchresult")?;

    let mut results = Vec::new();
    for hit in document.select(&hit_sel) {
        let Some(link) = hit.select(&link_sel).next() else {
            continue;
        };
        let title = element_text(link);
        if title.is_empty() {
            continue;
        }
        let Some(url) = link.value().attr("href").and_then(|href| ctx.resolve(href)) else {
            continue;
        };
        let snippet = hit
            .select(&snippet_sel)
            .next()
            .map(|el| clean_snippet(&element_text(el)))
            .unwrap_or_default();

        results.push(ctx.result(title, snippet, url, None));
    }

    tracing::trace!(count = results.len(), "Wikipedia search hits parsed");
    Ok(results)
}

fn parse_article(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let heading_sel = selector("#firstHeading")?;
    let paragraph_sel = selector("#mw-content-text .mw-parser-output > p")?;

    let Some(title) = document
        .select(&heading_sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
    else {
        return Ok(Vec::new());
    };

    let lead: Vec<String> = document
        .select(&paragraph_sel)
        .map(element_text)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .take(LEAD_PARAGRAPHS)
        .collect();
    if lead.is_empty() {
        return Ok(Vec::new());
    }

    let snippet = clean_snippet(&strip_citations(&lead.join(" ")));
    Ok(vec![ctx.result(title, snippet, ctx.page_url.to_owned(), None)])
}

/// Remove bracketed citation markers such as `[1]` or `[note 2]`.
fn strip_citations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']') else {
            break;
        };
        let inner = &rest[open + 1..open + close];
        out.push_str(&rest[..open]);
        if !is_citation(inner) {
            out.push_str(&rest[open..=open + close]);
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_citation(inner: &str) -> bool {
    inner.chars().all(|c| c.is_ascii_digit())
        || inner.starts_with("note ")
        || inner == "citation needed"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceCatalog;
    use crate::types::SourceId;
    use chrono::Utc;

    const MOCK_SEARCH_HTML: &str = r#"<html><body>
<h1 id="firstHeading">Search results</h1>
<div class="searchresults">
<ul class="mw-search-results">
  <li class="mw-search-result">
    <div class="mw-search-result-heading"><a href="/wiki/SpaceX_Starship" title="SpaceX Starship">SpaceX <span class="searchmatch">Starship</span></a></div>
    <div class="searchresult">SpaceX <span class="searchmatch">Starship</span> is a two-stage fully reusable super heavy-lift launch vehicle</div>
  </li>
  <li class="mw-search-result">
    <div class="mw-search-result-heading"><a href="/wiki/Starbase" title="Starbase">Starbase</a></div>
    <div class="searchresult">Starbase is an industrial complex and rocket launch site</div>
  </li>
</ul>
</div>
</body></html>"#;

    const MOCK_ARTICLE_HTML: &str = r#"<html><body>
<h1 id="firstHeading"><span class="mw-page-title-main">Perseverance (rover)</span></h1>
<div id="mw-content-text"><div class="mw-parser-output">
  <p class="mw-empty-elt"></p>
  <p>Coordinates: 18.44°N</p>
  <p><b>Perseverance</b> is a car-sized Mars rover designed to explore the Jezero crater on Mars as part of NASA's Mars 2020 mission.[1][2]</p>
  <p>It was manufactured by the Jet Propulsion Laboratory and launched on July 30, 2020.[note 1]</p>
</div></div>
</body></html>"#;

    const MOCK_NO_RESULTS_HTML: &str = r#"<html><body>
<h1 id="firstHeading">Search results</h1>
<div class="searchresults"><p class="mw-search-nonefound">There were no results matching the query.</p></div>
</body></html>"#;

    fn parse_mock(html: &str, page_url: &str) -> Vec<RawResult> {
        let catalog = SourceCatalog::space();
        let ctx = ExtractContext {
            source: catalog.source(SourceId::Wikipedia).expect("wikipedia"),
            page_url,
            retrieved_at: Utc::now(),
        };
        parse(&Html::parse_document(html), &ctx).expect("should parse")
    }

    #[test]
    fn parse_search_results_page() {
        let results = parse_mock(
            MOCK_SEARCH_HTML,
            "https://en.wikipedia.org/w/index.php?search=starship",
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "SpaceX Starship");
        assert_eq!(results[0].url, "https://en.wikipedia.org/wiki/SpaceX_Starship");
        assert!(results[0].snippet.starts_with("SpaceX Starship is a two-stage"));
        assert_eq!(results[1].url, "https://en.wikipedia.org/wiki/Starbase");
    }

    #[test]
    fn parse_direct_article() {
        let url = "https://en.wikipedia.org/wiki/Perseverance_(rover)";
        let results = parse_mock(MOCK_ARTICLE_HTML, url);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Perseverance (rover)");
        assert_eq!(results[0].url, url);
        assert!(results[0].snippet.starts_with("Perseverance is a car-sized Mars rover"));
        assert!(!results[0].snippet.contains("Coordinates"));
        assert!(!results[0].snippet.contains("[1]"));
        assert!(!results[0].snippet.contains("[note 1]"));
    }

    #[test]
    fn no_results_page_is_empty() {
        let results = parse_mock(
            MOCK_NO_RESULTS_HTML,
            "https://en.wikipedia.org/w/index.php?search=zzzz",
        );
        assert!(results.is_empty());
    }

    #[test]
    fn strip_citations_keeps_other_brackets() {
        assert_eq!(
            strip_citations("Mars[1] has two moons [Phobos and Deimos].[citation needed]"),
            "Mars has two moons [Phobos and Deimos]."
        );
    }
}
