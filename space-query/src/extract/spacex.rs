//! SpaceX home page. The site has no search; each content `<section>` with
//! a real heading becomes one result linking to the page itself.

use scraper::Html;

use super::text::{clean_snippet, element_text};
use super::{selector, ExtractContext};
use crate::error::Result;
use crate::types::RawResult;

/// Headings this short are navigation labels, not section titles.
const MIN_TITLE_CHARS: usize = 6;

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let section_sel = selector("section")?;
    let heading_sel = selector("h1, h2, h3")?;
    let paragraph_sel = selector("p")?;

    let mut results = Vec::new();
    for section in document.select(&section_sel) {
        let Some(title) = section
            .select(&heading_sel)
            .next()
            .map(element_text)
            .filter(|t| t.chars().count() >= MIN_TITLE_CHARS)
        else {
            continue;
        };

        let snippet = section
            .select(&paragraph_sel)
            .map(element_text)
            .find(|t| !t.is_empty())
            .map(|t| clean_snippet(&t))
            .unwrap_or_default();

        results.push(ctx.result(title, snippet, ctx.page_url.to_owned(), None));
    }

    tracing::trace!(count = results.len(), "SpaceX sections parsed");
    Ok(results)
}
