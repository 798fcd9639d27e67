//! Space.com search (`space.com/search?q=`).
//!
//! The search page repeats its own search box as a card; that card is
//! dropped, and the input placeholder that leaks into snippets is blanked.

use scraper::Html;

use super::cards::{parse_cards, CardLayout};
use super::ExtractContext;
use crate::error::Result;
use crate::types::RawResult;

const LAYOUT: CardLayout = CardLayout {
    containers: &["article", ".search-result", ".result-item", ".listingResult"],
    snippets: &["p.synopsis, .synopsis", "p"],
};

const PLACEHOLDER_SNIPPET: &str = "enter your search term";

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let results = parse_cards(document, ctx, &LAYOUT)?
        .into_iter()
        .filter(|result| !result.title.eq_ignore_ascii_case("search"))
        .map(|mut result| {
            if result.snippet.to_lowercase().contains(PLACEHOLDER_SNIPPET) {
                result.snippet.clear();
            }
            result
        })
        .collect();
    Ok(results)
}
