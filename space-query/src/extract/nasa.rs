//! NASA news search (`nasa.gov/?s=`).
//!
//! The site has been redesigned several times, so the layout lists every
//! container shape seen on its search and listing pages.

use scraper::Html;

use super::cards::{parse_cards, CardLayout, DEFAULT_SNIPPETS};
use super::ExtractContext;
use crate::error::Result;
use crate::types::RawResult;

const LAYOUT: CardLayout = CardLayout {
    containers: &[
        "article",
        "div.search-result, div.search-item, div.news-item, div.article-card",
        ".hds-search-result, .hds-content-item",
        ".news-content",
        ".search-results .item",
        ".list-items .item",
        ".grid-item",
        ".nasa-card, .featured-content",
    ],
    snippets: DEFAULT_SNIPPETS,
};

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    parse_cards(document, ctx, &LAYOUT)
}
