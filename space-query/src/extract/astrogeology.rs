//! USGS Astrogeology search (`astrogeology.usgs.gov/search/results?q=`).

use scraper::Html;

use super::cards::{parse_cards, CardLayout, DEFAULT_SNIPPETS};
use super::ExtractContext;
use crate::error::Result;
use crate::types::RawResult;

const LAYOUT: CardLayout = CardLayout {
    containers: &[".item", ".product-item", ".result-item", "article"],
    snippets: DEFAULT_SNIPPETS,
};

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    parse_cards(document, ctx, &LAYOUT)
}
