//! Universe Today search (`universetoday.com/?s=`). WordPress markup.

use scraper::Html;

use super::cards::{parse_cards, CardLayout};
use super::ExtractContext;
use crate::error::Result;
use crate::types::RawResult;

const LAYOUT: CardLayout = CardLayout {
    containers: &["article.post", "article"],
    // Prefer the excerpt over the byline paragraph.
    snippets: &["p.excerpt, .entry-summary, .excerpt", "p"],
};

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    parse_cards(document, ctx, &LAYOUT)
}
