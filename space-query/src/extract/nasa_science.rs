//! NASA Science search (`science.nasa.gov/?s=`).

use scraper::Html;

use super::cards::{parse_cards, CardLayout, DEFAULT_SNIPPETS};
use super::ExtractContext;
use crate::error::Result;
use crate::types::RawResult;

const LAYOUT: CardLayout = CardLayout {
    containers: &[
        "article",
        ".hds-search-result",
        ".search-result",
        ".result-item",
    ],
    snippets: DEFAULT_SNIPPETS,
};

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    parse_cards(document, ctx, &LAYOUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceCatalog;
    use crate::types::SourceId;
    use chrono::Utc;

    const MOCK_SCIENCE_HTML: &str = r#"<html><body>
<div class="search-result">
    <h4><a href="/mission/webb/">James Webb Space Telescope</a></h4>
    <div class="excerpt">Webb is the premier observatory of the next decade.</div>
</div>
<div class="search-result">
    <h4><a href="https://science.nasa.gov/universe/galaxies/">Galaxies</a></h4>
    <p>Galaxies consist of stars, planets, and vast clouds of gas and dust.</p>
</div>
</body></html>"#;

    #[test]
    fn parse_mock_science_html() {
        let catalog = SourceCatalog::space();
        let ctx = ExtractContext {
            source: catalog.source(SourceId::NasaScience).expect("nasa science"),
            page_url: "https://science.nasa.gov/?s=webb",
            retrieved_at: Utc::now(),
        };
        let results = parse(&Html::parse_document(MOCK_SCIENCE_HTML), &ctx).expect("should parse");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "James Webb Space Telescope");
        assert_eq!(results[0].url, "https://science.nasa.gov/mission/webb/");
        assert_eq!(
            results[0].snippet,
            "Webb is the premier observatory of the next decade."
        );
        assert_eq!(results[1].url, "https://science.nasa.gov/universe/galaxies/");
        assert_eq!(results[1].source, SourceId::NasaScience);
    }
}
