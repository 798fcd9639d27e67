//! Generic article-card parser used by the news and agency sites.
//!
//! A site layout is a cascade of container selectors: the first selector
//! that matches anything wins and every match is treated as one card.
//! Within a card the first heading is the title, the link around or inside
//! the heading (else the first link) is the URL, the first non-empty
//! snippet candidate is the snippet and `<time datetime>` is the
//! publication time.

use scraper::{ElementRef, Html};

use super::text::{clean_snippet, element_text};
use super::{parse_datetime, selector, ExtractContext};
use crate::error::Result;
use crate::types::RawResult;

const HEADINGS: &str = "h1, h2, h3, h4, h5";
const LINKS: &str = "a[href]";
const TIME: &str = "time[datetime]";

/// Snippet candidates used when a layout does not override them.
pub(crate) const DEFAULT_SNIPPETS: &[&str] = &["p", ".description, .summary, .excerpt, .synopsis"];

/// Selector cascades describing one site's card markup.
pub(crate) struct CardLayout {
    pub containers: &'static [&'static str],
    pub snippets: &'static [&'static str],
}

/// Parse every card of the first matching container selector.
pub(crate) fn parse_cards(
    document: &Html,
    ctx: &ExtractContext<'_>,
    layout: &CardLayout,
) -> Result<Vec<RawResult>> {
    let heading_sel = selector(HEADINGS)?;
    let link_sel = selector(LINKS)?;
    let time_sel = selector(TIME)?;

    let mut cards = Vec::new();
    for css in layout.containers {
        let sel = selector(css)?;
        cards = document.select(&sel).collect::<Vec<_>>();
        if !cards.is_empty() {
            tracing::trace!(
                source = %ctx.source.id,
                selector = *css,
                count = cards.len(),
                "card containers matched"
            );
            break;
        }
    }

    let mut results = Vec::new();
    for card in cards {
        let Some(heading) = card.select(&heading_sel).next() else {
            continue;
        };
        let title = element_text(heading);
        if title.is_empty() {
            continue;
        }

        let Some(url) = card_link(card, heading, &link_sel).and_then(|href| ctx.resolve(href))
        else {
            continue;
        };

        let snippet = card_snippet(card, &title, layout.snippets)?;
        let published_at = card
            .select(&time_sel)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .and_then(parse_datetime);

        results.push(ctx.result(title, snippet, url, published_at));
    }

    Ok(results)
}

/// The card's link: inside the heading, then the nearest link enclosing the
/// heading (which may wrap the whole card), then the first link in the card.
fn card_link<'a>(
    card: ElementRef<'a>,
    heading: ElementRef<'a>,
    link_sel: &scraper::Selector,
) -> Option<&'a str> {
    if let Some(href) = heading
        .select(link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        return Some(href);
    }

    let wrapping = heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
        .and_then(|a| a.value().attr("href"));
    if wrapping.is_some() {
        return wrapping;
    }

    card.select(link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
}

fn card_snippet(card: ElementRef<'_>, title: &str, candidates: &[&str]) -> Result<String> {
    for css in candidates {
        let sel = selector(css)?;
        let found = card
            .select(&sel)
            .map(element_text)
            .find(|text| !text.is_empty() && text != title);
        if let Some(text) = found {
            return Ok(clean_snippet(&text));
        }
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceCatalog;
    use crate::types::SourceId;
    use chrono::{Datelike, Utc};

    const LAYOUT: CardLayout = CardLayout {
        containers: &["article", ".grid-item"],
        snippets: DEFAULT_SNIPPETS,
    };

    fn parse(html: &str) -> Vec<RawResult> {
        let catalog = SourceCatalog::space();
        let source = catalog.source(SourceId::Nasa).expect("nasa");
        let ctx = ExtractContext {
            source,
            page_url: "https://www.nasa.gov/?s=test",
            retrieved_at: Utc::now(),
        };
        parse_cards(&Html::parse_document(html), &ctx, &LAYOUT).expect("parse")
    }

    #[test]
    fn heading_link_title_and_snippet() {
        let results = parse(
            r#"<article>
                <h3><a href="/missions/artemis/">Artemis II Crew Named</a></h3>
                <p>Four astronauts will fly around the Moon.</p>
            </article>"#,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Artemis II Crew Named");
        assert_eq!(results[0].url, "https://www.nasa.gov/missions/artemis/");
        assert_eq!(results[0].snippet, "Four astronauts will fly around the Moon.");
    }

    #[test]
    fn link_wrapping_heading() {
        let results = parse(
            r#"<article><a href="https://www.nasa.gov/image/"><h2>Image of the Day</h2></a></article>"#,
        );
        assert_eq!(results[0].url, "https://www.nasa.gov/image/");
    }

    #[test]
    fn falls_back_to_first_link() {
        let results = parse(
            r#"<article><h2>Europa Clipper</h2><a href="/europa">Read more</a></article>"#,
        );
        assert_eq!(results[0].url, "https://www.nasa.gov/europa");
    }

    #[test]
    fn card_without_title_or_link_is_skipped() {
        let results = parse(
            r#"<article><p>No heading here</p><a href="/x">x</a></article>
               <article><h2>No link here</h2></article>
               <article><h2> </h2><a href="/blank">blank</a></article>"#,
        );
        assert!(results.is_empty());
    }

    #[test]
    fn cascade_uses_first_matching_container() {
        let results = parse(
            r#"<div class="grid-item"><h3><a href="/grid">Grid card</a></h3></div>"#,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Grid card");
    }

    #[test]
    fn earlier_container_shadows_later() {
        let results = parse(
            r#"<article><h3><a href="/a">Article card</a></h3></article>
               <div class="grid-item"><h3><a href="/g">Grid card</a></h3></div>"#,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Article card");
    }

    #[test]
    fn description_class_used_when_no_paragraph() {
        let results = parse(
            r#"<article><h3><a href="/d">Dragon docks</a></h3>
               <div class="summary">Crew Dragon docked with the station.</div></article>"#,
        );
        assert_eq!(results[0].snippet, "Crew Dragon docked with the station.");
    }

    #[test]
    fn missing_snippet_is_empty() {
        let results = parse(r#"<article><h3><a href="/n">No snippet</a></h3></article>"#);
        assert_eq!(results[0].snippet, "");
    }

    #[test]
    fn time_datetime_sets_published_at() {
        let results = parse(
            r#"<article><h3><a href="/t">Timed</a></h3>
               <time datetime="2025-01-15T10:00:00Z">Jan 15</time></article>"#,
        );
        let published = results[0].published_at.expect("published_at");
        assert_eq!((published.year(), published.month(), published.day()), (2025, 1, 15));
    }
}
