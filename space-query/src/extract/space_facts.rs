//! Space Facts topic pages (`space-facts.com/<topic>/`).
//!
//! The site has no search. A topic page yields one "<Title> Facts" result
//! summarising its fact tables and fact lists, plus one result for each of
//! the first two content sections, linked by anchor.

use scraper::{ElementRef, Html};
use url::Url;

use super::text::{clean_snippet, element_text};
use super::{selector, ExtractContext};
use crate::error::Result;
use crate::types::RawResult;

/// Facts folded into the summary snippet.
const MAX_FACTS: usize = 5;

/// List items this short are labels, not facts.
const MIN_FACT_CHARS: usize = 11;

/// Content sections turned into their own results.
const MAX_SECTIONS: usize = 2;

const SECTIONS: &str = "section.post, section.entry, section.content, \
                        article.post, article.entry, article.content, \
                        div.post, div.entry, div.content";

pub(crate) fn parse(document: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<RawResult>> {
    let mut results = Vec::new();

    let facts = collect_facts(document)?;
    if !facts.is_empty() {
        let h1 = selector("h1")?;
        let page_title = document
            .select(&h1)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| topic_title(ctx.page_url));
        let snippet = clean_snippet(&format!("Facts: {}", facts.join(" | ")));
        results.push(ctx.result(
            format!("{page_title} Facts"),
            snippet,
            ctx.page_url.to_owned(),
            None,
        ));
    }

    let section_sel = selector(SECTIONS)?;
    let heading_sel = selector("h2, h3, h4")?;
    let paragraph_sel = selector("p")?;
    for section in document.select(&section_sel).take(MAX_SECTIONS) {
        let title = section.select(&heading_sel).next().map(element_text);
        let text = section.select(&paragraph_sel).next().map(element_text);
        let (Some(title), Some(text)) = (title, text) else {
            continue;
        };
        if title.is_empty() || text.is_empty() {
            continue;
        }
        let url = anchor_url(ctx.page_url, &title);
        results.push(ctx.result(title, clean_snippet(&text), url, None));
    }

    tracing::trace!(count = results.len(), "Space Facts entries parsed");
    Ok(results)
}

/// Table rows as "name: value", then list items outside page chrome.
fn collect_facts(document: &Html) -> Result<Vec<String>> {
    let row_sel = selector("table tr")?;
    let cell_sel = selector("th, td")?;
    let item_sel = selector("ul li")?;

    let rows = document.select(&row_sel).filter_map(|row| {
        let mut cells = row.select(&cell_sel).map(element_text);
        let name = cells.next()?;
        let name = name.trim_end_matches(':').trim();
        if name.is_empty() {
            return None;
        }
        let value = cells.next()?;
        Some(format!("{name}: {value}"))
    });

    let items = document
        .select(&item_sel)
        .filter(|item| !in_page_chrome(*item))
        .map(element_text)
        .filter(|text| text.chars().count() >= MIN_FACT_CHARS);

    Ok(rows.chain(items).take(MAX_FACTS).collect())
}

fn in_page_chrome(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| matches!(a.value().name(), "nav" | "header" | "footer"))
}

/// "Solar System" from `.../solar-system/`, "Space" for the site root.
fn topic_title(page_url: &str) -> String {
    let segment = Url::parse(page_url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_owned))
    });
    let Some(segment) = segment else {
        return "Space".to_owned();
    };
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `page_url` with an anchor slugged from `title`.
fn anchor_url(page_url: &str, title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    match Url::parse(page_url) {
        Ok(mut url) => {
            url.set_fragment(Some(&slug));
            url.to_string()
        }
        Err(_) => format!("{page_url}#{slug}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceCatalog;
    use crate::types::SourceId;
    use chrono::Utc;

    const MOCK_MARS_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<header><nav><ul><li>Planets and dwarf planets</li><li>Home</li></ul></nav></header>
<h1>Mars</h1>
<table>
    <tr><th>Diameter:</th><td>6,779 km</td></tr>
    <tr><th>Moons:</th><td>2 (Phobos &amp; Deimos)</td></tr>
    <tr><td colspan="2">Source: NASA</td></tr>
</table>
<ul>
    <li>Mars is the fourth planet from the Sun.</li>
    <li>Short</li>
    <li>Olympus Mons is the tallest volcano in the solar system.</li>
</ul>
<div class="post">
    <h2>Mars Atmosphere</h2>
    <p>The Martian atmosphere is mostly carbon dioxide.</p>
</div>
<div class="entry">
    <h3>Missions to Mars</h3>
</div>
<div class="content">
    <h2>Mars in Culture</h2>
    <p>Named after the Roman god of war.</p>
</div>
</body>
</html>"#;

    fn parse_at(html: &str, page_url: &str) -> Vec<RawResult> {
        let catalog = SourceCatalog::space();
        let ctx = ExtractContext {
            source: catalog.source(SourceId::SpaceFacts).expect("space facts"),
            page_url,
            retrieved_at: Utc::now(),
        };
        parse(&Html::parse_document(html), &ctx).expect("should parse")
    }

    #[test]
    fn parse_mock_space_facts_html() {
        let results = parse_at(MOCK_MARS_HTML, "https://space-facts.com/mars/");
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Mars Facts");
        assert_eq!(results[0].url, "https://space-facts.com/mars/");
        assert_eq!(
            results[0].snippet,
            "Facts: Diameter: 6,779 km | Moons: 2 (Phobos & Deimos) | \
             Mars is the fourth planet from the Sun. | \
             Olympus Mons is the tallest volcano in the solar system."
        );
        assert_eq!(results[0].source, SourceId::SpaceFacts);

        assert_eq!(results[1].title, "Mars Atmosphere");
        assert_eq!(results[1].url, "https://space-facts.com/mars/#mars-atmosphere");
        assert!(results[1].snippet.contains("carbon dioxide"));
    }

    #[test]
    fn only_first_two_sections_are_considered() {
        // The second section has no paragraph and the third is past the limit.
        let results = parse_at(MOCK_MARS_HTML, "https://space-facts.com/mars/");
        assert!(results.iter().all(|r| r.title != "Missions to Mars"));
        assert!(results.iter().all(|r| r.title != "Mars in Culture"));
    }

    #[test]
    fn navigation_lists_are_not_facts() {
        let results = parse_at(MOCK_MARS_HTML, "https://space-facts.com/mars/");
        assert!(!results[0].snippet.contains("dwarf planets"));
    }

    #[test]
    fn facts_capped_at_five() {
        let rows: String = (1..=8)
            .map(|i| format!("<tr><td>Fact {i}</td><td>value {i}</td></tr>"))
            .collect();
        let html = format!("<html><body><h1>Jupiter</h1><table>{rows}</table></body></html>");
        let results = parse_at(&html, "https://space-facts.com/jupiter/");
        assert_eq!(results.len(), 1);
        assert!(results[0].snippet.contains("Fact 5: value 5"));
        assert!(!results[0].snippet.contains("Fact 6"));
    }

    #[test]
    fn title_falls_back_to_topic_from_url() {
        let html = "<html><body><ul><li>The Sun holds 99.86% of the mass.</li></ul></body></html>";
        let results = parse_at(html, "https://space-facts.com/solar-system/");
        assert_eq!(results[0].title, "Solar System Facts");

        let results = parse_at(html, "https://space-facts.com/");
        assert_eq!(results[0].title, "Space Facts");
    }

    #[test]
    fn page_without_facts_or_sections_is_empty() {
        let results = parse_at(
            "<html><body><h1>404</h1></body></html>",
            "https://space-facts.com/x/",
        );
        assert!(results.is_empty());
    }
}
