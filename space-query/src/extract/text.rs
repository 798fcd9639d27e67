//! Text clean-up shared by all extractors.

use scraper::ElementRef;

/// Maximum snippet length in characters, including the ellipsis.
pub const MAX_SNIPPET_CHARS: usize = 300;

const ELLIPSIS: char = '…';

/// Collapse every run of whitespace to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace-collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Clean a snippet: collapse whitespace and cut to [`MAX_SNIPPET_CHARS`].
pub fn clean_snippet(text: &str) -> String {
    truncate_on_word(&collapse_whitespace(text), MAX_SNIPPET_CHARS)
}

/// Truncate to at most `max_chars` characters, preferring the last word
/// boundary, and mark the cut with an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text never splits a char.
pub fn truncate_on_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }

    // Leave room for the ellipsis.
    let budget = max_chars - 1;
    let cut = text
        .char_indices()
        .nth(budget)
        .map_or(text.len(), |(idx, _)| idx);
    let head = &text[..cut];

    // Only back off to a space if it keeps most of the text.
    let head = match head.rfind(' ') {
        Some(space) if head[..space].chars().count() >= budget / 2 => &head[..space],
        _ => head,
    };

    let mut truncated = head.trim_end().to_owned();
    truncated.push(ELLIPSIS);
    truncated
}
