//! Query text normalisation.
//!
//! Lower-cases, splits on anything that is not alphanumeric, and drops
//! stop-words and one-character fragments. The output is a fixed point:
//! normalising the space-joined tokens again yields the same tokens.

/// Tokens shorter than this many characters are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// English stop-words removed from queries. Must stay sorted for
/// binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "please", "same",
    "she", "should", "show", "so", "some", "such", "tell", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Normalise raw query text into an ordered list of search tokens.
///
/// An empty result means the text had nothing searchable in it.
///
/// # Examples
///
/// ```
/// use space_query::query::normalize;
///
/// assert_eq!(
///     normalize("Latest SpaceX Starship updates!"),
///     vec!["latest", "spacex", "starship", "updates"]
/// );
/// assert!(normalize("   ").is_empty());
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_owned)
        .collect()
}

/// Returns `true` if `token` (already lower-case) is a stop-word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}
