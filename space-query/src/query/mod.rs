//! Query understanding: normalisation and intent detection.
//!
//! [`Query::parse`] turns raw user text into normalised tokens and a
//! non-empty set of [`Intent`]s, rejecting input with nothing searchable.

pub mod intent;
pub mod tokenize;

pub use intent::Lexicon;
pub use tokenize::normalize;

use std::collections::BTreeSet;

use crate::error::{QueryError, Result};
use crate::types::Intent;

/// A parsed, immutable user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    tokens: Vec<String>,
    intents: BTreeSet<Intent>,
}

impl Query {
    /// Normalise and classify `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyQuery`] if normalisation leaves no tokens.
    pub fn parse(raw: &str, lexicon: &Lexicon) -> Result<Self> {
        let tokens = normalize(raw);
        if tokens.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let intents = lexicon.classify(&tokens);
        Ok(Self {
            raw: raw.to_owned(),
            tokens,
            intents,
        })
    }

    /// The query exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalised tokens, in query order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Detected intents; never empty.
    pub fn intents(&self) -> &BTreeSet<Intent> {
        &self.intents
    }

    /// Cache key shared by all spellings that normalise identically.
    pub fn cache_key(&self) -> String {
        self.tokens.join(" ")
    }

    /// The raw text with whitespace collapsed, as sent to source search pages.
    pub fn search_terms(&self) -> String {
        self.raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Returns `true` if no specific intent was detected.
    pub fn is_general(&self) -> bool {
        self.intents.len() == 1 && self.intents.contains(&Intent::General)
    }
}
