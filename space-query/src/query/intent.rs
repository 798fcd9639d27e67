//! Keyword lexicon and intent classification.
//!
//! Each [`Intent`] owns a table of trigger words and phrases. A query
//! triggers every intent with at least one matching trigger; queries that
//! trigger nothing are [`Intent::General`]. Matching is exact per token with
//! light plural folding, and multi-word phrases must appear as a contiguous
//! run of tokens.

use std::collections::BTreeSet;

use crate::types::Intent;

use super::tokenize::normalize;

/// Immutable intent lexicon, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

#[derive(Debug, Clone)]
struct LexiconEntry {
    intent: Intent,
    /// Normalised token sequences; single words are one-element phrases.
    triggers: Vec<Vec<String>>,
}

impl Lexicon {
    /// An empty lexicon. Every query classifies as [`Intent::General`].
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add trigger words or phrases for `intent`.
    ///
    /// Triggers are normalised the same way queries are, so `"Red Planet"`
    /// and `"red planet"` are the same phrase.
    pub fn with_triggers(mut self, intent: Intent, triggers: &[&str]) -> Self {
        let phrases: Vec<Vec<String>> = triggers
            .iter()
            .map(|t| normalize(t))
            .filter(|phrase| !phrase.is_empty())
            .collect();

        match self.entries.iter_mut().find(|e| e.intent == intent) {
            Some(entry) => entry.triggers.extend(phrases),
            None => self.entries.push(LexiconEntry {
                intent,
                triggers: phrases,
            }),
        }
        self
    }

    /// The built-in space lexicon.
    pub fn space() -> Self {
        Self::empty()
            .with_triggers(
                Intent::Mars,
                &[
                    "mars",
                    "martian",
                    "rover",
                    "perseverance",
                    "curiosity",
                    "ingenuity",
                    "jezero",
                    "red planet",
                ],
            )
            .with_triggers(Intent::Moon, &["moon", "lunar", "apollo", "artemis"])
            .with_triggers(
                Intent::SpaceX,
                &[
                    "spacex",
                    "falcon",
                    "dragon",
                    "starship",
                    "starlink",
                    "musk",
                    "super heavy",
                ],
            )
            .with_triggers(
                Intent::Iss,
                &[
                    "iss",
                    "spacewalk",
                    "space station",
                    "international space station",
                ],
            )
            .with_triggers(
                Intent::Astronomy,
                &[
                    "astronomy",
                    "astrophysics",
                    "galaxy",
                    "nebula",
                    "telescope",
                    "hubble",
                    "webb",
                    "jwst",
                    "quasar",
                    "universe",
                    "cosmos",
                    "cosmology",
                    "exoplanet",
                    "supernova",
                    "comet",
                    "asteroid",
                    "meteor",
                    "constellation",
                    "black hole",
                    "solar system",
                    "milky way",
                ],
            )
    }

    /// Classify normalised query tokens into a non-empty set of intents.
    pub fn classify(&self, tokens: &[String]) -> BTreeSet<Intent> {
        let folded: Vec<String> = tokens.iter().map(|t| fold(t)).collect();
        let tokens: Vec<(&str, &str)> = tokens
            .iter()
            .zip(&folded)
            .map(|(token, folded)| (token.as_str(), folded.as_str()))
            .collect();

        let mut intents: BTreeSet<Intent> = self
            .entries
            .iter()
            .filter(|entry| {
                entry
                    .triggers
                    .iter()
                    .any(|phrase| contains_phrase(&tokens, phrase))
            })
            .map(|entry| entry.intent)
            .collect();

        if intents.is_empty() {
            intents.insert(Intent::General);
        }
        intents
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::space()
    }
}

/// Returns `true` if `phrase` occurs as a contiguous run in `tokens`.
///
/// Each token is `(as written, plural-folded)`; a phrase word matches
/// either form. Triggers are never folded, so "mars" only matches "mars".
fn contains_phrase(tokens: &[(&str, &str)], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|window| {
        window
            .iter()
            .zip(phrase)
            .all(|(&(token, folded), word)| word == token || word == folded)
    })
}

/// Fold simple English plurals so "rovers" matches "rover" and
/// "galaxies" matches "galaxy".
fn fold(token: &str) -> String {
    if token.chars().count() > 4 {
        if let Some(stem) = token.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if token.chars().count() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        return token[..token.len() - 1].to_owned();
    }
    token.to_owned()
}
