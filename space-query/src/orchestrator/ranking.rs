//! Relevance scoring and ordering.
//!
//! Each result gets a score in `[0, 1]` from three signals:
//!
//! - **token overlap**: share of query tokens found in the result, with
//!   title matches counted twice
//! - **source authority**: the source's weight from its [`SourceSpec`]
//! - **recency**: exponential decay on publication age, `0.5` when unknown
//!
//! Formula: `score = (w_o * overlap + w_a * authority + w_r * recency) / (w_o + w_a + w_r)`

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::RankingWeights;
use crate::query::normalize;
use crate::sources::SourceSpec;
use crate::types::{RawResult, ScoredResult, SourceId};

/// Recency signal for results without a publication time.
pub const NEUTRAL_RECENCY: f64 = 0.5;

/// Authority used for a result whose source is not in the selection.
const UNKNOWN_AUTHORITY: f64 = 0.5;

/// Share of `query_tokens` present in the result, title matches doubled.
///
/// `(matched anywhere + matched in title) / (2 * |query tokens|)`, so a
/// result matching every token in its title scores 1.0 and one matching
/// every token only in its snippet scores 0.5.
pub fn token_overlap(query_tokens: &[String], result: &RawResult) -> f64 {
    let unique: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
    if unique.is_empty() {
        return 0.0;
    }

    let title: HashSet<String> = normalize(&result.title).into_iter().collect();
    let snippet: HashSet<String> = normalize(&result.snippet).into_iter().collect();

    let mut matched_any = 0usize;
    let mut matched_title = 0usize;
    for token in &unique {
        let in_title = title.contains(*token);
        if in_title {
            matched_title += 1;
        }
        if in_title || snippet.contains(*token) {
            matched_any += 1;
        }
    }

    (matched_any + matched_title) as f64 / (2 * unique.len()) as f64
}

/// Recency in `(0, 1]`: 1.0 for items published now, halving every
/// `half_life_days`. Future dates count as now.
pub fn recency(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    let Some(published) = published_at else {
        return NEUTRAL_RECENCY;
    };
    let age_days = (now - published).num_seconds().max(0) as f64 / 86_400.0;
    0.5_f64.powf(age_days / half_life_days)
}

/// Score a single result.
pub fn score(
    result: &RawResult,
    query_tokens: &[String],
    authority: f64,
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted = weights.token_overlap * token_overlap(query_tokens, result)
        + weights.source_authority * authority
        + weights.recency * recency(result.published_at, now, weights.recency_half_life_days);
    (weighted / total).clamp(0.0, 1.0)
}

/// Score and order results.
///
/// `results` must be in discovery order grouped by source in selection
/// order. The output is sorted by descending score; ties keep the source's
/// position in `sources`, then discovery order.
pub fn rank(
    results: Vec<RawResult>,
    query_tokens: &[String],
    sources: &[SourceSpec],
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> Vec<ScoredResult> {
    let position = |id: SourceId| {
        sources
            .iter()
            .position(|s| s.id == id)
            .unwrap_or(sources.len())
    };

    let mut scored: Vec<(usize, ScoredResult)> = results
        .into_iter()
        .map(|result| {
            let authority = sources
                .iter()
                .find(|s| s.id == result.source)
                .map_or(UNKNOWN_AUTHORITY, |s| s.weight);
            let relevance_score = score(&result, query_tokens, authority, weights, now);
            (
                position(result.source),
                ScoredResult {
                    result,
                    relevance_score,
                },
            )
        })
        .collect();

    // Stable: equal keys keep discovery order.
    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        b.relevance_score
            .total_cmp(&a.relevance_score)
            .then_with(|| pos_a.cmp(pos_b))
    });

    scored.into_iter().map(|(_, result)| result).collect()
}
