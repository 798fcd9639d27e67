//! Engine configuration with sensible defaults.
//!
//! [`EngineConfig`] controls caching, per-source and per-request timeouts,
//! fan-out and result caps, and the relevance weights. Values are plain data
//! supplied by the embedding application; the engine never mutates them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::QueryError;

/// Configuration for a [`crate::QueryEngine`].
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether query results are cached at all.
    pub cache_enabled: bool,
    /// How long a cached result stays valid, in seconds.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached query results.
    pub cache_max_entries: u64,
    /// Deadline for a single source fetch, in seconds.
    pub source_timeout_seconds: u64,
    /// Deadline for the whole fan-out of one query, in seconds.
    pub request_timeout_seconds: u64,
    /// Upper bound on sources fetched per query.
    pub max_sources_per_query: usize,
    /// Upper bound on results extracted from a single source page.
    pub max_results_per_source: usize,
    /// Maximum number of results returned after ranking and de-duplication.
    pub max_results: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Relevance scoring weights.
    pub ranking: RankingWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_seconds: 3600,
            cache_max_entries: 100,
            source_timeout_seconds: 5,
            request_timeout_seconds: 10,
            max_sources_per_query: 5,
            max_results_per_source: 5,
            max_results: 10,
            user_agent: None,
            ranking: RankingWeights::default(),
        }
    }
}

/// Relative weights of the relevance signals.
///
/// The final score is the weighted mean of the signals, so only the
/// ratios between weights matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Weight of query-token overlap with title and snippet.
    pub token_overlap: f64,
    /// Weight of the source's authority.
    pub source_authority: f64,
    /// Weight of publication recency.
    pub recency: f64,
    /// Age in days at which the recency signal halves.
    pub recency_half_life_days: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            token_overlap: 0.6,
            source_authority: 0.3,
            recency: 0.1,
            recency_half_life_days: 30.0,
        }
    }
}

impl EngineConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `cache_ttl_seconds` and `cache_max_entries` must be greater than 0
    /// - both timeouts must be greater than 0
    /// - `max_sources_per_query`, `max_results_per_source` and `max_results`
    ///   must be greater than 0
    /// - ranking weights must be finite and non-negative, with a positive sum
    /// - `recency_half_life_days` must be finite and positive
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.cache_ttl_seconds == 0 {
            return Err(invalid("cache_ttl_seconds must be greater than 0"));
        }
        if self.cache_max_entries == 0 {
            return Err(invalid("cache_max_entries must be greater than 0"));
        }
        if self.source_timeout_seconds == 0 {
            return Err(invalid("source_timeout_seconds must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(invalid("request_timeout_seconds must be greater than 0"));
        }
        if self.max_sources_per_query == 0 {
            return Err(invalid("max_sources_per_query must be greater than 0"));
        }
        if self.max_results_per_source == 0 {
            return Err(invalid("max_results_per_source must be greater than 0"));
        }
        if self.max_results == 0 {
            return Err(invalid("max_results must be greater than 0"));
        }
        self.ranking.validate()
    }

    /// Per-source fetch deadline.
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_seconds)
    }

    /// Whole-request fan-out deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl RankingWeights {
    /// Sum of the three signal weights.
    pub fn total(&self) -> f64 {
        self.token_overlap + self.source_authority + self.recency
    }

    fn validate(&self) -> Result<(), QueryError> {
        let weights = [
            ("token_overlap", self.token_overlap),
            ("source_authority", self.source_authority),
            ("recency", self.recency),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!(
                    "ranking.{name} must be a finite, non-negative number"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(invalid("ranking weights must not all be zero"));
        }
        if !self.recency_half_life_days.is_finite() || self.recency_half_life_days <= 0.0 {
            return Err(invalid("ranking.recency_half_life_days must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> QueryError {
    QueryError::InvalidConfiguration(message.into())
}
