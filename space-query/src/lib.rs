//! # space-query
//!
//! Query intelligence and aggregation for space news and reference sites.
//!
//! A free-text query such as "Latest SpaceX Starship updates" is normalised
//! into tokens, classified into topical intents, routed to the sources that
//! cover those intents, fetched concurrently, extracted into uniform
//! results, ranked for relevance, de-duplicated and cached.
//!
//! ## Design
//!
//! - Per-intent source routing over a static catalog (NASA, SpaceX,
//!   Space.com, Wikipedia and others)
//! - Concurrent fetch with per-source and per-request deadlines; one slow
//!   or broken source never fails the query
//! - Per-site HTML extraction with CSS selectors
//! - Relevance from token overlap, source authority and recency
//! - In-memory cache with TTL and oldest-first eviction, shared between
//!   engines by handle
//!
//! ## Security
//!
//! - No network listeners: this is a library, not a server
//! - Query text is logged only at trace level
//! - Snippets are whitespace-normalised and length-bounded

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod sources;
pub mod types;

pub use cache::QueryCache;
pub use config::{EngineConfig, RankingWeights};
pub use error::{ErrorKind, QueryError, Result};
pub use fetch::{FetchedPage, SourceFetcher};
pub use http::HttpFetcher;
pub use orchestrator::QueryEngine;
pub use query::{Lexicon, Query};
pub use sources::{SourceCatalog, SourceSpec};
pub use types::{Intent, QueryResult, RawResult, ScoredResult, SourceFailure, SourceId};

/// Answer one query with a throwaway engine.
///
/// Builds a [`QueryEngine`] from `config` for this call only, so nothing is
/// cached between calls. Long-lived callers should keep an engine instead.
///
/// # Errors
///
/// Same as [`QueryEngine::new`] and [`QueryEngine::handle_query`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> space_query::Result<()> {
/// let config = space_query::EngineConfig::default();
/// let answer = space_query::search("Latest NASA missions to Mars", &config).await?;
/// for scored in &answer.results {
///     println!("{:.2} {}: {}", scored.relevance_score, scored.result.title, scored.result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &EngineConfig) -> Result<QueryResult> {
    QueryEngine::new(config.clone())?.handle_query(query).await
}
