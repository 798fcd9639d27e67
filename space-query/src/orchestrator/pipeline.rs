//! The query engine: parse, select, fetch, extract, rank, de-duplicate.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;

use crate::cache::QueryCache;
use crate::config::EngineConfig;
use crate::error::{QueryError, Result};
use crate::extract::extract;
use crate::fetch::{fetch_all, FetchTimeouts, SourceFetcher};
use crate::http::HttpFetcher;
use crate::query::{Lexicon, Query};
use crate::sources::{SourceCatalog, SourceSpec};
use crate::types::{QueryResult, SourceFailure, SourceId};

use super::dedup::deduplicate;
use super::ranking::rank;

/// Answers free-text space queries from the configured sources.
///
/// Holds immutable configuration, the lexicon and source catalog, a
/// [`SourceFetcher`] and an optional shared [`QueryCache`]. All state used
/// per call lives on the stack of [`QueryEngine::handle_query`], so one
/// engine can serve concurrent callers.
#[derive(Debug)]
pub struct QueryEngine<F = HttpFetcher> {
    config: EngineConfig,
    fetcher: F,
    catalog: SourceCatalog,
    lexicon: Lexicon,
    cache: Option<QueryCache>,
}

impl QueryEngine<HttpFetcher> {
    /// Create an engine that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfiguration`] if `config` fails
    /// validation or the HTTP client cannot be built.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: SourceFetcher> QueryEngine<F> {
    /// Create an engine with a custom fetcher.
    ///
    /// A private cache is created when `config.cache_enabled` is set; use
    /// [`QueryEngine::with_cache`] to share one between engines.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn with_fetcher(config: EngineConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        let cache = config
            .cache_enabled
            .then(|| QueryCache::from_config(&config));
        Ok(Self {
            config,
            fetcher,
            catalog: SourceCatalog::space(),
            lexicon: Lexicon::space(),
            cache,
        })
    }

    /// Replace the source catalog.
    pub fn with_catalog(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the intent lexicon.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Use `cache` for results. Ignored when caching is disabled.
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        if self.config.cache_enabled {
            self.cache = Some(cache);
        }
        self
    }

    /// The cache in use, if caching is enabled.
    pub fn cache(&self) -> Option<&QueryCache> {
        self.cache.as_ref()
    }

    /// Answer one query.
    ///
    /// Queries with no searchable terms fail before the cache or any source
    /// is touched. Results for a normalised query are served from the cache
    /// while fresh; identical concurrent queries share one aggregation.
    ///
    /// # Errors
    ///
    /// - [`QueryError::EmptyQuery`] if the query has no searchable terms.
    /// - [`QueryError::AllSourcesFailed`] if every selected source failed
    ///   and nothing was extracted. Failures are never cached.
    pub async fn handle_query(&self, raw: &str) -> Result<QueryResult> {
        let started = Instant::now();
        tracing::trace!(query = raw, "handling query");

        let query = Query::parse(raw, &self.lexicon)?;
        let sources = self
            .catalog
            .select_sources(query.intents(), self.config.max_sources_per_query);

        let mut result = match &self.cache {
            Some(cache) => {
                let (value, from_cache) = cache
                    .get_or_try_insert_with(query.cache_key(), self.aggregate(&query, &sources))
                    .await?;
                if from_cache {
                    tracing::debug!("cache hit");
                }
                QueryResult {
                    from_cache,
                    ..value
                }
            }
            None => self.aggregate(&query, &sources).await?,
        };

        result.query = raw.to_owned();
        result.duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            results = result.results.len(),
            total_found = result.total_found,
            sources_used = result.sources_used.len(),
            failures = result.failures.len(),
            from_cache = result.from_cache,
            duration_ms = result.duration_ms,
            "query answered"
        );
        Ok(result)
    }

    /// Fetch, extract, rank and de-duplicate without touching the cache.
    async fn aggregate(&self, query: &Query, sources: &[SourceSpec]) -> Result<QueryResult> {
        if sources.is_empty() {
            return Err(QueryError::AllSourcesFailed(
                "no sources are configured for this query".into(),
            ));
        }

        let timeouts = FetchTimeouts {
            per_source: self.config.source_timeout(),
            request: self.config.request_timeout(),
        };
        let outcomes = fetch_all(&self.fetcher, sources, query, timeouts).await;
        let retrieved_at = Utc::now();

        let mut extracted = Vec::new();
        let mut result_counts = BTreeMap::new();
        let mut failures = Vec::new();
        let mut fetch_failures = 0usize;

        for outcome in outcomes {
            let id = outcome.source.id;
            let page = match outcome.result {
                Ok(page) => page,
                Err(err) => {
                    fetch_failures += 1;
                    failures.push(failure(id, &err));
                    continue;
                }
            };
            match extract(
                &outcome.source,
                &page,
                self.config.max_results_per_source,
                retrieved_at,
            ) {
                Ok(items) => {
                    if !items.is_empty() {
                        result_counts.insert(id, items.len());
                    }
                    extracted.extend(items);
                }
                Err(err) => {
                    tracing::warn!(source = %id, error = %err, "extraction failed");
                    failures.push(failure(id, &err));
                }
            }
        }

        if fetch_failures == sources.len() && extracted.is_empty() {
            let detail = failures
                .iter()
                .map(|f| format!("{}: {}", f.source, f.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(QueryError::AllSourcesFailed(detail));
        }

        let ranked = rank(
            extracted,
            query.tokens(),
            sources,
            &self.config.ranking,
            Utc::now(),
        );
        let mut results = deduplicate(ranked, sources);
        let total_found = results.len();
        results.truncate(self.config.max_results);

        let sources_used = sources
            .iter()
            .map(|s| s.id)
            .filter(|id| result_counts.contains_key(id))
            .collect();

        tracing::debug!(
            extracted = result_counts.values().sum::<usize>(),
            unique = total_found,
            returned = results.len(),
            "aggregation complete"
        );

        Ok(QueryResult {
            query: query.raw().to_owned(),
            tokens: query.tokens().to_vec(),
            intents: query.intents().iter().copied().collect(),
            results,
            total_found,
            sources_queried: sources.iter().map(|s| s.id).collect(),
            sources_used,
            result_counts,
            failures,
            duration_ms: 0,
            from_cache: false,
        })
    }
}

fn failure(source: SourceId, err: &QueryError) -> SourceFailure {
    SourceFailure {
        source,
        kind: err.kind(),
        message: err.to_string(),
    }
}
