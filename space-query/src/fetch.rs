//! Concurrent fan-out of source retrievals with per-source deadlines.
//!
//! [`SourceFetcher`] is the network seam: the production implementation is
//! [`crate::http::HttpFetcher`], tests plug in in-process fetchers.
//! [`fetch_all`] runs one retrieval per selected source concurrently and
//! waits for every one to finish or hit its deadline. A failing source never
//! affects the others; its error is returned in its own [`FetchOutcome`].

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::error::QueryError;
use crate::query::Query;
use crate::sources::SourceSpec;

/// A successfully retrieved source page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    /// Raw response body.
    pub body: Bytes,
}

impl FetchedPage {
    /// Create a page from a URL and body.
    pub fn new(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// A pluggable source retrieval backend.
///
/// Implementors perform exactly one attempt per call; there are no retries.
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait SourceFetcher: Send + Sync {
    /// Retrieve the page `source` serves for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::SourceFetchFailed`] or
    /// [`QueryError::SourceTimeout`] if the page cannot be retrieved.
    fn fetch(
        &self,
        source: &SourceSpec,
        query: &Query,
    ) -> impl std::future::Future<Output = Result<FetchedPage, QueryError>> + Send;
}

/// Deadlines applied to one fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    /// Maximum time any single source may take.
    pub per_source: Duration,
    /// Maximum time the whole fan-out may take.
    pub request: Duration,
}

/// Result of retrieving one source.
#[derive(Debug)]
pub struct FetchOutcome {
    pub source: SourceSpec,
    pub result: Result<FetchedPage, QueryError>,
    /// Time from fan-out until this source finished or was abandoned.
    pub elapsed: Duration,
}

/// Fetch every source concurrently.
///
/// Each retrieval gets the deadline `min(per_source, request)` measured from
/// the start of the fan-out, so total wall time is bounded by the slowest
/// deadline rather than the sum. Retrievals still pending at their deadline
/// are dropped and reported as [`QueryError::SourceTimeout`]. Outcomes are
/// returned in the order of `sources`, independent of completion order.
pub async fn fetch_all<F: SourceFetcher>(
    fetcher: &F,
    sources: &[SourceSpec],
    query: &Query,
    timeouts: FetchTimeouts,
) -> Vec<FetchOutcome> {
    let started = Instant::now();
    let limit = timeouts.per_source.min(timeouts.request);
    let deadline = started + limit;
    let abandoned_by_request = timeouts.request <= timeouts.per_source;

    let futures: Vec<_> = sources
        .iter()
        .map(|source| async move {
            let result = match tokio::time::timeout_at(deadline, fetcher.fetch(source, query)).await
            {
                Ok(result) => result,
                Err(_) if abandoned_by_request => Err(QueryError::SourceTimeout(format!(
                    "{} still pending when the {}s request deadline elapsed",
                    source.id,
                    limit.as_secs_f64()
                ))),
                Err(_) => Err(QueryError::SourceTimeout(format!(
                    "{} did not respond within {}s",
                    source.id,
                    limit.as_secs_f64()
                ))),
            };
            FetchOutcome {
                source: source.clone(),
                result,
                elapsed: started.elapsed(),
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(page) => tracing::debug!(
                source = %outcome.source.id,
                bytes = page.body.len(),
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "source fetched"
            ),
            Err(err) => tracing::warn!(
                source = %outcome.source.id,
                error = %err,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "source fetch failed"
            ),
        }
    }

    outcomes
}
