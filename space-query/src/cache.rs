//! In-memory cache of aggregated query results.
//!
//! Keyed by the normalised query ([`crate::query::Query::cache_key`]) so
//! spellings that normalise identically share an entry. Uses [`moka`] for
//! async-friendly caching with TTL expiry and per-key coalescing of
//! concurrent initialisations. The size bound is oldest-first: when full,
//! the entry written longest ago is dropped, however often it is read.
//!
//! A [`QueryCache`] is a cheap handle: clones share the same storage, so
//! the embedding application creates one and injects it into every engine
//! that should share it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;

use crate::config::EngineConfig;
use crate::error::QueryError;
use crate::types::QueryResult;

/// Shared, thread-safe cache of [`QueryResult`]s.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<String, QueryResult>,
    /// Keys in write order, oldest first. Never longer than `max_entries`.
    written: Arc<Mutex<VecDeque<String>>>,
    max_entries: usize,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.inner.entry_count())
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

impl QueryCache {
    /// Create a cache holding at most `max_entries` results for `ttl` each.
    ///
    /// Reads never extend an entry's life: neither its TTL nor its place
    /// in the eviction order.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner = Cache::builder().time_to_live(ttl).build();
        Self {
            inner,
            written: Arc::new(Mutex::new(VecDeque::new())),
            max_entries: usize::try_from(max_entries).unwrap_or(usize::MAX).max(1),
        }
    }

    /// Create a cache sized and timed from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl_seconds),
        )
    }

    /// Look up a cached result. Expired entries are misses.
    pub async fn get(&self, key: &str) -> Option<QueryResult> {
        self.inner.get(key).await
    }

    /// Store a result, replacing any previous entry for `key`.
    pub async fn put(&self, key: impl Into<String>, value: QueryResult) {
        let key = key.into();
        self.inner.insert(key.clone(), value).await;
        self.record_write(key).await;
    }

    /// Return the cached result for `key`, or run `init` and cache its
    /// output.
    ///
    /// Concurrent calls for the same key run `init` once; the others wait
    /// and receive the same value. Errors are returned to every waiter and
    /// never cached. The flag is `true` when the value came from the cache
    /// or from another caller's initialisation.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `init`.
    pub async fn get_or_try_insert_with<F>(
        &self,
        key: impl Into<String>,
        init: F,
    ) -> Result<(QueryResult, bool), QueryError>
    where
        F: std::future::Future<Output = Result<QueryResult, QueryError>>,
    {
        let entry = self
            .inner
            .entry(key.into())
            .or_try_insert_with(init)
            .await
            .map_err(|e: Arc<QueryError>| (*e).clone())?;
        let shared = !entry.is_fresh();
        if !shared {
            self.record_write(entry.key().clone()).await;
        }
        Ok((entry.into_value(), shared))
    }

    /// Note a write of `key` and drop the oldest entries beyond the bound.
    async fn record_write(&self, key: String) {
        let evicted: Vec<String> = {
            let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
            written.retain(|k| *k != key);
            written.push_back(key);
            let excess = written.len().saturating_sub(self.max_entries);
            written.drain(..excess).collect()
        };
        for key in evicted {
            tracing::trace!("evicting oldest cache entry");
            self.inner.invalidate(&key).await;
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.inner.invalidate_all();
    }

    /// Approximate number of live entries.
    ///
    /// moka applies writes lazily; call [`QueryCache::sync`] first for an
    /// exact figure in tests.
    pub fn len(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending maintenance (evictions, expirations, counters).
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}
