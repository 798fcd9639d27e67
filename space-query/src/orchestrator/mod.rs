//! Query orchestration: fan-out, ranking, de-duplication.
//!
//! [`QueryEngine`] composes the query parser, source selection, the
//! concurrent fetcher, per-source extraction and the cache into a single
//! `handle_query` call. Ranking and de-duplication are plain functions over
//! result lists so they can be tested in isolation.

pub mod dedup;
pub mod pipeline;
pub mod ranking;
pub mod url_normalize;

pub use pipeline::QueryEngine;
