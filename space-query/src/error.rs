//! Error types for the space-query crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Per-source failures are recorded in the
//! query result rather than returned; only [`QueryError::EmptyQuery`],
//! [`QueryError::AllSourcesFailed`] and [`QueryError::InvalidConfiguration`]
//! ever reach the caller of [`crate::QueryEngine::handle_query`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while answering a query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// The query had no usable tokens after normalisation.
    #[error("query contains no searchable terms")]
    EmptyQuery,

    /// A source did not respond before its deadline.
    #[error("source timed out: {0}")]
    SourceTimeout(String),

    /// A source request failed (connection, HTTP status, bot wall).
    #[error("source fetch failed: {0}")]
    SourceFetchFailed(String),

    /// A source responded but its content could not be extracted.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    /// Every selected source failed and nothing was extracted.
    #[error("all sources failed: {0}")]
    AllSourcesFailed(String),

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl QueryError {
    /// Returns the payload-free discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyQuery => ErrorKind::EmptyQuery,
            Self::SourceTimeout(_) => ErrorKind::SourceTimeout,
            Self::SourceFetchFailed(_) => ErrorKind::SourceFetchFailed,
            Self::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            Self::AllSourcesFailed(_) => ErrorKind::AllSourcesFailed,
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
        }
    }
}

/// Error category, recorded in per-source failure metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyQuery,
    SourceTimeout,
    SourceFetchFailed,
    ExtractionFailed,
    AllSourcesFailed,
    InvalidConfiguration,
}

impl ErrorKind {
    /// HTTP status a request layer should answer with for this error.
    ///
    /// `EmptyQuery` is a client error, `AllSourcesFailed` means the
    /// upstream sources are unavailable, anything else is an internal fault.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmptyQuery => 400,
            Self::AllSourcesFailed => 503,
            _ => 500,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::SourceTimeout => "source_timeout",
            Self::SourceFetchFailed => "source_fetch_failed",
            Self::ExtractionFailed => "extraction_failed",
            Self::AllSourcesFailed => "all_sources_failed",
            Self::InvalidConfiguration => "invalid_configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenience type alias for space-query results.
pub type Result<T> = std::result::Result<T, QueryError>;
