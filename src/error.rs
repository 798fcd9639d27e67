//! Error types for the cosmic-explorer application.

use space_query::{ErrorKind, QueryError};

/// Top-level error type for the command-line application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The query engine rejected the query or configuration.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration file could not be parsed, serialized or validated.
    #[error("config error: {0}")]
    Config(String),

    /// Result serialization error.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// `2` for a query with nothing searchable in it, `3` when no source
    /// could be reached, `1` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Query(err) => match err.kind() {
                ErrorKind::EmptyQuery => 2,
                ErrorKind::AllSourcesFailed => 3,
                _ => 1,
            },
            _ => 1,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
