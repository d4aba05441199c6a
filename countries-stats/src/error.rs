//! Loader error types.
//!
//! Lookups never fail: a missing year or country is `None`. Only reading
//! external documents can produce a `StatsError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid year key: {0}")]
    InvalidYear(String),
}

/// Result type alias for loader operations.
pub type StatsResult<T> = Result<T, StatsError>;
