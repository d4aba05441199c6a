//! Pipeline error types.
//!
//! Data-quality conditions never reach this type: they become skipped
//! evaluations or diagnostic tags. Only reading or writing records fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Product record error: {0}")]
    Record(#[from] serde_json::Error),

    #[error("Invalid classifier configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Stats(#[from] countries_stats::StatsError),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
