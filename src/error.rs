use std::io;

use thiserror::Error;

/// Failures that abort a run. Per-field problems never surface here; they
/// degrade to empty or absent values inside the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch {url} after {attempts} attempts: {reason}")]
    Retrieval {
        url: String,
        attempts: u32,
        reason: String,
    },
    #[error("unexpected payload from {source_name}: {details}")]
    Payload { source_name: String, details: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
