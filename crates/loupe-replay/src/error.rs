use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
    #[error("malformed script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid script: event {index}: {reason}")]
    InvalidEvent { index: usize, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
