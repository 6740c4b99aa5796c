use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not create temporary directory: {0}")]
    TempDir(std::io::Error),
    #[error("git is not installed or not found in PATH.")]
    GitNotFound,
    #[error("Failed to clone repository {url}: {message}")]
    CloneFailed { url: String, message: String },
    #[error("Clone of {url} timed out after {timeout_secs} seconds.")]
    CloneTimeout { url: String, timeout_secs: u64 },
}
impl GatherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GatherError::Io {
            path: path.into(),
            source,
        }
    }
}
