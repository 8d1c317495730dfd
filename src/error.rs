//! Error types for component documentation extraction.

use std::path::PathBuf;
use thiserror::Error;

pub type DocgenResult<T> = Result<T, DocgenError>;

#[derive(Debug, Error)]
pub enum DocgenError {
    /// Neither representation yielded a properties or behavior source.
    #[error("no component source found in {0}")]
    MissingSource(PathBuf),

    #[error("malformed artifact {path}: {message}")]
    MalformedArtifact { path: PathBuf, message: String },

    #[error("ancestor cycle detected: {}", .chain.join(" -> "))]
    CycleDetected { chain: Vec<String> },

    /// The only fatal condition of a batch run.
    #[error("root source directory {path} is unreadable: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocgenError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DocgenError::MalformedArtifact {
            path: path.into(),
            message: message.into(),
        }
    }
}
