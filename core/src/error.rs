use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The corpus store could not be opened or parsed as a whole. The engine cannot start.
    #[error("corpus store unavailable at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single store entry lacks a required field. Loading skips it and carries on.
    #[error("malformed record {filename:?}: {reason}")]
    MalformedRecord { filename: String, reason: String },

    #[error("unknown search method {0:?} (expected \"vsm\" or \"bm25\")")]
    UnknownMethod(String),
}

impl EngineError {
    pub fn store_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::StoreUnavailable { path: path.into(), source }
    }

    pub fn malformed(filename: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::MalformedRecord { filename: filename.into(), reason: reason.to_string() }
    }
}
