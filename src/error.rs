//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("malformed link list at page {page}, token {position}: {message}")]
    Parse {
        /// 1-based page being described when parsing failed
        page: usize,
        /// 1-based index of the offending whitespace-delimited token
        position: usize,
        message: String,
    },

    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("{op}: dimension mismatch (expected {expected}, got {actual})")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("input error: {0}")]
    Input(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;

// `?` on a bare io::Error, when no path is in scope
impl From<std::io::Error> for RankError {
    fn from(source: std::io::Error) -> Self {
        RankError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl RankError {
    /// Attach a path to an I/O failure
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        RankError::Io {
            source,
            path: path.into(),
        }
    }
}
