// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("corpus walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("no such node: {0}")]
    MissingNode(String),

    #[error("node is not collapsed: {0}")]
    NotCollapsed(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WikiError>;

impl WikiError {
    /// Attaches the offending path to an I/O error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        WikiError::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to WikiError::Io with unknown path.
impl From<std::io::Error> for WikiError {
    fn from(source: std::io::Error) -> Self {
        WikiError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
