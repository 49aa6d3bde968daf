//! Error types for report reading and writing.

use std::path::{Path, PathBuf};

use chanmap_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("match table not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A match table row with an unparseable confidence or match type.
    #[error("invalid match record at line {line} of {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: ModelError,
    },
}

impl ReportError {
    pub(crate) fn read(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub(crate) fn write(path: &Path, err: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source: err,
        }
    }

    pub(crate) fn csv(path: &Path, err: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
