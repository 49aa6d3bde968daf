//! Error types for schema and dictionary ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be opened or read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no records at all.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row lies beyond the end of the file.
    #[error("header row {row} not found in {path} (file has {records} rows)")]
    MissingHeaderRow {
        path: PathBuf,
        row: usize,
        records: usize,
    },

    /// Header rows are numbered from 1.
    #[error("invalid header row 0 for {path}: rows are numbered from 1")]
    InvalidHeaderRow { path: PathBuf },
}

impl IngestError {
    pub(crate) fn open(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub(crate) fn csv(path: &Path, err: csv::Error) -> Self {
        Self::CsvParse {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished() {
        let err = IngestError::open(
            Path::new("/data/motec.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.to_string(), "CSV file not found: /data/motec.csv");

        let err = IngestError::open(
            Path::new("/data/motec.csv"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
    }

    #[test]
    fn missing_header_row_reports_sizes() {
        let err = IngestError::MissingHeaderRow {
            path: PathBuf::from("carsim.csv"),
            row: 15,
            records: 3,
        };
        assert_eq!(
            err.to_string(),
            "header row 15 not found in carsim.csv (file has 3 rows)"
        );
    }
}
