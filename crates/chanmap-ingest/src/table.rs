//! Header rows and data tables with an explicit header position.
//!
//! Rows are counted as CSV records, so blank lines do not count. Logger
//! exports carry a metadata block above the channel names; simulator exports
//! start with them.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Row holding the channel names in logger exports, 1-based.
pub const DEFAULT_SOURCE_HEADER_ROW: usize = 15;
/// Row holding the channel names in simulator exports, 1-based.
pub const DEFAULT_TARGET_HEADER_ROW: usize = 1;

/// Header plus the data rows that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell text, or empty for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

fn clean_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn clean_record(record: &StringRecord) -> Vec<String> {
    record.iter().map(clean_cell).collect()
}

fn open_records(path: &Path) -> Result<csv::StringRecordsIntoIter<BufReader<File>>> {
    let file = File::open(path).map_err(|err| IngestError::open(path, err))?;
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));
    Ok(reader.into_records())
}

/// Reads the header names at `row` (1-based).
///
/// Names are trimmed and stripped of a byte-order mark; empty cells are kept
/// so positions line up with the data columns.
pub fn read_header_row(path: &Path, row: usize) -> Result<Vec<String>> {
    if row == 0 {
        return Err(IngestError::InvalidHeaderRow {
            path: path.to_path_buf(),
        });
    }
    let mut seen = 0usize;
    for record in open_records(path)? {
        let record = record.map_err(|err| IngestError::csv(path, err))?;
        seen += 1;
        if seen == row {
            let headers = clean_record(&record);
            debug!(path = %path.display(), row, columns = headers.len(), "header row read");
            return Ok(headers);
        }
    }
    if seen == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Err(IngestError::MissingHeaderRow {
        path: path.to_path_buf(),
        row,
        records: seen,
    })
}

/// Reads the header at `header_row` (1-based) and every non-blank row after it.
pub fn read_table(path: &Path, header_row: usize) -> Result<DataTable> {
    if header_row == 0 {
        return Err(IngestError::InvalidHeaderRow {
            path: path.to_path_buf(),
        });
    }
    let mut seen = 0usize;
    let mut headers = None;
    let mut rows = Vec::new();
    for record in open_records(path)? {
        let record = record.map_err(|err| IngestError::csv(path, err))?;
        seen += 1;
        if seen < header_row {
            continue;
        }
        if seen == header_row {
            headers = Some(clean_record(&record));
            continue;
        }
        let cells = clean_record(&record);
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    let Some(headers) = headers else {
        if seen == 0 {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
        return Err(IngestError::MissingHeaderRow {
            path: path.to_path_buf(),
            row: header_row,
            records: seen,
        });
    };
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "table read"
    );
    Ok(DataTable { headers, rows })
}
