use std::path::Path;

use chanmap_model::DictionaryEntry;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::read_table;

/// Reads a code dictionary: shorthand in the first column, longhand in the
/// second, one header row. Extra columns are ignored.
///
/// Rows missing either side are dropped.
pub fn read_dictionary(path: &Path) -> Result<Vec<DictionaryEntry>> {
    let table = read_table(path, 1)?;
    if table.headers.len() < 2 {
        warn!(
            path = %path.display(),
            columns = table.headers.len(),
            "dictionary header has fewer than two columns"
        );
    }

    let total = table.len();
    let entries: Vec<DictionaryEntry> = (0..total)
        .map(|row| DictionaryEntry::new(table.cell(row, 0), table.cell(row, 1)))
        .filter(DictionaryEntry::is_complete)
        .collect();
    debug!(
        path = %path.display(),
        entries = entries.len(),
        dropped = total - entries.len(),
        "dictionary read"
    );
    if entries.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(entries)
}
