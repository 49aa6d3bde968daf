//! Input loading for channel matching.
//!
//! - **Header rows**: channel names at an explicit 1-based row
//! - **Data tables**: a header plus the rows below it, for export
//! - **Dictionaries**: shorthand/longhand pairs from a two-column table

mod dictionary;
mod error;
mod table;

pub use dictionary::read_dictionary;
pub use error::{IngestError, Result};
pub use table::{
    DEFAULT_SOURCE_HEADER_ROW, DEFAULT_TARGET_HEADER_ROW, DataTable, read_header_row, read_table,
};
