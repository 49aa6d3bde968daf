//! Output side of channel matching.
//!
//! - **Match table**: quoted CSV of every proposal, best first, and its reader
//! - **JSON**: the same matches for tooling that prefers structured input
//! - **Aligned export**: audit comments, source and target header rows, then
//!   the target data for each kept match

mod audit;
mod error;
mod export;
mod table;

pub use audit::render_audit_lines;
pub use error::{ReportError, Result};
pub use export::{ExportSummary, UTF8_BOM, export_aligned, skipped_path};
pub use table::{
    MATCH_TABLE_COLUMNS, format_confidence, ranked, read_match_table, write_match_json,
    write_match_table,
};
