//! Aligned data export: audit comments, two header rows, then target data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chanmap_ingest::DataTable;
use chanmap_model::Resolution;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::render_audit_lines;
use crate::error::{ReportError, Result};
use crate::table::format_confidence;

/// Leads the aligned export so spreadsheet tools read it as UTF-8.
pub const UTF8_BOM: &str = "\u{feff}";

/// What [`export_aligned`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub kept: usize,
    pub skipped: usize,
    pub columns_written: usize,
    pub data_rows: usize,
    /// Kept targets with no column in the target data.
    pub missing_targets: Vec<String>,
    /// Side file listing skipped matches, when any were skipped.
    pub skipped_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct SkippedRecord<'a> {
    #[serde(rename = "Source_Variable")]
    source: &'a str,
    #[serde(rename = "Target_Variable")]
    target: &'a str,
    #[serde(rename = "Confidence")]
    confidence: String,
    #[serde(rename = "Reason")]
    reason: &'static str,
}

/// `out.csv` becomes `out_skipped.csv` in the same directory.
pub fn skipped_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{stem}_skipped.{}", ext.to_string_lossy()),
        None => format!("{stem}_skipped"),
    };
    output.with_file_name(name)
}

/// Writes the kept matches' target columns under a two-row header.
///
/// The file starts with a UTF-8 byte-order mark. Row one holds source names and row two the matching target names; data
/// rows follow, one per target data row. Kept matches whose target column is
/// absent from `target` are left out and reported in the summary.
pub fn export_aligned(
    output: &Path,
    resolution: &Resolution,
    source_rows: usize,
    target: &DataTable,
) -> Result<ExportSummary> {
    let mut source_header = Vec::new();
    let mut target_header = Vec::new();
    let mut columns = Vec::new();
    let mut missing_targets = Vec::new();
    for m in &resolution.kept {
        match target.column_index(&m.target_name) {
            Some(index) => {
                source_header.push(m.source_name.as_str());
                target_header.push(m.target_name.as_str());
                columns.push(index);
            }
            None => missing_targets.push(m.target_name.clone()),
        }
    }
    if !missing_targets.is_empty() {
        warn!(
            missing = missing_targets.len(),
            targets = ?missing_targets,
            "matched target channels not found in target data"
        );
    }

    let file = File::create(output).map_err(|err| ReportError::write(output, err))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM.as_bytes())
        .map_err(|err| ReportError::write(output, err))?;
    for line in render_audit_lines(resolution, source_rows, target.len()) {
        writeln!(out, "{line}").map_err(|err| ReportError::write(output, err))?;
    }
    {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut out);
        writer
            .write_record(&source_header)
            .map_err(|err| ReportError::csv(output, err))?;
        writer
            .write_record(&target_header)
            .map_err(|err| ReportError::csv(output, err))?;
        for row in 0..target.len() {
            writer
                .write_record(columns.iter().map(|&column| target.cell(row, column)))
                .map_err(|err| ReportError::csv(output, err))?;
        }
        writer
            .flush()
            .map_err(|err| ReportError::write(output, err))?;
    }
    out.flush().map_err(|err| ReportError::write(output, err))?;
    info!(
        path = %output.display(),
        columns = columns.len(),
        rows = target.len(),
        "aligned export written"
    );

    let skipped_path = if resolution.skipped.is_empty() {
        None
    } else {
        let path = skipped_path(output);
        write_skipped(&path, resolution)?;
        Some(path)
    };

    Ok(ExportSummary {
        kept: resolution.kept.len(),
        skipped: resolution.skipped.len(),
        columns_written: columns.len(),
        data_rows: target.len(),
        missing_targets,
        skipped_path,
    })
}

fn write_skipped(path: &Path, resolution: &Resolution) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| ReportError::csv(path, err))?;
    for skipped in &resolution.skipped {
        writer
            .serialize(SkippedRecord {
                source: &skipped.matched.source_name,
                target: &skipped.matched.target_name,
                confidence: format_confidence(skipped.matched.confidence),
                reason: skipped.reason.description(),
            })
            .map_err(|err| ReportError::csv(path, err))?;
    }
    writer.flush().map_err(|err| ReportError::write(path, err))?;
    info!(path = %path.display(), skipped = resolution.skipped.len(), "skipped matches written");
    Ok(())
}
