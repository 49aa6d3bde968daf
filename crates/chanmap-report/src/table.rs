//! The match table: one quoted CSV row per proposed match.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chanmap_model::{Match, ModelError, parse_confidence};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, Result};

/// Match table columns in file order.
pub const MATCH_TABLE_COLUMNS: [&str; 6] = [
    "Source_Variable",
    "Target_Variable",
    "Confidence",
    "Match_Type",
    "Description",
    "Notes",
];

#[derive(Debug, Serialize, Deserialize)]
struct MatchRecord {
    #[serde(rename = "Source_Variable")]
    source: String,
    #[serde(rename = "Target_Variable")]
    target: String,
    #[serde(rename = "Confidence")]
    confidence: String,
    #[serde(rename = "Match_Type")]
    match_type: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

impl MatchRecord {
    fn from_match(m: &Match) -> Self {
        Self {
            source: m.source_name.clone(),
            target: m.target_name.clone(),
            confidence: format_confidence(m.confidence),
            match_type: m.match_type.label().to_string(),
            description: m.description.clone(),
            notes: m.note.clone(),
        }
    }

    fn into_match(self) -> std::result::Result<Match, ModelError> {
        let confidence = parse_confidence(&self.confidence)?;
        let match_type = self.match_type.parse()?;
        Ok(Match::new(self.source, self.target, confidence, match_type, self.notes)
            .with_description(self.description))
    }
}

/// `1.0`, `0.95`, `0.667`: shortest form, but never a bare integer.
pub fn format_confidence(confidence: f32) -> String {
    if confidence.fract() == 0.0 {
        format!("{confidence:.1}")
    } else {
        confidence.to_string()
    }
}

/// Matches ordered by descending confidence; ties keep their input order.
pub fn ranked(matches: &[Match]) -> Vec<&Match> {
    let mut ranked: Vec<&Match> = matches.iter().collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}

/// Writes the match table with every field quoted, best matches first.
pub fn write_match_table(path: &Path, matches: &[Match]) -> Result<()> {
    let file = File::create(path).map_err(|err| ReportError::write(path, err))?;
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(BufWriter::new(file));
    if matches.is_empty() {
        writer
            .write_record(MATCH_TABLE_COLUMNS)
            .map_err(|err| ReportError::csv(path, err))?;
    }
    for m in ranked(matches) {
        writer
            .serialize(MatchRecord::from_match(m))
            .map_err(|err| ReportError::csv(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| ReportError::write(path, err))?;
    info!(path = %path.display(), matches = matches.len(), "match table written");
    Ok(())
}

/// Reads a match table written by [`write_match_table`].
///
/// The `Description` and `Notes` columns are optional.
pub fn read_match_table(path: &Path) -> Result<Vec<Match>> {
    let file = File::open(path).map_err(|err| ReportError::read(path, err))?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| ReportError::csv(path, err))?
        .clone();

    let mut matches = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ReportError::csv(path, err))?;
        let line = record.position().map_or(0, csv::Position::line);
        let parsed: MatchRecord = record
            .deserialize(Some(&headers))
            .map_err(|err| ReportError::csv(path, err))?;
        let m = parsed
            .into_match()
            .map_err(|source| ReportError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        matches.push(m);
    }
    info!(path = %path.display(), matches = matches.len(), "match table read");
    Ok(matches)
}

/// Writes the matches as pretty-printed JSON, best matches first.
pub fn write_match_json(path: &Path, matches: &[Match]) -> Result<()> {
    let file = File::create(path).map_err(|err| ReportError::write(path, err))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &ranked(matches)).map_err(|source| {
        ReportError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    out.flush().map_err(|err| ReportError::write(path, err))?;
    info!(path = %path.display(), matches = matches.len(), "match JSON written");
    Ok(())
}
