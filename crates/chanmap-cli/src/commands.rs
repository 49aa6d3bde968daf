use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use chanmap_ingest::{read_dictionary, read_header_row, read_table};
use chanmap_map::{Dictionary, MatchEngine, MatchOptions, variables_from_headers};
use chanmap_model::{MatchSet, MatchSummary, Resolution, ResolutionStatus};
use chanmap_report::{
    ExportSummary, export_aligned, read_match_table, write_match_json, write_match_table,
};

use crate::cli::{ExportArgs, MatchArgs};
use crate::config::ChanmapConfig;

/// Everything `chanmap match` produced.
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: MatchSet,
    pub summary: MatchSummary,
    pub options: MatchOptions,
    pub output: PathBuf,
    pub json: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ExportOutcome {
    Exported {
        resolution: Resolution,
        summary: ExportSummary,
        output: PathBuf,
    },
    /// Nothing cleared the threshold; no file was written.
    Empty { threshold: f32, message: String },
}

/// Matching options after applying command line overrides to the config.
pub fn match_options(args: &MatchArgs, config: &ChanmapConfig) -> MatchOptions {
    let mut options = config.matching;
    if args.no_fallback {
        options.generic_fallback = false;
    }
    if let Some(metric) = args.metric {
        options.metric = metric.into();
    }
    options
}

pub fn run_match(args: &MatchArgs, config: &ChanmapConfig) -> Result<MatchOutcome> {
    let source_row = args
        .source_header_row
        .unwrap_or(config.input.source_header_row);
    let target_row = args
        .target_header_row
        .unwrap_or(config.input.target_header_row);
    let options = match_options(args, config);
    let span = info_span!(
        "match",
        source = %args.source.display(),
        target = %args.target.display()
    );
    let _guard = span.enter();

    let entries = read_dictionary(&args.dictionary)
        .with_context(|| format!("load dictionary {}", args.dictionary.display()))?;
    let source_headers = read_header_row(&args.source, source_row)
        .with_context(|| format!("read source channels from {}", args.source.display()))?;
    let target_headers = read_header_row(&args.target, target_row)
        .with_context(|| format!("read target channels from {}", args.target.display()))?;
    let sources = variables_from_headers(&source_headers);
    let targets = variables_from_headers(&target_headers);
    info!(
        dictionary = entries.len(),
        sources = sources.len(),
        targets = targets.len(),
        "inputs loaded"
    );

    let engine = MatchEngine::new(Dictionary::load(entries)).with_options(options);
    let matches = engine.run(&sources, &targets);
    let summary = MatchSummary::from_matches(&matches, sources.len(), targets.len());

    write_match_table(&args.output, matches.as_slice()).context("write match table")?;
    if let Some(path) = &args.json {
        write_match_json(path, matches.as_slice()).context("write match JSON")?;
    }
    Ok(MatchOutcome {
        matches,
        summary,
        options,
        output: args.output.clone(),
        json: args.json.clone(),
    })
}

pub fn run_export(args: &ExportArgs, config: &ChanmapConfig) -> Result<ExportOutcome> {
    let threshold = args.threshold.unwrap_or(config.export.threshold);
    let source_row = args
        .source_header_row
        .unwrap_or(config.input.source_header_row);
    let target_row = args
        .target_header_row
        .unwrap_or(config.input.target_header_row);
    let span = info_span!("export", threshold = %threshold);
    let _guard = span.enter();

    let matches = read_match_table(&args.matches)
        .with_context(|| format!("load matches from {}", args.matches.display()))?;
    let resolution = Resolution::resolve(&matches, threshold);
    if let ResolutionStatus::Empty { message } = resolution.status() {
        warn!(matches = matches.len(), "{message}");
        return Ok(ExportOutcome::Empty { threshold, message });
    }

    let source = read_table(&args.source, source_row)
        .with_context(|| format!("read source data from {}", args.source.display()))?;
    let target = read_table(&args.target, target_row)
        .with_context(|| format!("read target data from {}", args.target.display()))?;
    let summary = export_aligned(&args.output, &resolution, source.len(), &target)
        .context("write aligned export")?;
    Ok(ExportOutcome::Exported {
        resolution,
        summary,
        output: args.output.clone(),
    })
}
