//! CLI argument definitions for `chanmap`.

use std::path::PathBuf;

use chanmap_map::SimilarityMetric;
use chanmap_model::parse_confidence;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "chanmap",
    version,
    about = "Map data logger channels to simulator channels",
    long_about = "Propose a confidence-scored mapping from data logger channel names to\n\
                  vehicle-dynamics simulator channel names, then export the matched\n\
                  simulator columns under a two-row header."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./chanmap.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Propose matches between logger and simulator channels.
    Match(MatchArgs),

    /// Export simulator data for high-confidence matches.
    Export(ExportArgs),

    /// List the pattern rule library.
    Rules,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Dictionary CSV: shorthand code, longhand description.
    #[arg(long = "dictionary", value_name = "CSV")]
    pub dictionary: PathBuf,

    /// Logger export whose channel names are the match sources.
    #[arg(long = "source", value_name = "CSV")]
    pub source: PathBuf,

    /// Simulator export whose channel names are the match targets.
    #[arg(long = "target", value_name = "CSV")]
    pub target: PathBuf,

    /// Match table to write.
    #[arg(long = "output", value_name = "CSV", default_value = "matched_variables.csv")]
    pub output: PathBuf,

    /// Also write the matches as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Skip the dictionary and semantic passes.
    #[arg(long = "no-fallback")]
    pub no_fallback: bool,

    /// Similarity metric for the dictionary and semantic passes.
    #[arg(long = "metric", value_enum)]
    pub metric: Option<MetricArg>,

    /// 1-based row holding the logger channel names.
    #[arg(long = "source-header-row", value_name = "ROW")]
    pub source_header_row: Option<usize>,

    /// 1-based row holding the simulator channel names.
    #[arg(long = "target-header-row", value_name = "ROW")]
    pub target_header_row: Option<usize>,

    /// Number of matches listed in the summary.
    #[arg(long = "top", value_name = "N", default_value_t = 20)]
    pub top: usize,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Match table written by `chanmap match`.
    #[arg(long = "matches", value_name = "CSV")]
    pub matches: PathBuf,

    /// Logger export the matches were built from.
    #[arg(long = "source", value_name = "CSV")]
    pub source: PathBuf,

    /// Simulator export to pull data columns from.
    #[arg(long = "target", value_name = "CSV")]
    pub target: PathBuf,

    /// Aligned export to write; skipped matches go to `<stem>_skipped.csv`.
    #[arg(long = "output", value_name = "CSV", default_value = "high_confidence_data_export.csv")]
    pub output: PathBuf,

    /// Minimum confidence for a match to be exported.
    #[arg(long = "threshold", value_name = "CONF", value_parser = parse_threshold)]
    pub threshold: Option<f32>,

    /// 1-based row holding the logger channel names.
    #[arg(long = "source-header-row", value_name = "ROW")]
    pub source_header_row: Option<usize>,

    /// 1-based row holding the simulator channel names.
    #[arg(long = "target-header-row", value_name = "ROW")]
    pub target_header_row: Option<usize>,
}

fn parse_threshold(text: &str) -> Result<f32, String> {
    parse_confidence(text).map_err(|err| err.to_string())
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    TokenSet,
    Sequence,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::TokenSet => SimilarityMetric::TokenSet,
            MetricArg::Sequence => SimilarityMetric::Sequence,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
