//! `chanmap`: logger-to-simulator channel matching.

use std::io::{self, IsTerminal};

use anyhow::Result;
use chanmap_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use chanmap_cli::commands::{run_export, run_match};
use chanmap_cli::config::ChanmapConfig;
use chanmap_cli::logging::{LogConfig, LogFormat, init_logging};
use chanmap_map::RuleLibrary;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_export_summary, print_match_summary, print_rules};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Match(args) => {
            let config = load_config(cli)?;
            let outcome = run_match(args, &config)?;
            print_match_summary(&outcome, args.top);
        }
        Command::Export(args) => {
            let config = load_config(cli)?;
            let outcome = run_export(args, &config)?;
            print_export_summary(&outcome);
        }
        Command::Rules => print_rules(&RuleLibrary::standard()),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ChanmapConfig> {
    let dir = std::env::current_dir()?;
    Ok(ChanmapConfig::load(cli.config.as_deref(), &dir)?)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
