//! CSV consolidator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use consolidator_cli::logging::{LogConfig, LogFormat, init_logging};
use consolidator_cli::pipeline::{RunConfig, run};
use consolidator_cli::prompt::PromptPolicy;
use consolidator_core::{ConsolidateOptions, DecisionPolicy, FixedDecision, TracingSink};
use consolidator_output::CsvWriteOptions;

mod cli;
mod summary;

use crate::cli::{Cli, ColumnsArg, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config = run_config_from_cli(&cli);
    let mut policy = decision_policy(cli.columns);
    let exit_code = match run(&config, policy.as_mut(), &mut TracingSink) {
        Ok(outcome) => {
            print_summary(&outcome);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_config_from_cli(cli: &Cli) -> RunConfig {
    let mut write = CsvWriteOptions::default();
    if let Some(marker) = &cli.absent_marker {
        write = write.with_absent_marker(marker.clone());
    }
    RunConfig {
        output_name: cli.output_name.clone(),
        consolidate: ConsolidateOptions::new().with_signature(cli.header.clone()),
        write,
        dry_run: cli.dry_run,
        summary_json: cli.summary_json.clone(),
        ..RunConfig::new(&cli.input_dir, &cli.output_dir)
    }
}

fn decision_policy(columns: ColumnsArg) -> Box<dyn DecisionPolicy> {
    match columns {
        ColumnsArg::Common => Box::new(FixedDecision::common()),
        ColumnsArg::Union => Box::new(FixedDecision::union()),
        ColumnsArg::Ask if io::stdin().is_terminal() => Box::new(PromptPolicy::stdio()),
        ColumnsArg::Ask => {
            tracing::warn!("stdin is not a terminal, keeping common columns if headers differ");
            Box::new(FixedDecision::common())
        }
    }
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
