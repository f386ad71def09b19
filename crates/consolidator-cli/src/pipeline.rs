//! One consolidation run, from input directory to written CSV.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::json;

use consolidator_core::{
    ConsolidateOptions, DecisionPolicy, EventSink, consolidate, output_name,
};
use consolidator_ingest::list_csv_files;
use consolidator_model::Summary;
use consolidator_output::{CsvWriteOptions, write_consolidated_csv};

/// Everything a run needs besides the decision policy and event sink.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit output file name; derived from the date range when `None`.
    pub output_name: Option<String>,
    pub consolidate: ConsolidateOptions,
    pub write: CsvWriteOptions,
    /// Consolidate and report without writing the CSV.
    pub dry_run: bool,
    /// Where to write a JSON run report, if anywhere.
    pub summary_json: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            output_name: None,
            consolidate: ConsolidateOptions::default(),
            write: CsvWriteOptions::default(),
            dry_run: false,
            summary_json: None,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: Summary,
    pub output_path: PathBuf,
    /// False for dry runs.
    pub written: bool,
}

/// Consolidates every CSV in `config.input_dir` into one file in
/// `config.output_dir`.
///
/// Both directories are created when missing.
///
/// # Errors
///
/// Fails when the input directory holds no CSV files, when no file could be
/// consolidated, or when the output cannot be written.
pub fn run(
    config: &RunConfig,
    policy: &mut dyn DecisionPolicy,
    sink: &mut dyn EventSink,
) -> Result<RunOutcome> {
    ensure_dir(&config.input_dir)?;
    ensure_dir(&config.output_dir)?;

    let paths = list_csv_files(&config.input_dir)
        .with_context(|| format!("listing {}", config.input_dir.display()))?;
    if paths.is_empty() {
        bail!("no CSV files found in {}", config.input_dir.display());
    }
    tracing::info!(
        files = paths.len(),
        input_dir = %config.input_dir.display(),
        "found CSV files"
    );

    let consolidation = consolidate(&paths, &config.consolidate, policy, sink)?;
    let name = output_name(
        &consolidation.summary.date_range,
        config.output_name.as_deref(),
    )?;
    let output_path = config.output_dir.join(name);

    let written = if config.dry_run {
        tracing::info!(path = %output_path.display(), "dry run, output not written");
        false
    } else {
        write_consolidated_csv(&consolidation.table, &output_path, &config.write)
            .with_context(|| format!("writing {}", output_path.display()))?;
        true
    };

    let outcome = RunOutcome {
        summary: consolidation.summary,
        output_path,
        written,
    };
    if let Some(path) = &config.summary_json {
        write_summary_json(&outcome, path)?;
    }
    Ok(outcome)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))
}

/// Writes the run report as pretty-printed JSON.
pub fn write_summary_json(outcome: &RunOutcome, path: &Path) -> Result<()> {
    let summary = serde_json::to_value(&outcome.summary).context("serializing run summary")?;
    let report = json!({
        "output": outcome.output_path.display().to_string(),
        "written": outcome.written,
        "summary": summary,
    });
    let text = serde_json::to_string_pretty(&report).context("serializing run summary")?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
