//! CLI argument definitions for the CSV consolidator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use consolidator_ingest::HeaderSignature;

#[derive(Parser)]
#[command(
    name = "csv-consolidator",
    version,
    about = "Merge a directory of CSV exports into one CSV file",
    long_about = "Merge a directory of CSV exports into one CSV file.\n\n\
                  Each file may start with a free-form metadata block; the real header\n\
                  is the first line whose leading columns match --header. The output is\n\
                  named after the date range it covers unless OUTPUT_NAME is given."
)]
pub struct Cli {
    /// Output file name (default: consolidated_<first>_thru_<last>.csv).
    #[arg(value_name = "OUTPUT_NAME")]
    pub output_name: Option<String>,

    /// Directory containing the CSV files to merge.
    #[arg(
        long = "input-dir",
        value_name = "DIR",
        env = "CSV_CONSOLIDATOR_INPUT_DIR",
        default_value = "data/unprocessed"
    )]
    pub input_dir: PathBuf,

    /// Directory the consolidated CSV is written to.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        env = "CSV_CONSOLIDATOR_OUTPUT_DIR",
        default_value = "data/processed"
    )]
    pub output_dir: PathBuf,

    /// Leading columns that identify the header line, comma separated.
    #[arg(
        long = "header",
        value_name = "COLUMNS",
        default_value = "ID,Timestamp,Transaction Type"
    )]
    pub header: HeaderSignature,

    /// Which columns to keep when files disagree on their headers.
    #[arg(long = "columns", value_enum, default_value = "ask")]
    pub columns: ColumnsArg,

    /// Text written for cells a file never had (default: empty).
    #[arg(long = "absent-marker", value_name = "TEXT")]
    pub absent_marker: Option<String>,

    /// Write a JSON run report to this path.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Consolidate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Column choice when headers differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColumnsArg {
    /// Prompt on the terminal; keeps common columns when stdin is not a terminal.
    Ask,
    /// Keep only the columns every file has.
    Common,
    /// Keep every column any file has.
    Union,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["csv-consolidator"]).unwrap();
        assert_eq!(cli.output_name, None);
        assert_eq!(cli.header, HeaderSignature::default());
        assert_eq!(cli.columns, ColumnsArg::Ask);
        assert!(cli.absent_marker.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "csv-consolidator",
            "combined.csv",
            "--input-dir",
            "in",
            "--output-dir",
            "out",
            "--header",
            "Date,Amount",
            "--columns",
            "union",
            "--absent-marker",
            "NaN",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.output_name.as_deref(), Some("combined.csv"));
        assert_eq!(cli.input_dir, PathBuf::from("in"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.header.columns(), ["Date", "Amount"]);
        assert_eq!(cli.columns, ColumnsArg::Union);
        assert_eq!(cli.absent_marker.as_deref(), Some("NaN"));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_blank_header_rejected() {
        assert!(Cli::try_parse_from(["csv-consolidator", "--header", " , "]).is_err());
    }

    #[test]
    fn test_too_many_positionals_rejected() {
        assert!(Cli::try_parse_from(["csv-consolidator", "a.csv", "b.csv"]).is_err());
    }
}
