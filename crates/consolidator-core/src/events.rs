//! Structured events emitted during a consolidation run.
//!
//! The consolidator never formats or prints anything itself. It reports
//! what happened to an [`EventSink`]; [`TracingSink`] forwards events to
//! `tracing`, and a `Vec<ConsolidationEvent>` collects them for inspection.

use std::path::PathBuf;

use consolidator_model::{MismatchReport, ReconciliationDecision, Summary};

/// Something noteworthy that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationEvent {
    /// A file was parsed and will contribute rows.
    FileLoaded {
        path: PathBuf,
        header_line: usize,
        rows: usize,
    },
    /// A file was skipped entirely.
    FileSkipped { path: PathBuf, reason: String },
    /// A row was skipped; `line` is 1-based.
    RowSkipped {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    /// Input files disagree on their columns.
    HeaderMismatch { report: MismatchReport },
    /// The output columns were fixed.
    ColumnsResolved {
        decision: Option<ReconciliationDecision>,
        columns: Vec<String>,
    },
    /// The run finished successfully.
    RunCompleted { summary: Summary },
}

/// Receives events from the consolidator.
pub trait EventSink {
    fn emit(&mut self, event: ConsolidationEvent);
}

impl EventSink for Vec<ConsolidationEvent> {
    fn emit(&mut self, event: ConsolidationEvent) {
        self.push(event);
    }
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: ConsolidationEvent) {
        match event {
            ConsolidationEvent::FileLoaded {
                path,
                header_line,
                rows,
            } => {
                tracing::info!(path = %path.display(), header_line, rows, "file loaded");
            }
            ConsolidationEvent::FileSkipped { path, reason } => {
                tracing::warn!(path = %path.display(), %reason, "file skipped");
            }
            ConsolidationEvent::RowSkipped { path, line, reason } => {
                tracing::warn!(path = %path.display(), line, %reason, "row skipped");
            }
            ConsolidationEvent::HeaderMismatch { report } => {
                tracing::warn!(
                    common = report.common.len(),
                    union = report.union.len(),
                    "headers differ across files"
                );
                for file in report.files_with_extra() {
                    tracing::warn!(
                        file = %file.file,
                        extra = ?file.extra,
                        missing = ?file.missing,
                        "additional columns"
                    );
                }
            }
            ConsolidationEvent::ColumnsResolved { decision, columns } => {
                let decision = decision.map_or_else(|| "uniform".to_string(), |d| d.to_string());
                tracing::info!(%decision, columns = columns.len(), "columns resolved");
            }
            ConsolidationEvent::RunCompleted { summary } => {
                tracing::info!(
                    files_attempted = summary.files_attempted,
                    files_succeeded = summary.files_succeeded(),
                    files_skipped = summary.files_skipped(),
                    rows_skipped = summary.rows_skipped(),
                    total_rows = summary.total_rows,
                    total_columns = summary.total_columns,
                    "consolidation complete"
                );
            }
        }
    }
}
