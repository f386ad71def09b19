//! Merging many CSV exports into one table.

use std::path::Path;

use consolidator_ingest::{IngestError, read_table};
use consolidator_model::{
    Cell, ConsolidatedTable, LoadedFile, ParsedTable, ReconciliationDecision, SkippedFile,
    SkippedRow, Summary,
};

use crate::dates::extract_range;
use crate::error::{ConsolidateError, Result};
use crate::events::{ConsolidationEvent, EventSink};
use crate::options::ConsolidateOptions;
use crate::policy::DecisionPolicy;
use crate::reconcile::reconcile;

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub table: ConsolidatedTable,
    pub summary: Summary,
}

/// Reads every file in order and merges their rows into one table.
///
/// Files without a recognizable header, or that cannot be read, are skipped
/// and recorded. Rows with the wrong field count are skipped and recorded.
/// When headers differ, `policy` is asked once whether to keep the common or
/// the union column set.
///
/// # Errors
///
/// Returns [`ConsolidateError::NoValidInput`] if no file produced a table.
pub fn consolidate<P>(
    paths: &[P],
    options: &ConsolidateOptions,
    policy: &mut dyn DecisionPolicy,
    sink: &mut dyn EventSink,
) -> Result<Consolidation>
where
    P: AsRef<Path>,
{
    let mut summary = Summary {
        files_attempted: paths.len(),
        ..Summary::default()
    };

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(table) = load_file(path.as_ref(), options, &mut summary, sink) {
            tables.push(table);
        }
    }

    if tables.is_empty() {
        return Err(ConsolidateError::NoValidInput {
            attempted: paths.len(),
        });
    }

    let (table, decision) = merge_tables(tables, policy, sink);
    summary.total_rows = table.row_count();
    summary.total_columns = table.column_count();
    summary.decision = decision;
    summary.date_range = extract_range(&table, &options.dates);

    sink.emit(ConsolidationEvent::RunCompleted {
        summary: summary.clone(),
    });
    Ok(Consolidation { table, summary })
}

fn load_file(
    path: &Path,
    options: &ConsolidateOptions,
    summary: &mut Summary,
    sink: &mut dyn EventSink,
) -> Option<ParsedTable> {
    let read = match read_table(path, &options.signature) {
        Ok(read) => read,
        Err(err) => {
            let reason = err.to_string();
            summary.skipped_files.push(SkippedFile {
                path: path.to_path_buf(),
                reason: reason.clone(),
            });
            sink.emit(ConsolidationEvent::FileSkipped {
                path: path.to_path_buf(),
                reason,
            });
            return None;
        }
    };

    for rejected in &read.rejected {
        let line = rejected.line().unwrap_or_default();
        let reason = row_reason(rejected);
        summary.skipped_rows.push(SkippedRow {
            path: path.to_path_buf(),
            line,
            reason: reason.clone(),
        });
        sink.emit(ConsolidationEvent::RowSkipped {
            path: path.to_path_buf(),
            line,
            reason,
        });
    }

    let table = read.table;
    summary.loaded_files.push(LoadedFile {
        path: path.to_path_buf(),
        header_line: table.header.line_index,
        columns: table.header.len(),
        rows: table.row_count(),
    });
    sink.emit(ConsolidationEvent::FileLoaded {
        path: path.to_path_buf(),
        header_line: table.header.line_index,
        rows: table.row_count(),
    });
    Some(table)
}

fn row_reason(err: &IngestError) -> String {
    match err {
        IngestError::RowParse {
            expected, found, ..
        } => format!("expected {expected} fields, found {found}"),
        IngestError::Record { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Reconciles headers and merges rows, in table order then row order.
///
/// Under `UseCommon` fields outside the intersection are dropped. Under
/// `UseUnion` columns a table lacks are filled with [`Cell::Absent`].
/// Returns the decision taken, or `None` when all headers matched.
pub fn merge_tables(
    tables: Vec<ParsedTable>,
    policy: &mut dyn DecisionPolicy,
    sink: &mut dyn EventSink,
) -> (ConsolidatedTable, Option<ReconciliationDecision>) {
    let reconciliation = reconcile(
        tables
            .iter()
            .map(|table| (file_label(table.source()), table.columns())),
    );

    let decision = reconciliation.report.as_ref().map(|report| {
        sink.emit(ConsolidationEvent::HeaderMismatch {
            report: report.clone(),
        });
        policy.decide(report)
    });
    let columns = reconciliation.columns(decision).to_vec();
    sink.emit(ConsolidationEvent::ColumnsResolved {
        decision,
        columns: columns.clone(),
    });

    let total_rows = tables.iter().map(ParsedTable::row_count).sum();
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(total_rows);
    for table in tables {
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|column| table.header.position(column))
            .collect();
        for mut row in table.rows {
            let cells = positions
                .iter()
                .map(|position| match position {
                    Some(idx) => Cell::Value(std::mem::take(&mut row[*idx])),
                    None => Cell::Absent,
                })
                .collect();
            rows.push(cells);
        }
    }

    (ConsolidatedTable::new(columns, rows), decision)
}
