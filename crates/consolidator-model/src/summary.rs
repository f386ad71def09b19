//! Run summary reported after a consolidation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::headers::ReconciliationDecision;

/// A file that contributed rows to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Zero-based index of the detected header line.
    pub header_line: usize,
    pub columns: usize,
    pub rows: usize,
}

/// A file that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A row that was skipped, with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub path: PathBuf,
    pub line: u64,
    pub reason: String,
}

/// Counts and diagnostics for one consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files_attempted: usize,
    pub loaded_files: Vec<LoadedFile>,
    pub skipped_files: Vec<SkippedFile>,
    pub skipped_rows: Vec<SkippedRow>,
    pub total_rows: usize,
    pub total_columns: usize,
    /// Decision taken when headers disagreed; `None` when they matched.
    pub decision: Option<ReconciliationDecision>,
    pub date_range: DateRange,
}

impl Summary {
    pub fn files_succeeded(&self) -> usize {
        self.loaded_files.len()
    }

    pub fn files_skipped(&self) -> usize {
        self.skipped_files.len()
    }

    pub fn rows_skipped(&self) -> usize {
        self.skipped_rows.len()
    }

    /// Returns true if any file or row was skipped.
    pub fn has_skips(&self) -> bool {
        !self.skipped_files.is_empty() || !self.skipped_rows.is_empty()
    }
}
