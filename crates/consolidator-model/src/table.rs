//! Parsed and consolidated tables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// The real tabular header found inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedHeader {
    /// Zero-based index of the header line; earlier lines are metadata.
    pub line_index: usize,
    /// Column names in file order. Names are unique.
    pub columns: Vec<String>,
}

impl DetectedHeader {
    pub fn new(line_index: usize, columns: Vec<String>) -> Self {
        Self {
            line_index,
            columns,
        }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the position of a column by exact name.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }
}

/// One source file's rows, keyed by its detected header.
///
/// Rows are stored positionally: `rows[i][j]` is the value of
/// `header.columns[j]`. Every row has exactly `header.len()` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub source: PathBuf,
    pub header: DetectedHeader,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn new(source: impl Into<PathBuf>, header: DetectedHeader, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == header.len()));
        Self {
            source: source.into(),
            header,
            rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.header.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the value of `column` in row `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.header.position(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// The merged output of a consolidation run.
///
/// Built once by the consolidator; there are no mutating accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ConsolidatedTable {
    /// Creates a table. Every row must have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    /// Returns the cell of `column` in row `row`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Iterates over every cell of the column at `index`.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn parsed_table_lookup_by_name() {
        let header = DetectedHeader::new(3, strings(&["ID", "Timestamp", "Amount"]));
        let table = ParsedTable::new(
            "a.csv",
            header,
            vec![strings(&["1", "2021-04-09", "10"]), strings(&["2", "2021-04-10", ""])],
        );
        assert_eq!(table.value(0, "Amount"), Some("10"));
        assert_eq!(table.value(1, "Amount"), Some(""));
        assert_eq!(table.value(2, "Amount"), None);
        assert_eq!(table.value(0, "Category"), None);
    }

    #[test]
    fn consolidated_table_cells() {
        let table = ConsolidatedTable::new(
            strings(&["ID", "Category"]),
            vec![
                vec![Cell::from("1"), Cell::Absent],
                vec![Cell::from("2"), Cell::from("fees")],
            ],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(0, "Category"), Some(&Cell::Absent));
        assert_eq!(table.cell(1, "Category"), Some(&Cell::from("fees")));
        let ids: Vec<_> = table.column_cells(0).filter_map(Cell::as_value).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
