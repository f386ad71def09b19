//! CSV rendering of consolidated tables.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use consolidator_model::ConsolidatedTable;

use crate::error::{OutputError, Result};

/// Text written in place of [`Cell::Absent`](consolidator_model::Cell::Absent).
pub const DEFAULT_ABSENT_MARKER: &str = "";

/// Options for writing a consolidated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvWriteOptions {
    /// Rendered for cells a source file never had.
    pub absent_marker: String,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            absent_marker: DEFAULT_ABSENT_MARKER.to_string(),
        }
    }
}

impl CsvWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absent marker.
    #[must_use]
    pub fn with_absent_marker(mut self, marker: impl Into<String>) -> Self {
        self.absent_marker = marker.into();
        self
    }
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.terminator(csv::Terminator::Any(b'\n'));
    builder
}

fn write_table<W: Write>(
    writer: &mut csv::Writer<W>,
    table: &ConsolidatedTable,
    options: &CsvWriteOptions,
) -> csv::Result<()> {
    writer.write_record(table.columns())?;
    let marker = options.absent_marker.as_str();
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.render(marker)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders `table` as CSV text: the header row, then every row.
pub fn render_consolidated_csv(
    table: &ConsolidatedTable,
    options: &CsvWriteOptions,
) -> Result<String> {
    let label = PathBuf::from("<memory>");
    let mut writer = writer_builder().from_writer(Vec::new());
    write_table(&mut writer, table, options).map_err(|source| OutputError::Csv {
        path: label.clone(),
        source,
    })?;
    let bytes = writer.into_inner().map_err(|err| OutputError::Io {
        operation: "flush",
        path: label.clone(),
        source: err.into_error(),
    })?;
    String::from_utf8(bytes).map_err(|err| OutputError::Io {
        operation: "decode",
        path: label,
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
    })
}

/// Writes `table` to `path`, replacing any existing file.
///
/// Rows go to a temporary sibling first and are renamed into place once
/// complete, so a failed write never leaves a partial file at `path`.
/// Missing parent directories are created.
pub fn write_consolidated_csv(
    table: &ConsolidatedTable,
    path: &Path,
    options: &CsvWriteOptions,
) -> Result<()> {
    let temp_path = temp_sibling(path)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if let Err(err) = write_temp(table, &temp_path, options) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        OutputError::AtomicWrite {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote consolidated CSV"
    );
    Ok(())
}

fn write_temp(table: &ConsolidatedTable, temp_path: &Path, options: &CsvWriteOptions) -> Result<()> {
    let file = File::create(temp_path).map_err(|source| OutputError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;

    let mut writer = writer_builder().from_writer(file);
    write_table(&mut writer, table, options).map_err(|source| OutputError::Csv {
        path: temp_path.to_path_buf(),
        source,
    })?;

    let file = writer.into_inner().map_err(|err| OutputError::Io {
        operation: "flush",
        path: temp_path.to_path_buf(),
        source: err.into_error(),
    })?;
    file.sync_all().map_err(|source| OutputError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| OutputError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    let mut temp_name = name.to_os_string();
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}
