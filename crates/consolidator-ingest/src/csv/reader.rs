//! Reading raw files and parsing the rows below a detected header.

use std::path::{Path, PathBuf};

use consolidator_model::{DetectedHeader, ParsedTable};

use crate::error::{IngestError, Result};

use super::header::{HeaderSignature, locate_header};
use super::record_reader;

/// A source file's text, split into lines.
///
/// A leading UTF-8 BOM is removed. Line terminators (`\n` or `\r\n`) are not
/// part of the lines.
#[derive(Debug, Clone)]
pub struct RawFile {
    path: PathBuf,
    contents: String,
    line_starts: Vec<usize>,
}

impl RawFile {
    /// Reads a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Builds a raw file from bytes, rejecting non-UTF-8 content.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        // UTF-16 BOMs (not supported)
        if bytes.starts_with(&[0xFF, 0xFE]) {
            return Err(IngestError::UnsupportedEncoding {
                path,
                encoding: "UTF-16 LE",
            });
        }
        if bytes.starts_with(&[0xFE, 0xFF]) {
            return Err(IngestError::UnsupportedEncoding {
                path,
                encoding: "UTF-16 BE",
            });
        }
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self::from_text(path, text)),
            Err(_) => Err(IngestError::UnsupportedEncoding {
                path,
                encoding: "non-UTF-8",
            }),
        }
    }

    /// Builds a raw file from already-decoded text.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let mut contents: String = text.into();
        if let Some(stripped) = contents.strip_prefix('\u{feff}') {
            contents = stripped.to_string();
        }
        let mut line_starts = Vec::new();
        let mut offset = 0;
        for chunk in contents.split_inclusive('\n') {
            line_starts.push(offset);
            offset += chunk.len();
        }
        Self {
            path: path.into(),
            contents,
            line_starts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the line at `index` without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.contents.len());
        Some(trim_line_end(&self.contents[start..end]))
    }

    /// Returns every line without terminators.
    pub fn lines(&self) -> Vec<&str> {
        (0..self.line_count()).filter_map(|idx| self.line(idx)).collect()
    }

    /// Byte offset of the text following line `index`.
    fn offset_after(&self, index: usize) -> usize {
        self.line_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.contents.len())
    }

    /// 1-based number of the line holding the first byte at or after
    /// `offset` that is not a line terminator.
    fn line_number_at(&self, offset: usize) -> u64 {
        let bytes = self.contents.as_bytes();
        let mut offset = offset.min(bytes.len());
        while offset < bytes.len() && matches!(bytes[offset], b'\r' | b'\n') {
            offset += 1;
        }
        self.line_starts.partition_point(|&start| start <= offset) as u64
    }

    /// Locates the header line, failing with `HeaderNotFound`.
    pub fn locate_header(&self, signature: &HeaderSignature) -> Result<DetectedHeader> {
        locate_header(&self.lines(), signature).ok_or_else(|| IngestError::HeaderNotFound {
            path: self.path.clone(),
            signature: signature.to_string(),
        })
    }
}

fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Rows parsed below a header, plus the rows that were rejected.
#[derive(Debug)]
pub struct TableRead {
    pub table: ParsedTable,
    /// `RowParse` or `Record` errors, one per skipped row, in file order.
    pub rejected: Vec<IngestError>,
}

/// Parses the data rows that follow `header` in `raw`.
///
/// Records may span lines when quoted. Empty lines are ignored; any other
/// line is a record. A record with a different field count than the header,
/// including a whitespace-only line, is rejected and reported, and parsing
/// continues with the next record.
pub fn parse_rows(raw: &RawFile, header: DetectedHeader) -> TableRead {
    let body_start = raw.offset_after(header.line_index);
    // Reader positions are byte offsets into the body, taken before any
    // skipped empty lines.
    let line_at = |pos: &csv::Position| raw.line_number_at(body_start + pos.byte() as usize);
    let mut reader = record_reader(raw.contents[body_start..].as_bytes());

    let mut rows = Vec::new();
    let mut rejected = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let start = reader.position().clone();
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) => {
                let line = line_at(err.position().unwrap_or(&start));
                tracing::debug!(path = %raw.path().display(), line, error = %err, "rejected record");
                rejected.push(IngestError::Record {
                    path: raw.path().to_path_buf(),
                    line,
                    message: err.to_string(),
                });
                if err.is_io_error() {
                    break;
                }
                continue;
            }
        }
        let line = line_at(record.position().unwrap_or(&start));
        if record.len() != header.len() {
            rejected.push(IngestError::RowParse {
                path: raw.path().to_path_buf(),
                line,
                expected: header.len(),
                found: record.len(),
            });
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        path = %raw.path().display(),
        header_line = header.line_index,
        rows = rows.len(),
        rejected = rejected.len(),
        "parsed rows"
    );
    TableRead {
        table: ParsedTable::new(raw.path(), header, rows),
        rejected,
    }
}

/// Reads a file, locates its header, and parses its rows.
pub fn read_table(path: &Path, signature: &HeaderSignature) -> Result<TableRead> {
    let raw = RawFile::read(path)?;
    let header = raw.locate_header(signature)?;
    Ok(parse_rows(&raw, header))
}
