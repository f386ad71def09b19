//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering and reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not UTF-8 text.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Header Errors ===
    /// A header signature must name at least one column.
    #[error("header signature must contain at least one non-empty column name")]
    EmptySignature,

    /// No line starts with the expected header signature.
    #[error("could not find a header line starting with '{signature}' in {path}")]
    HeaderNotFound { path: PathBuf, signature: String },

    // === Row Errors ===
    /// A data row has a different number of fields than the header.
    #[error("line {line} of {path}: expected {expected} fields, found {found}")]
    RowParse {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The CSV reader rejected a record.
    #[error("line {line} of {path}: {message}")]
    Record {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl IngestError {
    /// Returns the 1-based source line for row-level errors.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::RowParse { line, .. } | Self::Record { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_header_not_found_display() {
        let err = IngestError::HeaderNotFound {
            path: PathBuf::from("export.csv"),
            signature: "ID,Timestamp,Transaction Type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not find a header line starting with 'ID,Timestamp,Transaction Type' in export.csv"
        );
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_row_parse_line() {
        let err = IngestError::RowParse {
            path: PathBuf::from("b.csv"),
            line: 9,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.line(), Some(9));
        assert_eq!(err.to_string(), "line 9 of b.csv: expected 3 fields, found 2");
    }
}
