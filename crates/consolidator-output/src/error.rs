//! Output error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while writing a consolidated table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error.
    #[error("failed to encode CSV for {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The finished temp file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}")]
    AtomicWrite {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target path has no file name.
    #[error("output path has no file name: {path}")]
    InvalidPath { path: PathBuf },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
