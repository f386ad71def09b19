//! Writing consolidated tables to disk.
//!
//! The header row holds the final columns; every following row holds one
//! merged record. Absent cells are rendered with a configurable marker.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{
    CsvWriteOptions, DEFAULT_ABSENT_MARKER, render_consolidated_csv, write_consolidated_csv,
};
