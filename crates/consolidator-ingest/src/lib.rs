//! CSV ingestion for consolidation.
//!
//! This crate discovers CSV exports in a directory, finds the real header
//! line inside files that start with a free-form metadata block, and parses
//! the rows below it.
//!
//! # Features
//!
//! - **Discovery**: List `*.csv` files in deterministic file-name order
//! - **Header Location**: Find the first line starting with a [`HeaderSignature`]
//! - **Row Parsing**: Quote-aware parsing that rejects rows with the wrong field count
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use consolidator_ingest::{HeaderSignature, list_csv_files, read_table};
//!
//! let signature = HeaderSignature::default();
//! for path in list_csv_files(Path::new("data/unprocessed"))? {
//!     let read = read_table(&path, &signature)?;
//!     println!("{}: {} rows", path.display(), read.table.row_count());
//! }
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    DEFAULT_HEADER_SIGNATURE, HeaderSignature, RawFile, TableRead, locate_header,
    normalize_header, parse_csv_line, parse_rows, read_table, unique_columns,
};

// === File Discovery ===
pub use discovery::list_csv_files;
