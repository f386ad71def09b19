//! Data model for consolidating CSV exports into one table.

pub mod cell;
pub mod dates;
pub mod headers;
pub mod summary;
pub mod table;

pub use cell::Cell;
pub use dates::DateRange;
pub use headers::{FileMismatch, HeaderUnion, MismatchReport, ReconciliationDecision};
pub use summary::{LoadedFile, SkippedFile, SkippedRow, Summary};
pub use table::{ConsolidatedTable, DetectedHeader, ParsedTable};
