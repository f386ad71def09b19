//! Consolidation engine: header reconciliation, row merging, date ranges,
//! and output naming.
//!
//! # Example
//!
//! ```ignore
//! use consolidator_core::{ConsolidateOptions, FixedDecision, TracingSink, consolidate, output_name};
//!
//! let paths = consolidator_ingest::list_csv_files(dir)?;
//! let run = consolidate(&paths, &ConsolidateOptions::default(), &mut FixedDecision::union(), &mut TracingSink)?;
//! let name = output_name(&run.summary.date_range, None)?;
//! ```

pub mod consolidate;
pub mod dates;
pub mod error;
pub mod events;
pub mod naming;
pub mod options;
pub mod policy;
pub mod reconcile;

pub use consolidate::{Consolidation, consolidate, merge_tables};
pub use dates::{
    DEFAULT_DATE_COLUMNS, DEFAULT_DATE_FORMATS, DateSettings, DateSource, extract_range,
};
pub use error::{ConsolidateError, Result};
pub use events::{ConsolidationEvent, EventSink, TracingSink};
pub use naming::{UNKNOWN_DATES_FILE_NAME, date_range_file_name, output_name};
pub use options::ConsolidateOptions;
pub use policy::{DecisionPolicy, FixedDecision};
pub use reconcile::{Reconciliation, reconcile};
