//! Configuration for a consolidation run.

use consolidator_ingest::HeaderSignature;

use crate::dates::DateSettings;

/// Options controlling how input files are read and dated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidateOptions {
    /// Leading columns that identify each file's header line.
    pub signature: HeaderSignature,
    /// Date column names and formats used for the run's date range.
    pub dates: DateSettings,
}

impl ConsolidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header signature.
    #[must_use]
    pub fn with_signature(mut self, signature: HeaderSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Sets the date settings.
    #[must_use]
    pub fn with_dates(mut self, dates: DateSettings) -> Self {
        self.dates = dates;
        self
    }
}
