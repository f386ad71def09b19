//! Output file naming.

use consolidator_model::DateRange;

use crate::error::{ConsolidateError, Result};

/// File name used when no date range could be determined.
pub const UNKNOWN_DATES_FILE_NAME: &str = "consolidated_unknown_dates.csv";

const NAME_DATE_FORMAT: &str = "%m-%d-%Y";

/// Picks the output file name.
///
/// An explicit name is returned unchanged once it is known to be non-blank.
/// Otherwise the name is derived from `range`; an unknown range falls back to
/// [`UNKNOWN_DATES_FILE_NAME`].
pub fn output_name(range: &DateRange, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(name) if name.trim().is_empty() => Err(ConsolidateError::EmptyOutputName),
        Some(name) => Ok(name.to_string()),
        None => Ok(date_range_file_name(range)),
    }
}

/// `consolidated_<MM-DD-YYYY>_thru_<MM-DD-YYYY>.csv` for a known range.
pub fn date_range_file_name(range: &DateRange) -> String {
    match range {
        DateRange::Known { earliest, latest } => format!(
            "consolidated_{}_thru_{}.csv",
            earliest.format(NAME_DATE_FORMAT),
            latest.format(NAME_DATE_FORMAT)
        ),
        DateRange::Unknown => UNKNOWN_DATES_FILE_NAME.to_string(),
    }
}
