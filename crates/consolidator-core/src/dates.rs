//! Date range extraction from a table's date-like column.
//!
//! The date column is the first column, in table order, whose trimmed,
//! lowercased name contains one of [`DateSettings::columns`], so
//! `Transaction Date` and `Date (UTC)` both count. Each cell is
//! tried against [`DateSettings::formats`] in order; cells that parse under no
//! format are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use consolidator_model::{Cell, ConsolidatedTable, DateRange, ParsedTable};

/// Column names recognized as dates, in priority order.
pub const DEFAULT_DATE_COLUMNS: [&str; 5] = ["date", "timestamp", "created_at", "datetime", "time"];

/// `chrono` formats tried after RFC 3339, in priority order.
pub const DEFAULT_DATE_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S UTC",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
];

/// Which columns count as dates and how their cells are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSettings {
    /// Lowercase name fragments that mark a date column.
    pub columns: Vec<String>,
    /// `chrono` format strings, in priority order.
    pub formats: Vec<String>,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_DATE_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
            formats: DEFAULT_DATE_FORMATS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl DateSettings {
    /// Replaces the recognized column names.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns = columns
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    /// Replaces the parse formats.
    #[must_use]
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    fn is_date_column(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.columns
            .iter()
            .any(|candidate| name.contains(candidate.as_str()))
    }

    /// Returns the index of the date column among `columns`, if any.
    pub fn select_column(&self, columns: &[String]) -> Option<usize> {
        columns.iter().position(|name| self.is_date_column(name))
    }

    /// Parses one cell, trying RFC 3339 first and then each format in order.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.naive_local().date());
        }
        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(value, format)
                .map(|parsed| parsed.date())
                .or_else(|_| NaiveDate::parse_from_str(value, format))
                .ok()
        })
    }
}

/// A table whose columns can be scanned for dates.
pub trait DateSource {
    fn column_names(&self) -> &[String];

    /// Values of the column at `index`; `None` for absent cells.
    fn column_values(&self, index: usize) -> Vec<Option<&str>>;
}

impl DateSource for ParsedTable {
    fn column_names(&self) -> &[String] {
        self.columns()
    }

    fn column_values(&self, index: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str))
            .collect()
    }
}

impl DateSource for ConsolidatedTable {
    fn column_names(&self) -> &[String] {
        self.columns()
    }

    fn column_values(&self, index: usize) -> Vec<Option<&str>> {
        self.column_cells(index).map(Cell::as_value).collect()
    }
}

/// Returns the earliest and latest date in `table`'s date column.
///
/// Returns [`DateRange::Unknown`] when no column matches or no cell parses.
pub fn extract_range<T>(table: &T, settings: &DateSettings) -> DateRange
where
    T: DateSource + ?Sized,
{
    let Some(index) = settings.select_column(table.column_names()) else {
        tracing::debug!("no date-like column");
        return DateRange::Unknown;
    };
    let values = table.column_values(index);
    let mut unparsed = 0usize;
    let range = DateRange::from_dates(values.into_iter().flatten().filter_map(|value| {
        let parsed = settings.parse(value);
        if parsed.is_none() && !value.trim().is_empty() {
            unparsed += 1;
        }
        parsed
    }));
    tracing::debug!(
        column = %table.column_names()[index],
        unparsed,
        known = range.is_known(),
        "extracted date range"
    );
    range
}
