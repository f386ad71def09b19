//! Observed date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Earliest and latest date found in a table's date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DateRange {
    Known {
        earliest: NaiveDate,
        latest: NaiveDate,
    },
    /// No date-like column, or no cell parsed.
    #[default]
    Unknown,
}

impl DateRange {
    /// Builds a known range; the arguments may come in either order.
    pub fn known(a: NaiveDate, b: NaiveDate) -> Self {
        Self::Known {
            earliest: a.min(b),
            latest: a.max(b),
        }
    }

    /// Builds the range spanning every date in `dates`.
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates
            .into_iter()
            .fold(Self::Unknown, |range, date| range.include(date))
    }

    /// Widens the range to include `date`.
    #[must_use]
    pub fn include(self, date: NaiveDate) -> Self {
        match self {
            Self::Known { earliest, latest } => Self::Known {
                earliest: earliest.min(date),
                latest: latest.max(date),
            },
            Self::Unknown => Self::Known {
                earliest: date,
                latest: date,
            },
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }

    pub fn earliest(&self) -> Option<NaiveDate> {
        match self {
            Self::Known { earliest, .. } => Some(*earliest),
            Self::Unknown => None,
        }
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        match self {
            Self::Known { latest, .. } => Some(*latest),
            Self::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn from_dates_spans_min_and_max() {
        let range = DateRange::from_dates([date(2022, 3, 2), date(2021, 4, 9), date(2021, 12, 1)]);
        assert_eq!(range, DateRange::known(date(2021, 4, 9), date(2022, 3, 2)));
        assert_eq!(range.earliest(), Some(date(2021, 4, 9)));
        assert_eq!(range.latest(), Some(date(2022, 3, 2)));
    }

    #[test]
    fn empty_input_is_unknown() {
        let range = DateRange::from_dates(std::iter::empty());
        assert!(!range.is_known());
        assert_eq!(range.earliest(), None);
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&DateRange::Unknown).expect("serialize");
        assert_eq!(json, r#"{"status":"unknown"}"#);
        let known = DateRange::known(date(2021, 4, 9), date(2021, 4, 9));
        let json = serde_json::to_string(&known).expect("serialize");
        assert_eq!(
            json,
            r#"{"status":"known","earliest":"2021-04-09","latest":"2021-04-09"}"#
        );
    }
}
