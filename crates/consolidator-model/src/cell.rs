//! Cell values of a consolidated table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a [`ConsolidatedTable`](crate::ConsolidatedTable).
///
/// `Absent` means the column did not exist in the row's source file. It is
/// distinct from `Value(String::new())`, which is a blank value that was
/// present in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A value read from the source file (possibly blank).
    Value(String),
    /// The source file has no such column.
    Absent,
}

impl Cell {
    /// Returns the source value, or `None` for an absent cell.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value.as_str()),
            Self::Absent => None,
        }
    }

    /// Returns true if the column was not present in the source file.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Renders the cell as text, substituting `absent_marker` for absent cells.
    pub fn render<'a>(&'a self, absent_marker: &'a str) -> &'a str {
        self.as_value().unwrap_or(absent_marker)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::Absent => f.write_str("<absent>"),
        }
    }
}
