//! Header sets across input files and the decision between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which column set becomes the output header when files disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationDecision {
    /// Keep only the columns present in every file.
    UseCommon,
    /// Keep every column seen in any file; missing cells become absent.
    UseUnion,
}

impl fmt::Display for ReconciliationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseCommon => f.write_str("common"),
            Self::UseUnion => f.write_str("union"),
        }
    }
}

/// Union and intersection of every input file's header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderUnion {
    union: Vec<String>,
    common: Vec<String>,
}

impl HeaderUnion {
    /// `union` is in first-seen order; `common` must be a subsequence of it.
    pub fn new(union: Vec<String>, common: Vec<String>) -> Self {
        Self { union, common }
    }

    /// Columns present in any file, first-seen order.
    pub fn union(&self) -> &[String] {
        &self.union
    }

    /// Columns present in every file, in union order.
    pub fn common(&self) -> &[String] {
        &self.common
    }

    /// Returns true when every file has the same column set.
    pub fn is_uniform(&self) -> bool {
        self.union.len() == self.common.len()
    }

    /// Returns the output columns for a decision.
    pub fn columns_for(&self, decision: ReconciliationDecision) -> &[String] {
        match decision {
            ReconciliationDecision::UseCommon => &self.common,
            ReconciliationDecision::UseUnion => &self.union,
        }
    }
}

/// How one file's header differs from the common and union sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMismatch {
    /// File identifier (usually the file name).
    pub file: String,
    /// Present in this file, absent from the common set.
    pub extra: Vec<String>,
    /// Present in the union, absent from this file.
    pub missing: Vec<String>,
}

/// Report handed to a decision policy when headers disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchReport {
    pub common: Vec<String>,
    pub union: Vec<String>,
    pub files: Vec<FileMismatch>,
}

impl MismatchReport {
    /// Files whose header adds columns beyond the common set.
    pub fn files_with_extra(&self) -> impl Iterator<Item = &FileMismatch> + '_ {
        self.files.iter().filter(|file| !file.extra.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn columns_for_decision() {
        let headers = HeaderUnion::new(
            strings(&["ID", "Timestamp", "Amount", "Category"]),
            strings(&["ID", "Timestamp"]),
        );
        assert!(!headers.is_uniform());
        assert_eq!(
            headers.columns_for(ReconciliationDecision::UseCommon),
            strings(&["ID", "Timestamp"]).as_slice()
        );
        assert_eq!(
            headers.columns_for(ReconciliationDecision::UseUnion).len(),
            4
        );
    }

    #[test]
    fn decision_display_and_serde() {
        assert_eq!(ReconciliationDecision::UseUnion.to_string(), "union");
        let json = serde_json::to_string(&ReconciliationDecision::UseCommon).expect("serialize");
        assert_eq!(json, "\"use_common\"");
    }
}
