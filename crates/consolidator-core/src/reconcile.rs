//! Header reconciliation across input files.

use std::collections::BTreeSet;

use consolidator_model::{FileMismatch, HeaderUnion, MismatchReport, ReconciliationDecision};

/// Union and intersection of all headers, plus a mismatch report when they
/// differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub headers: HeaderUnion,
    /// Present only when files disagree and a decision is required.
    pub report: Option<MismatchReport>,
}

impl Reconciliation {
    pub fn requires_decision(&self) -> bool {
        self.report.is_some()
    }

    /// Returns the output columns. `decision` is ignored when headers agree.
    pub fn columns(&self, decision: Option<ReconciliationDecision>) -> &[String] {
        match (self.requires_decision(), decision) {
            (true, Some(decision)) => self.headers.columns_for(decision),
            (true, None) => self.headers.common(),
            (false, _) => self.headers.union(),
        }
    }
}

/// Computes the union (first-seen order) and intersection of every file's
/// header.
///
/// Column names within one header are expected to be unique. When the union
/// and intersection are equal, no decision is needed. Otherwise the report
/// lists, per file, its extra columns (not in the intersection) and missing
/// columns (in the union but not in the file).
pub fn reconcile<I, F, C>(per_file: I) -> Reconciliation
where
    I: IntoIterator<Item = (F, C)>,
    F: Into<String>,
    C: AsRef<[String]>,
{
    let files: Vec<(String, C)> = per_file
        .into_iter()
        .map(|(file, columns)| (file.into(), columns))
        .collect();

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut union: Vec<String> = Vec::new();
    for (_, columns) in &files {
        for name in columns.as_ref() {
            if seen.insert(name.as_str()) {
                union.push(name.clone());
            }
        }
    }

    let file_sets: Vec<BTreeSet<&str>> = files
        .iter()
        .map(|(_, columns)| columns.as_ref().iter().map(String::as_str).collect())
        .collect();
    let common: Vec<String> = union
        .iter()
        .filter(|name| file_sets.iter().all(|set| set.contains(name.as_str())))
        .cloned()
        .collect();

    let headers = HeaderUnion::new(union, common);
    if headers.is_uniform() {
        return Reconciliation {
            headers,
            report: None,
        };
    }

    let common_set: BTreeSet<&str> = headers.common().iter().map(String::as_str).collect();
    let mismatches = files
        .iter()
        .zip(&file_sets)
        .map(|((file, columns), set)| FileMismatch {
            file: file.clone(),
            extra: columns
                .as_ref()
                .iter()
                .filter(|name| !common_set.contains(name.as_str()))
                .cloned()
                .collect(),
            missing: headers
                .union()
                .iter()
                .filter(|name| !set.contains(name.as_str()))
                .cloned()
                .collect(),
        })
        .collect();

    let report = MismatchReport {
        common: headers.common().to_vec(),
        union: headers.union().to_vec(),
        files: mismatches,
    };
    Reconciliation {
        headers,
        report: Some(report),
    }
}
