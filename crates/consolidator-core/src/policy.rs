//! Decision policies for header mismatches.

use consolidator_model::{MismatchReport, ReconciliationDecision};

/// Chooses between the common and union column sets.
///
/// Called at most once per run, and only when headers disagree.
pub trait DecisionPolicy {
    fn decide(&mut self, report: &MismatchReport) -> ReconciliationDecision;
}

/// Always returns the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDecision(pub ReconciliationDecision);

impl FixedDecision {
    pub fn common() -> Self {
        Self(ReconciliationDecision::UseCommon)
    }

    pub fn union() -> Self {
        Self(ReconciliationDecision::UseUnion)
    }
}

impl DecisionPolicy for FixedDecision {
    fn decide(&mut self, _report: &MismatchReport) -> ReconciliationDecision {
        self.0
    }
}

impl<F> DecisionPolicy for F
where
    F: FnMut(&MismatchReport) -> ReconciliationDecision,
{
    fn decide(&mut self, report: &MismatchReport) -> ReconciliationDecision {
        self(report)
    }
}
