//! The analysis report handed to presentation layers.

use serde::Serialize;

use crate::aggregate::{group, GroupedVerdicts};
use crate::score::{score, ComplianceSummary};
use crate::verdict::Verdict;

/// Everything one analysis produced, in the shape consumers serialize:
/// `{filename, grouped_results, summary, raw_results}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub grouped_results: GroupedVerdicts,
    pub summary: ComplianceSummary,
    pub raw_results: Vec<Verdict>,
}

impl AnalysisReport {
    /// Verdicts that need remediation, in catalogue order.
    pub fn gaps(&self) -> impl Iterator<Item = &Verdict> {
        self.raw_results.iter().filter(|v| v.is_gap())
    }
}

/// Group and score a finished set of verdicts.
pub fn assess(filename: impl Into<String>, verdicts: Vec<Verdict>) -> AnalysisReport {
    AnalysisReport {
        filename: filename.into(),
        grouped_results: group(&verdicts),
        summary: score(&verdicts),
        raw_results: verdicts,
    }
}
