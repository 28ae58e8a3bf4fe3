//! Verdicts: the classifier's output for one control.

use std::fmt;

use serde::Serialize;

use crate::control::{Control, Function, Severity};
use crate::strength::StrengthSignal;

/// Coverage classification for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    /// No required element is mentioned.
    Missing,
    /// Partial coverage, or full coverage in non-binding language.
    Weak,
    /// Every element mentioned with sufficient policy strength.
    Adequate,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Missing => "MISSING",
            CoverageStatus::Weak => "WEAK",
            CoverageStatus::Adequate => "ADEQUATE",
        }
    }

    /// Points awarded by the compliance score.
    pub fn points(&self) -> u32 {
        match self {
            CoverageStatus::Missing => 0,
            CoverageStatus::Weak => 50,
            CoverageStatus::Adequate => 100,
        }
    }

    /// True for statuses that are forwarded to remediation drafting.
    pub fn is_gap(&self) -> bool {
        !matches!(self, CoverageStatus::Adequate)
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (element, clause) match that contributed to a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementEvidence {
    /// Required element that was found.
    pub element: String,
    /// Keyword (the element or one of its synonyms) that matched.
    pub keyword: String,
    /// Index of the clause in the analyzed sequence.
    pub clause_index: usize,
    /// Strength points this clause added to the control's score.
    pub clause_strength: u32,
    /// Signal families present in the clause, in fixed order.
    pub signals: Vec<StrengthSignal>,
}

/// Classification result for one control. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub control_id: String,
    pub control_name: String,
    pub function: Function,
    pub severity: Severity,
    pub status: CoverageStatus,
    /// Required elements found, in catalogue order.
    pub found_elements: Vec<String>,
    /// Required elements not found, in catalogue order.
    pub missing_elements: Vec<String>,
    /// Accumulated strength over every matching (element, clause) pair.
    pub strength_score: u32,
    pub reason: String,
    pub evidence: Vec<ElementEvidence>,
}

impl Verdict {
    pub(crate) fn for_control(
        control: &Control,
        status: CoverageStatus,
        found_elements: Vec<String>,
        missing_elements: Vec<String>,
        strength_score: u32,
        reason: String,
        evidence: Vec<ElementEvidence>,
    ) -> Self {
        Self {
            control_id: control.id.clone(),
            control_name: control.name.clone(),
            function: control.function,
            severity: control.severity,
            status,
            found_elements,
            missing_elements,
            strength_score,
            reason,
            evidence,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.status.is_gap()
    }
}

/// Why a control ended up with its status. Drives the reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Basis {
    NoElementsDefined,
    NothingFound,
    PartialCoverage,
    LowStrength { score: u32, threshold: u32 },
    Covered,
}

impl Basis {
    pub(crate) fn status(&self) -> CoverageStatus {
        match self {
            Basis::NoElementsDefined | Basis::NothingFound => CoverageStatus::Missing,
            Basis::PartialCoverage | Basis::LowStrength { .. } => CoverageStatus::Weak,
            Basis::Covered => CoverageStatus::Adequate,
        }
    }

    pub(crate) fn reason(&self, missing: &[String]) -> String {
        match self {
            Basis::NoElementsDefined => {
                "No required elements defined for this control; coverage cannot be established."
                    .to_string()
            }
            Basis::NothingFound => format!(
                "No explicit policy statements addressing this control were found (missing: {}).",
                missing.join(", ")
            ),
            Basis::PartialCoverage => format!(
                "The control is only partially addressed; no policy statement covers: {}.",
                missing.join(", ")
            ),
            Basis::LowStrength { score, threshold } => format!(
                "All required elements are mentioned but the policy lacks strong language \
                 (mandatory terms, ownership, or scope); strength {} is below {}.",
                score, threshold
            ),
            Basis::Covered => {
                "All required elements are explicitly defined with strong policy language."
                    .to_string()
            }
        }
    }
}
