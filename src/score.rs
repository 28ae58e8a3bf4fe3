//! Compliance scoring and maturity labels.
//!
//! Each verdict earns points (ADEQUATE 100, WEAK 50, MISSING 0). The
//! percentage is earned points over the maximum, reported to two decimals.
//! Maturity thresholds are inclusive at their lower bound:
//!
//! | percentage      | maturity |
//! |-----------------|----------|
//! | `>= 80`         | Strong   |
//! | `>= 50`, `< 80` | Moderate |
//! | `< 50`          | Weak     |

use std::fmt;

use serde::Serialize;

use crate::verdict::{CoverageStatus, Verdict};

/// Lower bound of [`MaturityLevel::Strong`].
pub const STRONG_THRESHOLD: f64 = 80.0;
/// Lower bound of [`MaturityLevel::Moderate`].
pub const MODERATE_THRESHOLD: f64 = 50.0;

/// Coarse label for an overall compliance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MaturityLevel {
    Weak,
    Moderate,
    Strong,
}

impl MaturityLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= STRONG_THRESHOLD {
            MaturityLevel::Strong
        } else if percentage >= MODERATE_THRESHOLD {
            MaturityLevel::Moderate
        } else {
            MaturityLevel::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityLevel::Weak => "Weak",
            MaturityLevel::Moderate => "Moderate",
            MaturityLevel::Strong => "Strong",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall compliance posture of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSummary {
    /// Earned points over the maximum, `0.0..=100.0`, two decimals.
    pub compliance_percentage: f64,
    pub maturity_level: MaturityLevel,
    pub total_controls: usize,
    pub adequate: usize,
    pub weak: usize,
    pub missing: usize,
}

impl ComplianceSummary {
    /// The zero case: no verdicts means no demonstrated coverage.
    pub fn empty() -> Self {
        Self {
            compliance_percentage: 0.0,
            maturity_level: MaturityLevel::Weak,
            total_controls: 0,
            adequate: 0,
            weak: 0,
            missing: 0,
        }
    }
}

/// Score a set of verdicts.
///
/// An empty set scores `0.0` / `Weak`. Maturity is derived from the exact
/// percentage; rounding only affects the reported figure.
pub fn score(verdicts: &[Verdict]) -> ComplianceSummary {
    if verdicts.is_empty() {
        return ComplianceSummary::empty();
    }

    let count = |status: CoverageStatus| verdicts.iter().filter(|v| v.status == status).count();
    let earned: u64 = verdicts.iter().map(|v| u64::from(v.status.points())).sum();
    let possible = 100 * verdicts.len() as u64;

    let percentage = earned as f64 / possible as f64 * 100.0;

    ComplianceSummary {
        compliance_percentage: round2(percentage),
        maturity_level: MaturityLevel::from_percentage(percentage),
        total_controls: verdicts.len(),
        adequate: count(CoverageStatus::Adequate),
        weak: count(CoverageStatus::Weak),
        missing: count(CoverageStatus::Missing),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maturity_boundaries_are_inclusive() {
        assert_eq!(MaturityLevel::from_percentage(100.0), MaturityLevel::Strong);
        assert_eq!(MaturityLevel::from_percentage(80.0), MaturityLevel::Strong);
        assert_eq!(MaturityLevel::from_percentage(79.99), MaturityLevel::Moderate);
        assert_eq!(MaturityLevel::from_percentage(50.0), MaturityLevel::Moderate);
        assert_eq!(MaturityLevel::from_percentage(49.99), MaturityLevel::Weak);
        assert_eq!(MaturityLevel::from_percentage(0.0), MaturityLevel::Weak);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn maturity_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&MaturityLevel::Moderate).unwrap(),
            r#""Moderate""#
        );
    }
}
