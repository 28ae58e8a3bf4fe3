//! Lexical compliance gap detection for security policy documents.
//!
//! This crate is the deterministic core of policy-gap: it classifies how well
//! a policy's clauses cover each compliance control and rolls the verdicts up
//! into a compliance posture.
//!
//! ## Classification
//!
//! - [`GapClassifier`] - Evaluates one [`Control`] against a clause sequence
//! - [`Lexicon`] - Synonym table and strength-signal vocabulary
//! - [`ClauseStrength`] - Mandatory / ownership / scope signals per clause
//!
//! ## Aggregation
//!
//! - [`group`] - Stable partition of verdicts by [`Function`]
//! - [`score`] - Compliance percentage and [`MaturityLevel`]
//! - [`assess`] - Both of the above as an [`AnalysisReport`]
//!
//! Clauses are expected to be normalized already (lowercase, collapsed
//! whitespace); see `policy-gap-document` for the extractor.
//!
//! ## Example
//!
//! ```
//! use policy_gap::{Control, CoverageStatus, Function, GapClassifier};
//!
//! let control = Control::new("AU-2", "Audit Events", Function::Detect, ["audit", "logs"]);
//! let clauses = [
//!     "the organization shall maintain detailed audit logs of all access.",
//!     "logs are reviewed quarterly.",
//! ];
//!
//! let verdict = GapClassifier::new().evaluate(&control, &clauses).unwrap();
//! assert_eq!(verdict.status, CoverageStatus::Adequate);
//! assert_eq!(verdict.strength_score, 2);
//! ```

mod aggregate;
mod classifier;
mod control;
mod error;
mod lexicon;
mod report;
mod score;
mod strength;
mod verdict;

pub use aggregate::{group, FunctionGroup, GroupedVerdicts};
pub use classifier::{ClassifierSettings, GapClassifier};
pub use control::{Control, Function, Severity};
pub use error::{GapError, GapResult};
pub use lexicon::Lexicon;
pub use report::{assess, AnalysisReport};
pub use score::{score, ComplianceSummary, MaturityLevel, MODERATE_THRESHOLD, STRONG_THRESHOLD};
pub use strength::{ClauseStrength, StrengthSignal};
pub use verdict::{CoverageStatus, ElementEvidence, Verdict};
