//! Gap classifier: one control against a document's clauses.
//!
//! Detection is lexical. An element counts as found when the element itself
//! or one of its lexicon synonyms is a literal substring of some clause. Each
//! (element, clause) match adds that clause's strength to the control's
//! `strength_score`, so a clause that covers two elements is counted twice.
//!
//! Status is decided in order:
//! 1. nothing found, or nothing required -> `MISSING`
//! 2. some but not all elements found -> `WEAK`
//! 3. all found -> `ADEQUATE` when `strength_score >= threshold`, else `WEAK`
//!
//! The last rule keeps full keyword coverage in non-binding language
//! ("logs are sometimes reviewed") from passing as an adequate control.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::control::Control;
use crate::error::GapResult;
use crate::lexicon::Lexicon;
use crate::strength::ClauseStrength;
use crate::verdict::{Basis, ElementEvidence, Verdict};

/// Tunables for status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// Minimum accumulated strength for a fully covered control to be ADEQUATE.
    pub adequate_strength_threshold: u32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            adequate_strength_threshold: 2,
        }
    }
}

/// Evaluates controls against clause sequences.
///
/// Holds only configuration; every evaluation is a pure function of its
/// inputs, so one classifier can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct GapClassifier {
    lexicon: Lexicon,
    settings: ClassifierSettings,
}

impl GapClassifier {
    /// Classifier with the default lexicon and settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with a custom lexicon and default settings.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            settings: ClassifierSettings::default(),
        }
    }

    /// Classifier with a custom lexicon and settings.
    pub fn with_settings(lexicon: Lexicon, settings: ClassifierSettings) -> Self {
        Self { lexicon, settings }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn settings(&self) -> ClassifierSettings {
        self.settings
    }

    /// Classify one control against every clause of a document.
    ///
    /// Fails only when the control breaks its input contract (see
    /// [`Control::validate`]). Empty clause lists and controls without
    /// required elements produce `MISSING` verdicts.
    pub fn evaluate<S: AsRef<str>>(&self, control: &Control, clauses: &[S]) -> GapResult<Verdict> {
        control.validate()?;

        let elements = &control.required_elements;
        let mut found = vec![false; elements.len()];
        let mut strength_score = 0u32;
        let mut evidence = Vec::new();

        if !elements.is_empty() {
            for (clause_index, clause) in clauses.iter().enumerate() {
                let clause = clause.as_ref();
                let measured = ClauseStrength::measure(clause, &self.lexicon);
                let clause_strength = measured.points();

                for (element_index, element) in elements.iter().enumerate() {
                    let matched = self
                        .lexicon
                        .keywords_for(element)
                        .find(|keyword| clause.contains(keyword));

                    if let Some(keyword) = matched {
                        found[element_index] = true;
                        strength_score += clause_strength;
                        evidence.push(ElementEvidence {
                            element: element.clone(),
                            keyword: keyword.to_string(),
                            clause_index,
                            clause_strength,
                            signals: measured.signals(),
                        });
                    }
                }
            }
        }

        let (found_elements, missing_elements): (Vec<_>, Vec<_>) = elements
            .iter()
            .zip(&found)
            .partition(|(_, hit)| **hit);
        let found_elements: Vec<String> = found_elements.into_iter().map(|(e, _)| e.clone()).collect();
        let missing_elements: Vec<String> =
            missing_elements.into_iter().map(|(e, _)| e.clone()).collect();

        let threshold = self.settings.adequate_strength_threshold;
        let basis = if elements.is_empty() {
            Basis::NoElementsDefined
        } else if found_elements.is_empty() {
            Basis::NothingFound
        } else if !missing_elements.is_empty() {
            Basis::PartialCoverage
        } else if strength_score >= threshold {
            Basis::Covered
        } else {
            Basis::LowStrength {
                score: strength_score,
                threshold,
            }
        };

        let status = basis.status();
        let reason = basis.reason(&missing_elements);

        debug!(
            control_id = %control.id,
            status = %status,
            strength_score,
            found = found_elements.len(),
            required = elements.len(),
            "control evaluated"
        );

        Ok(Verdict::for_control(
            control,
            status,
            found_elements,
            missing_elements,
            strength_score,
            reason,
            evidence,
        ))
    }

    /// Classify a whole catalogue. Verdicts come back in catalogue order; the
    /// first contract violation aborts the run.
    pub fn evaluate_all<S: AsRef<str>>(
        &self,
        controls: &[Control],
        clauses: &[S],
    ) -> GapResult<Vec<Verdict>> {
        let verdicts = controls
            .iter()
            .map(|control| self.evaluate(control, clauses))
            .collect::<GapResult<Vec<_>>>()?;

        info!(
            controls = controls.len(),
            clauses = clauses.len(),
            gaps = verdicts.iter().filter(|v| v.is_gap()).count(),
            "catalogue evaluated"
        );

        Ok(verdicts)
    }

    /// Same result as [`evaluate_all`](Self::evaluate_all), with controls
    /// evaluated on the rayon thread pool. Output stays in catalogue order.
    pub fn evaluate_all_parallel<S: AsRef<str> + Sync>(
        &self,
        controls: &[Control],
        clauses: &[S],
    ) -> GapResult<Vec<Verdict>> {
        let verdicts = controls
            .par_iter()
            .map(|control| self.evaluate(control, clauses))
            .collect::<GapResult<Vec<_>>>()?;

        info!(
            controls = controls.len(),
            clauses = clauses.len(),
            gaps = verdicts.iter().filter(|v| v.is_gap()).count(),
            "catalogue evaluated in parallel"
        );

        Ok(verdicts)
    }
}
