//! Strength signals: lexical evidence that a clause is binding policy.
//!
//! A clause earns one point for each signal family it contains:
//! - Mandatory language (shall, must, required to)
//! - Ownership (responsible, accountable, owner)
//! - Scope (applies to, all systems, organization-wide)
//!
//! so a clause's strength is always in `0..=3`.

use serde::Serialize;

use crate::lexicon::Lexicon;

/// One family of policy-strength language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StrengthSignal {
    /// Binding modal language
    Mandatory,
    /// Named accountability
    Ownership,
    /// Declared applicability
    Scope,
}

/// Signals detected in one clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClauseStrength {
    pub mandatory: bool,
    pub ownership: bool,
    pub scope: bool,
}

impl ClauseStrength {
    /// Detect signals in a normalized clause by literal substring search.
    pub fn measure(clause: &str, lexicon: &Lexicon) -> Self {
        let contains_any = |terms: &[String]| terms.iter().any(|term| clause.contains(term.as_str()));

        Self {
            mandatory: contains_any(&lexicon.mandatory_terms),
            ownership: contains_any(&lexicon.ownership_terms),
            scope: contains_any(&lexicon.scope_terms),
        }
    }

    /// Points contributed by this clause, `0..=3`.
    pub fn points(&self) -> u32 {
        self.mandatory as u32 + self.ownership as u32 + self.scope as u32
    }

    pub fn has(&self, signal: StrengthSignal) -> bool {
        match signal {
            StrengthSignal::Mandatory => self.mandatory,
            StrengthSignal::Ownership => self.ownership,
            StrengthSignal::Scope => self.scope,
        }
    }

    /// The signals present, in fixed order.
    pub fn signals(&self) -> Vec<StrengthSignal> {
        [
            StrengthSignal::Mandatory,
            StrengthSignal::Ownership,
            StrengthSignal::Scope,
        ]
        .into_iter()
        .filter(|signal| self.has(*signal))
        .collect()
    }
}
