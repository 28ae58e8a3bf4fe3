//! Keyword tables consulted by the classifier.
//!
//! The lexicon is configuration data: the synonym map used to expand each
//! required element, and the three term lists behind the strength signal.
//! [`Lexicon::default`] carries the stock tables; a catalogue may load its own
//! (see `policy-gap-catalogue`) so keyword coverage can evolve without code
//! changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Synonym expansion plus strength-signal vocabulary.
///
/// Every table is optional when deserializing; an absent table keeps the
/// default contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Binding language ("shall", "must").
    pub mandatory_terms: Vec<String>,
    /// Assigned accountability ("responsible", "owner").
    pub ownership_terms: Vec<String>,
    /// Declared applicability ("applies to", "all systems").
    pub scope_terms: Vec<String>,
    /// Canonical element phrase -> equivalent phrases.
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        fn terms(list: &[&str]) -> Vec<String> {
            list.iter().map(|t| t.to_string()).collect()
        }

        let table: &[(&str, &[&str])] = &[
            ("asset inventory", &["asset identification", "assets identified", "asset register"]),
            ("asset ownership", &["asset owner", "ownership assigned"]),
            ("classification", &["classified", "classification scheme"]),
            ("risk assessment", &["risk evaluated", "risk analysis", "assess risk"]),
            ("least privilege", &["minimum access", "restricted access"]),
            ("access control", &["access restricted", "access managed"]),
            ("incident response", &["security incident response", "incident handling"]),
            ("recovery plan", &["disaster recovery", "business continuity"]),
            ("logging", &["log events", "audit logs"]),
            ("monitoring", &["continuous monitoring", "system monitoring"]),
            ("data classification", &["data categorized", "information classification"]),
            ("encryption", &["encrypted", "cryptographic protection"]),
        ];
        let synonyms = table
            .iter()
            .map(|(element, equivalents)| (element.to_string(), terms(equivalents)))
            .collect();

        Self {
            mandatory_terms: terms(&["shall", "must", "required to"]),
            ownership_terms: terms(&["responsible", "accountable", "owner", "ownership"]),
            scope_terms: terms(&[
                "applies to",
                "all systems",
                "organization-wide",
                "entire organization",
            ]),
            synonyms,
        }
    }
}

impl Lexicon {
    /// A lexicon with no signal terms and no synonyms.
    pub fn empty() -> Self {
        Self {
            mandatory_terms: Vec::new(),
            ownership_terms: Vec::new(),
            scope_terms: Vec::new(),
            synonyms: BTreeMap::new(),
        }
    }

    /// Add equivalent phrases for an element, keeping any already present.
    pub fn with_synonyms<I, S>(mut self, element: &str, equivalents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.synonyms.entry(element.to_string()).or_default();
        for equivalent in equivalents {
            let equivalent = equivalent.into();
            if !entry.contains(&equivalent) {
                entry.push(equivalent);
            }
        }
        self
    }

    /// Keywords that count as evidence for `element`: the element itself
    /// first, then its synonyms in table order.
    pub fn keywords_for<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(element).chain(
            self.synonyms
                .get(element)
                .into_iter()
                .flat_map(|list| list.iter().map(String::as_str)),
        )
    }

    /// Lowercase and trim every term so lexicons written by hand still match
    /// normalized clauses. Empty terms are dropped, and synonym lists whose
    /// keys normalize to the same element are merged in key order.
    pub fn normalized(self) -> Self {
        fn clean(list: Vec<String>) -> Vec<String> {
            let mut out: Vec<String> = Vec::with_capacity(list.len());
            for term in list {
                let term = term.trim().to_lowercase();
                if !term.is_empty() && !out.contains(&term) {
                    out.push(term);
                }
            }
            out
        }

        let mut synonyms: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (element, equivalents) in self.synonyms {
            let element = element.trim().to_lowercase();
            if element.is_empty() {
                continue;
            }
            synonyms.entry(element).or_default().extend(equivalents);
        }

        Self {
            mandatory_terms: clean(self.mandatory_terms),
            ownership_terms: clean(self.ownership_terms),
            scope_terms: clean(self.scope_terms),
            synonyms: synonyms
                .into_iter()
                .map(|(element, equivalents)| (element, clean(equivalents)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_start_with_the_element() {
        let lexicon = Lexicon::default();
        let keywords: Vec<_> = lexicon.keywords_for("logging").collect();
        assert_eq!(keywords, vec!["logging", "log events", "audit logs"]);
    }

    #[test]
    fn unknown_element_expands_to_itself() {
        let lexicon = Lexicon::default();
        let keywords: Vec<_> = lexicon.keywords_for("backup").collect();
        assert_eq!(keywords, vec!["backup"]);
    }

    #[test]
    fn with_synonyms_extends_without_duplicates() {
        let lexicon = Lexicon::empty()
            .with_synonyms("backup", ["data backup", "backups"])
            .with_synonyms("backup", ["backups", "restore point"]);
        let keywords: Vec<_> = lexicon.keywords_for("backup").collect();
        assert_eq!(keywords, vec!["backup", "data backup", "backups", "restore point"]);
    }

    #[test]
    fn normalized_lowercases_and_drops_blanks() {
        let mut lexicon = Lexicon::empty();
        lexicon.mandatory_terms = vec!["SHALL".into(), " shall ".into(), "".into(), "Must".into()];
        lexicon.synonyms.insert(" Backup ".into(), vec!["Data Backup".into()]);
        let lexicon = lexicon.normalized();
        assert_eq!(lexicon.mandatory_terms, vec!["shall", "must"]);
        assert_eq!(lexicon.synonyms.get("backup"), Some(&vec!["data backup".to_string()]));
    }

    #[test]
    fn normalized_merges_keys_that_collide() {
        let lexicon = Lexicon::empty()
            .with_synonyms("Backup", ["Data Backup", "backups"])
            .with_synonyms("backup ", ["backups", "restore point"])
            .normalized();

        assert_eq!(lexicon.synonyms.len(), 1);
        let keywords: Vec<_> = lexicon.keywords_for("backup").collect();
        assert_eq!(keywords, vec!["backup", "data backup", "backups", "restore point"]);
    }
}
