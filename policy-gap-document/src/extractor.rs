//! Clause extraction: raw policy text to normalized clause strings.
//!
//! Every clause the classifier sees has been lowercased, had whitespace runs
//! collapsed to single spaces, and passed a minimum length filter. Headings,
//! list markers and other short fragments fall below the filter.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Default minimum clause length. Clauses must be strictly longer.
pub const DEFAULT_MIN_CLAUSE_LEN: usize = 20;

/// How raw text is cut into candidate clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// One candidate per line of the source text.
    #[default]
    Lines,
    /// One candidate per Unicode sentence (UAX #29 boundaries).
    Sentences,
}

impl SplitMode {
    /// Parse a split mode name ("lines" or "sentences").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Some(SplitMode::Lines),
            "sentences" | "sentence" => Some(SplitMode::Sentences),
            _ => None,
        }
    }
}

/// Lowercase a fragment and collapse its whitespace.
pub fn normalize_clause(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

/// Extractor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseExtractor {
    /// Clauses of this many characters or fewer are dropped.
    min_len: usize,
    split: SplitMode,
}

impl Default for ClauseExtractor {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_CLAUSE_LEN,
            split: SplitMode::Lines,
        }
    }
}

impl ClauseExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom settings.
    pub fn with_settings(min_len: usize, split: SplitMode) -> Self {
        Self { min_len, split }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn split(&self) -> SplitMode {
        self.split
    }

    /// Extract normalized clauses in document order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let keep = |clause: &String| clause.chars().count() > self.min_len;

        match self.split {
            SplitMode::Lines => text.lines().map(normalize_clause).filter(keep).collect(),
            SplitMode::Sentences => text
                .unicode_sentences()
                .map(normalize_clause)
                .filter(keep)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = "Information Security Policy\n\
        \n\
        1. Scope\n\
        This policy applies to all systems operated by the   Company.\n\
        The IT Manager is responsible for maintaining an asset register. Backups are performed weekly.\n\
        \t Short line.\n";

    #[test]
    fn normalize_lowercases_and_collapses() {
        assert_eq!(
            normalize_clause("  All\tSystems   MUST be\r\n patched. "),
            "all systems must be patched."
        );
    }

    #[test]
    fn lines_mode_drops_short_fragments() {
        let clauses = ClauseExtractor::new().extract(POLICY);
        insta::assert_snapshot!(clauses.join("\n"), @r###"
        information security policy
        this policy applies to all systems operated by the company.
        the it manager is responsible for maintaining an asset register. backups are performed weekly.
        "###);
    }

    #[test]
    fn sentences_mode_splits_on_sentence_boundaries() {
        let text = "The IT Manager is responsible for maintaining an asset register. \
                    Backups are performed weekly by the operations team.\n\
                    All laptops must be encrypted.";
        let clauses = ClauseExtractor::with_settings(20, SplitMode::Sentences).extract(text);
        assert_eq!(
            clauses,
            vec![
                "the it manager is responsible for maintaining an asset register.",
                "backups are performed weekly by the operations team.",
                "all laptops must be encrypted.",
            ]
        );
    }

    #[test]
    fn min_len_is_exclusive() {
        // exactly 20 characters
        let text = "abcdefghij klmnopqrs\nabcdefghij klmnopqrst";
        let clauses = ClauseExtractor::new().extract(text);
        assert_eq!(clauses, vec!["abcdefghij klmnopqrst"]);

        let everything = ClauseExtractor::with_settings(0, SplitMode::Lines).extract(text);
        assert_eq!(everything.len(), 2);
    }

    #[test]
    fn empty_text_has_no_clauses() {
        assert!(ClauseExtractor::new().extract("").is_empty());
        assert!(ClauseExtractor::with_settings(20, SplitMode::Sentences)
            .extract("   \n\n ")
            .is_empty());
    }

    #[test]
    fn split_mode_names() {
        assert_eq!(SplitMode::from_name("Lines"), Some(SplitMode::Lines));
        assert_eq!(SplitMode::from_name("sentences"), Some(SplitMode::Sentences));
        assert_eq!(SplitMode::from_name("paragraphs"), None);
    }
}
