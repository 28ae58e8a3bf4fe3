//! Remediation drafts and the parser that reads them out of model text.

use serde::{Deserialize, Serialize};

use crate::error::{DraftError, DraftResult};

/// The three free-text artifacts drafted for one gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationDraft {
    /// Why the gap matters.
    pub risk_explanation: String,
    /// A policy clause that would close the gap.
    pub rewritten_policy: String,
    /// Short- and long-term improvement actions.
    pub improvement_roadmap: String,
}

impl RemediationDraft {
    /// Text substituted when drafting failed for an item.
    pub fn placeholder() -> Self {
        Self {
            risk_explanation: "Risk explanation unavailable: drafting failed for this control."
                .to_string(),
            rewritten_policy: "Policy clause unavailable: draft this control manually.".to_string(),
            improvement_roadmap: "Roadmap unavailable: review this control manually.".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.risk_explanation.is_empty()
            && self.rewritten_policy.is_empty()
            && self.improvement_roadmap.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Section {
    Risk,
    Policy,
    Roadmap,
}

/// Split a model response into its numbered sections.
///
/// A trimmed line starting with `1.`, `2.` or `3.` opens the risk, policy or
/// roadmap section; the heading line itself is not kept. Every other
/// non-empty line is appended to the open section, joined by single spaces.
/// Text before the first heading is ignored.
pub fn parse_response(text: &str) -> DraftResult<RemediationDraft> {
    let mut draft = RemediationDraft::default();
    let mut current: Option<Section> = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with("1.") {
            current = Some(Section::Risk);
            continue;
        }
        if line.starts_with("2.") {
            current = Some(Section::Policy);
            continue;
        }
        if line.starts_with("3.") {
            current = Some(Section::Roadmap);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let target = match current {
            Some(Section::Risk) => &mut draft.risk_explanation,
            Some(Section::Policy) => &mut draft.rewritten_policy,
            Some(Section::Roadmap) => &mut draft.improvement_roadmap,
            None => continue,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(line);
    }

    if draft.is_empty() {
        return Err(DraftError::EmptyResponse);
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "Here is the requested draft.

1. Risk Explanation:
Without defined escalation paths, incidents may be handled
inconsistently and late.

2. Policy Clause:
Designated personnel shall escalate security incidents according to
a documented escalation procedure.

3. Roadmap:
Short-term: document escalation contacts.
Long-term: exercise the escalation procedure periodically.
";

    #[test]
    fn parses_numbered_sections() {
        let draft = parse_response(RESPONSE).unwrap();
        insta::assert_snapshot!(serde_json::to_string_pretty(&draft).unwrap(), @r###"
        {
          "risk_explanation": "Without defined escalation paths, incidents may be handled inconsistently and late.",
          "rewritten_policy": "Designated personnel shall escalate security incidents according to a documented escalation procedure.",
          "improvement_roadmap": "Short-term: document escalation contacts. Long-term: exercise the escalation procedure periodically."
        }
        "###);
    }

    #[test]
    fn heading_text_on_the_same_line_is_dropped() {
        let draft = parse_response("1. Risk Explanation: inline\nnext line\n").unwrap();
        assert_eq!(draft.risk_explanation, "next line");
        assert!(draft.rewritten_policy.is_empty());
    }

    #[test]
    fn missing_sections_stay_empty() {
        let draft = parse_response("2. Policy Clause:\n  Access shall be reviewed.  \n").unwrap();
        assert!(draft.risk_explanation.is_empty());
        assert_eq!(draft.rewritten_policy, "Access shall be reviewed.");
        assert!(draft.improvement_roadmap.is_empty());
    }

    #[test]
    fn response_without_sections_is_empty() {
        assert!(matches!(
            parse_response("I cannot help with that."),
            Err(DraftError::EmptyResponse)
        ));
        assert!(matches!(parse_response(""), Err(DraftError::EmptyResponse)));
        assert!(matches!(
            parse_response("1.\n2.\n3.\n"),
            Err(DraftError::EmptyResponse)
        ));
    }

    #[test]
    fn placeholder_is_not_empty() {
        assert!(!RemediationDraft::placeholder().is_empty());
        assert!(RemediationDraft::default().is_empty());
    }
}
