//! What the gateway is asked to draft for one gap.

use policy_gap::{CoverageStatus, Severity, Verdict};
use serde::Serialize;

/// Everything a generator needs to know about one gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftRequest {
    pub control_id: String,
    pub control_name: String,
    /// What the control requires, in plain words.
    pub control_intent: String,
    /// Why the control is a gap, naming any missing elements.
    pub gap_description: String,
    pub status: CoverageStatus,
    pub severity: Severity,
}

impl DraftRequest {
    /// Build a request from a verdict and the control's intent statement.
    pub fn from_verdict(verdict: &Verdict, intent: &str) -> Self {
        Self {
            control_id: verdict.control_id.clone(),
            control_name: verdict.control_name.clone(),
            control_intent: intent.to_string(),
            gap_description: verdict.reason.clone(),
            status: verdict.status,
            severity: verdict.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_gap::{Control, Function, GapClassifier};

    #[test]
    fn weak_verdict_lists_missing_elements() {
        let control = Control::new(
            "RS.MA-01",
            "Incident Management",
            Function::Respond,
            ["incident response", "escalation"],
        );
        let verdict = GapClassifier::new()
            .evaluate(&control, &["incident handling is performed by it staff."])
            .unwrap();

        let request = DraftRequest::from_verdict(&verdict, "Define incident response roles");

        assert_eq!(request.status, CoverageStatus::Weak);
        assert_eq!(request.control_intent, "Define incident response roles");
        assert!(request.gap_description.ends_with("covers: escalation."));
    }

    #[test]
    fn intent_is_taken_verbatim() {
        let control = Control::new("DE.CM-01", "Monitoring", Function::Detect, ["monitoring"]);
        let verdict = GapClassifier::new()
            .evaluate(&control, &["nothing relevant here at all."])
            .unwrap();

        let request = DraftRequest::from_verdict(&verdict, &verdict.control_name);

        assert_eq!(request.status, CoverageStatus::Missing);
        assert_eq!(request.gap_description, verdict.reason);
        assert_eq!(request.control_intent, "Monitoring");
    }
}
