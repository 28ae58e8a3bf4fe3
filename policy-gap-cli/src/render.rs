//! Console rendering of an analysis.

use std::fmt::Write;

use policy_gap::{AnalysisReport, ComplianceSummary};
use policy_gap_drafting::DraftOutcome;

use crate::analyze::Analysis;

/// Full console report: verdicts by function, summary, then drafts.
pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    write_report(&mut out, &analysis.report, analysis.clause_count);
    if let Some(drafts) = &analysis.drafts {
        write_drafts(&mut out, drafts);
    }
    out
}

fn write_report(out: &mut String, report: &AnalysisReport, clause_count: usize) {
    let _ = writeln!(out, "Policy: {} ({} clauses)", report.filename, clause_count);

    for group in &report.grouped_results {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", group.function);
        for verdict in &group.verdicts {
            let _ = writeln!(
                out,
                "  {:<8}  {:<9} {} [{}]",
                verdict.status.as_str(),
                verdict.control_id,
                verdict.control_name,
                verdict.severity
            );
            if verdict.is_gap() {
                let _ = writeln!(out, "            {}", verdict.reason);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", summary_line(&report.summary));
}

/// One-line summary, e.g. `Compliance: 62.5% (Moderate); 3 adequate, ...`.
pub fn summary_line(summary: &ComplianceSummary) -> String {
    format!(
        "Compliance: {}% ({}); {} adequate, {} weak, {} missing of {} controls",
        summary.compliance_percentage,
        summary.maturity_level,
        summary.adequate,
        summary.weak,
        summary.missing,
        summary.total_controls
    )
}

fn write_drafts(out: &mut String, drafts: &[DraftOutcome]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "Remediation drafts");
    let _ = writeln!(out, "==================");

    for outcome in drafts {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {} [{}, {}]",
            outcome.control_id, outcome.control_name, outcome.status, outcome.severity
        );
        if let Some(error) = &outcome.error {
            let _ = writeln!(out, "  (drafting failed: {})", error);
        }
        let _ = writeln!(out, "  Risk:    {}", outcome.draft.risk_explanation);
        let _ = writeln!(out, "  Policy:  {}", outcome.draft.rewritten_policy);
        let _ = writeln!(out, "  Roadmap: {}", outcome.draft.improvement_roadmap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_gap::{assess, Control, CoverageStatus, Function, GapClassifier, Severity};
    use policy_gap_drafting::RemediationDraft;

    fn analysis() -> Analysis {
        let controls = vec![
            Control::new("PR.AA-05", "Access Control", Function::Protect, ["least privilege"])
                .with_severity(Severity::Critical),
            Control::new("DE.CM-01", "Continuous Monitoring", Function::Detect, ["monitoring", "logging"])
                .with_severity(Severity::High),
            Control::new("PR.DS-11", "Data Backup", Function::Protect, ["backup"]),
        ];
        let clauses = [
            "access to all systems shall follow least privilege.",
            "audit logs are kept where practical.",
        ];
        let verdicts = GapClassifier::new().evaluate_all(&controls, &clauses).unwrap();

        Analysis {
            report: assess("policy.txt", verdicts),
            clause_count: clauses.len(),
            drafts: None,
        }
    }

    #[test]
    fn renders_groups_and_summary() {
        insta::assert_snapshot!(render(&analysis()), @r###"
        Policy: policy.txt (2 clauses)

        Protect
          ADEQUATE  PR.AA-05  Access Control [Critical]
          MISSING   PR.DS-11  Data Backup [Medium]
                    No explicit policy statements addressing this control were found (missing: backup).

        Detect
          WEAK      DE.CM-01  Continuous Monitoring [High]
                    The control is only partially addressed; no policy statement covers: monitoring.

        Compliance: 50% (Moderate); 1 adequate, 1 weak, 1 missing of 3 controls
        "###);
    }

    #[test]
    fn renders_drafts_and_failures() {
        let mut analysis = analysis();
        let gaps: Vec<_> = analysis.report.gaps().cloned().collect();
        analysis.drafts = Some(vec![
            DraftOutcome {
                control_id: gaps[0].control_id.clone(),
                control_name: gaps[0].control_name.clone(),
                status: gaps[0].status,
                severity: gaps[0].severity,
                draft: RemediationDraft {
                    risk_explanation: "Activity may go unnoticed.".into(),
                    rewritten_policy: "Designated personnel shall monitor systems.".into(),
                    improvement_roadmap: "Short-term: enable alerts.".into(),
                },
                error: None,
            },
            DraftOutcome {
                control_id: gaps[1].control_id.clone(),
                control_name: gaps[1].control_name.clone(),
                status: CoverageStatus::Missing,
                severity: gaps[1].severity,
                draft: RemediationDraft::placeholder(),
                error: Some("model did not respond within 120s".into()),
            },
        ]);

        let text = render(&analysis);
        let drafts = &text[text.find("Remediation drafts").unwrap()..];
        insta::assert_snapshot!(drafts, @r###"
        Remediation drafts
        ==================

        DE.CM-01 Continuous Monitoring [WEAK, High]
          Risk:    Activity may go unnoticed.
          Policy:  Designated personnel shall monitor systems.
          Roadmap: Short-term: enable alerts.

        PR.DS-11 Data Backup [MISSING, Medium]
          (drafting failed: model did not respond within 120s)
          Risk:    Risk explanation unavailable: drafting failed for this control.
          Policy:  Policy clause unavailable: draft this control manually.
          Roadmap: Roadmap unavailable: review this control manually.
        "###);
    }
}
