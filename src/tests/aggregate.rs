use crate::{
    assess, group, score, Control, CoverageStatus, Function, GapClassifier, MaturityLevel, Verdict,
};

fn verdict(id: &str, function: Function, status: CoverageStatus) -> Verdict {
    let control = Control::new(id, format!("Control {}", id), function, ["placeholder"]);
    let clauses: &[&str] = match status {
        CoverageStatus::Missing => &[],
        CoverageStatus::Weak => &["placeholder text without binding words."],
        CoverageStatus::Adequate => &["the owner shall keep the placeholder current."],
    };
    let verdict = GapClassifier::new().evaluate(&control, clauses).unwrap();
    assert_eq!(verdict.status, status);
    verdict
}

fn statuses(adequate: usize, weak: usize, missing: usize) -> Vec<Verdict> {
    let mut out = Vec::new();
    for i in 0..adequate {
        out.push(verdict(&format!("A-{}", i), Function::Protect, CoverageStatus::Adequate));
    }
    for i in 0..weak {
        out.push(verdict(&format!("W-{}", i), Function::Detect, CoverageStatus::Weak));
    }
    for i in 0..missing {
        out.push(verdict(&format!("M-{}", i), Function::Respond, CoverageStatus::Missing));
    }
    out
}

// ============ Grouping ============

#[test]
fn group_preserves_first_seen_order() {
    let verdicts = vec![
        verdict("PR-1", Function::Protect, CoverageStatus::Adequate),
        verdict("DE-1", Function::Detect, CoverageStatus::Weak),
        verdict("PR-2", Function::Protect, CoverageStatus::Missing),
    ];

    let grouped = group(&verdicts);

    assert_eq!(grouped.functions(), vec![Function::Protect, Function::Detect]);
    let protect: Vec<_> = grouped
        .get(Function::Protect)
        .unwrap()
        .iter()
        .map(|v| v.control_id.as_str())
        .collect();
    assert_eq!(protect, vec!["PR-1", "PR-2"]);
    assert_eq!(grouped.get(Function::Detect).unwrap().len(), 1);
}

#[test]
fn group_does_not_zero_fill() {
    let verdicts = vec![verdict("RC-1", Function::Recover, CoverageStatus::Weak)];
    let grouped = group(&verdicts);

    assert_eq!(grouped.len(), 1);
    assert!(grouped.get(Function::Identify).is_none());
    assert!(group(&[]).is_empty());
}

#[test]
fn group_counts_and_gaps() {
    let verdicts = vec![
        verdict("PR-1", Function::Protect, CoverageStatus::Adequate),
        verdict("PR-2", Function::Protect, CoverageStatus::Weak),
        verdict("PR-3", Function::Protect, CoverageStatus::Missing),
    ];
    let grouped = group(&verdicts);
    let protect = grouped.iter().next().unwrap();

    assert_eq!(protect.count(CoverageStatus::Adequate), 1);
    assert_eq!(protect.count(CoverageStatus::Missing), 1);
    let gaps: Vec<_> = protect.gaps().map(|v| v.control_id.as_str()).collect();
    assert_eq!(gaps, vec!["PR-2", "PR-3"]);
}

#[test]
fn grouped_json_keeps_key_order() {
    let verdicts = vec![
        verdict("RS-1", Function::Respond, CoverageStatus::Missing),
        verdict("ID-1", Function::Identify, CoverageStatus::Weak),
        verdict("RS-2", Function::Respond, CoverageStatus::Adequate),
    ];

    let json = serde_json::to_string(&group(&verdicts)).unwrap();
    let respond = json.find("\"Respond\"").unwrap();
    let identify = json.find("\"Identify\"").unwrap();
    assert!(respond < identify);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Respond"].as_array().unwrap().len(), 2);
    assert_eq!(value["Identify"][0]["control_id"], "ID-1");
}

// ============ Scoring ============

#[test]
fn empty_score_is_zero_and_weak() {
    let summary = score(&[]);
    assert_eq!(summary.compliance_percentage, 0.0);
    assert_eq!(summary.maturity_level, MaturityLevel::Weak);
    assert_eq!(summary.total_controls, 0);
}

#[test]
fn all_adequate_is_strong() {
    let summary = score(&statuses(7, 0, 0));
    assert_eq!(summary.compliance_percentage, 100.0);
    assert_eq!(summary.maturity_level, MaturityLevel::Strong);
    assert_eq!(summary.adequate, 7);
}

#[test]
fn exactly_eighty_percent_is_strong() {
    let summary = score(&statuses(4, 0, 1));
    assert_eq!(summary.compliance_percentage, 80.0);
    assert_eq!(summary.maturity_level, MaturityLevel::Strong);
}

#[test]
fn exactly_fifty_percent_is_moderate() {
    let summary = score(&statuses(1, 0, 1));
    assert_eq!(summary.compliance_percentage, 50.0);
    assert_eq!(summary.maturity_level, MaturityLevel::Moderate);

    let all_weak = score(&statuses(0, 3, 0));
    assert_eq!(all_weak.compliance_percentage, 50.0);
    assert_eq!(all_weak.maturity_level, MaturityLevel::Moderate);
}

#[test]
fn just_below_fifty_percent_is_weak() {
    // 4999 * 50 / 5000 = 49.99
    let summary = score(&statuses(0, 4999, 1));
    assert_eq!(summary.compliance_percentage, 49.99);
    assert_eq!(summary.maturity_level, MaturityLevel::Weak);
    assert_eq!(summary.weak, 4999);
    assert_eq!(summary.missing, 1);
}

#[test]
fn percentage_is_rounded_to_two_decimals() {
    // 100 / 300 = 33.333...
    let summary = score(&statuses(1, 0, 2));
    assert_eq!(summary.compliance_percentage, 33.33);
    assert_eq!(summary.maturity_level, MaturityLevel::Weak);

    // 250 / 300 = 83.333...
    let summary = score(&statuses(2, 1, 0));
    assert_eq!(summary.compliance_percentage, 83.33);
    assert_eq!(summary.maturity_level, MaturityLevel::Strong);
}

// ============ Reports ============

#[test]
fn assess_bundles_grouping_and_score() {
    let verdicts = statuses(1, 1, 1);
    let report = assess("weak_policy.txt", verdicts.clone());

    assert_eq!(report.filename, "weak_policy.txt");
    assert_eq!(report.raw_results, verdicts);
    assert_eq!(report.grouped_results, group(&verdicts));
    assert_eq!(report.summary, score(&verdicts));
    assert_eq!(report.gaps().count(), 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["compliance_percentage"], 50.0);
    assert_eq!(json["summary"]["maturity_level"], "Moderate");
    assert!(json["grouped_results"]["Protect"].is_array());
    assert_eq!(json["raw_results"].as_array().unwrap().len(), 3);
}
