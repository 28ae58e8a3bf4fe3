//! The `analyze` pipeline: load, classify, score, optionally draft.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use policy_gap::{assess, AnalysisReport, Control, GapClassifier, GapResult, Lexicon};
use policy_gap_catalogue::{builtin_controls, load_controls, load_lexicon};
use policy_gap_document::PolicyDocument;
use policy_gap_drafting::{intents_by_id, DraftOutcome, DraftRunner, OllamaGateway};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;

/// One finished run.
#[derive(Debug, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub report: AnalysisReport,
    /// Clauses extracted from the policy.
    #[serde(skip)]
    pub clause_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drafts: Option<Vec<DraftOutcome>>,
}

pub fn load_catalogue(config: &AnalyzerConfig) -> Result<Vec<Control>> {
    match &config.catalogue.controls {
        Some(path) => load_controls(path)
            .with_context(|| format!("failed to load controls from {}", path.display())),
        None => builtin_controls().context("built-in control catalogue is invalid"),
    }
}

pub fn load_lexicon_or_default(config: &AnalyzerConfig) -> Result<Lexicon> {
    match &config.catalogue.lexicon {
        Some(path) => load_lexicon(path)
            .with_context(|| format!("failed to load lexicon from {}", path.display())),
        None => Ok(Lexicon::default()),
    }
}

pub fn build_classifier(config: &AnalyzerConfig) -> Result<GapClassifier> {
    let lexicon = load_lexicon_or_default(config)?;
    Ok(GapClassifier::with_settings(lexicon, config.classifier.settings()))
}

/// Classify one document with a ready classifier, then group and score.
pub fn assess_document(
    classifier: &GapClassifier,
    parallel: bool,
    controls: &[Control],
    document: &PolicyDocument,
) -> GapResult<AnalysisReport> {
    let verdicts = if parallel {
        classifier.evaluate_all_parallel(controls, &document.clauses)?
    } else {
        classifier.evaluate_all(controls, &document.clauses)?
    };

    Ok(assess(document.name.clone(), verdicts))
}

/// Classification and scoring only. Deterministic for fixed inputs.
pub fn classify(
    config: &AnalyzerConfig,
    controls: &[Control],
    document: &PolicyDocument,
) -> Result<AnalysisReport> {
    let classifier = build_classifier(config)?;
    Ok(assess_document(
        &classifier,
        config.classifier.parallel,
        controls,
        document,
    )?)
}

/// Run the whole pipeline for one policy file.
pub async fn run(config: &AnalyzerConfig, policy: &Path) -> Result<Analysis> {
    let controls = load_catalogue(config)?;
    let document = PolicyDocument::load(policy, &config.extractor.extractor())?;
    if document.is_empty() {
        warn!(document = %document.name, "no clauses extracted; every control will be MISSING");
    }

    let report = classify(config, &controls, &document)?;
    info!(
        document = %report.filename,
        percentage = report.summary.compliance_percentage,
        maturity = %report.summary.maturity_level,
        "analysis complete"
    );

    let drafts = if config.drafting.enabled {
        let gateway = OllamaGateway::new(config.drafting.model.clone())
            .with_program(config.drafting.program.clone())
            .with_timeout(Duration::from_secs(config.drafting.timeout_secs));
        let runner = DraftRunner::with_concurrency(gateway, config.drafting.concurrency);
        Some(runner.run(&report.raw_results, &intents_by_id(&controls)).await)
    } else {
        None
    };

    Ok(Analysis {
        report,
        clause_count: document.clauses.len(),
        drafts,
    })
}
