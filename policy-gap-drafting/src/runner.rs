//! Batch drafting over a set of verdicts.
//!
//! Classification and scoring are finished before the runner starts, so a
//! failing draft can only ever cost its own item: the outcome carries a
//! placeholder and the error text, and the batch continues.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use policy_gap::{Control, CoverageStatus, Severity, Verdict};
use serde::Serialize;
use tracing::{info, warn};

use crate::draft::RemediationDraft;
use crate::gateway::DraftingGateway;
use crate::request::DraftRequest;

/// Default number of requests in flight.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// The drafting result for one gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftOutcome {
    pub control_id: String,
    pub control_name: String,
    pub status: CoverageStatus,
    pub severity: Severity,
    #[serde(flatten)]
    pub draft: RemediationDraft,
    /// Why drafting failed; `draft` is then the placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DraftOutcome {
    fn new(verdict: &Verdict, draft: RemediationDraft, error: Option<String>) -> Self {
        Self {
            control_id: verdict.control_id.clone(),
            control_name: verdict.control_name.clone(),
            status: verdict.status,
            severity: verdict.severity,
            draft,
            error,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.error.is_some()
    }
}

/// Control id to intent statement, for [`DraftRunner::run`].
pub fn intents_by_id(controls: &[Control]) -> HashMap<String, String> {
    controls
        .iter()
        .map(|control| (control.id.clone(), control.intent_or_name().to_string()))
        .collect()
}

/// Sends every non-ADEQUATE verdict to a gateway.
pub struct DraftRunner<G> {
    gateway: G,
    concurrency: usize,
}

impl<G: DraftingGateway> DraftRunner<G> {
    /// One request at a time.
    pub fn new(gateway: G) -> Self {
        Self::with_concurrency(gateway, DEFAULT_CONCURRENCY)
    }

    /// Up to `concurrency` requests in flight; zero is treated as one.
    pub fn with_concurrency(gateway: G, concurrency: usize) -> Self {
        Self {
            gateway,
            concurrency: concurrency.max(1),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Draft every gap in `verdicts`, returning outcomes in input order.
    ///
    /// `intents` maps control ids to intent statements; a verdict without an
    /// entry falls back to its control name.
    pub async fn run(
        &self,
        verdicts: &[Verdict],
        intents: &HashMap<String, String>,
    ) -> Vec<DraftOutcome> {
        let gaps: Vec<&Verdict> = verdicts.iter().filter(|v| v.is_gap()).collect();
        info!(
            gaps = gaps.len(),
            concurrency = self.concurrency,
            "drafting remediation"
        );

        let outcomes: Vec<DraftOutcome> = stream::iter(gaps)
            .map(|verdict| self.draft_one(verdict, intents))
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| o.is_placeholder()).count();
        info!(drafted = outcomes.len() - failed, failed, "drafting finished");
        outcomes
    }

    async fn draft_one(&self, verdict: &Verdict, intents: &HashMap<String, String>) -> DraftOutcome {
        let intent = intents
            .get(&verdict.control_id)
            .map(String::as_str)
            .unwrap_or(&verdict.control_name);
        let request = DraftRequest::from_verdict(verdict, intent);

        match self.gateway.draft(&request).await {
            Ok(draft) => DraftOutcome::new(verdict, draft, None),
            Err(err) => {
                warn!(
                    control_id = %verdict.control_id,
                    error = %err,
                    "drafting failed; using placeholder"
                );
                DraftOutcome::new(verdict, RemediationDraft::placeholder(), Some(err.to_string()))
            }
        }
    }
}
