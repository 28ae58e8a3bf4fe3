//! Remediation drafting for policy-gap.
//!
//! Given the verdicts of a finished analysis, asks a language model for three
//! free-text artifacts per gap: a risk explanation, a rewritten policy clause
//! and an improvement roadmap. Drafting never feeds back into classification.
//!
//! - [`DraftRequest`]: the facts about one gap
//! - [`PromptTemplate`] / [`parse_response`]: the single merged prompt and
//!   the reader for its numbered answer
//! - [`DraftingGateway`]: the async seam; [`OllamaGateway`] runs a local
//!   model process
//! - [`DraftRunner`]: drafts every gap with bounded concurrency, isolating
//!   failures per item

mod draft;
mod error;
mod gateway;
mod prompt;
mod request;
mod runner;

pub use draft::{parse_response, RemediationDraft};
pub use error::{DraftError, DraftResult};
pub use gateway::{DraftingGateway, OllamaGateway, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use prompt::PromptTemplate;
pub use request::DraftRequest;
pub use runner::{intents_by_id, DraftOutcome, DraftRunner, DEFAULT_CONCURRENCY};
