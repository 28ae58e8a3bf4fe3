//! Drafting gateways: anything that turns a [`DraftRequest`] into a draft.
//!
//! [`OllamaGateway`] shells out to a local model runner. Tests and other
//! front ends plug in their own [`DraftingGateway`].

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::draft::{parse_response, RemediationDraft};
use crate::error::{DraftError, DraftResult};
use crate::prompt::PromptTemplate;
use crate::request::DraftRequest;

/// Default per-call limit for [`OllamaGateway`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default model name for [`OllamaGateway`].
pub const DEFAULT_MODEL: &str = "gemma3:12b";

/// A generator of remediation drafts.
///
/// Implementations must be shareable across concurrent calls; the runner
/// may have several requests in flight at once.
#[async_trait]
pub trait DraftingGateway: Send + Sync {
    async fn draft(&self, request: &DraftRequest) -> DraftResult<RemediationDraft>;
}

/// Runs `<program> run <model>` with the rendered prompt on stdin and parses
/// stdout.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    program: String,
    model: String,
    timeout: Duration,
    template: PromptTemplate,
}

impl Default for OllamaGateway {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl OllamaGateway {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            program: "ollama".to_string(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            template: PromptTemplate::default(),
        }
    }

    /// Use a different executable, e.g. an absolute path to `ollama`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = limit;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the raw response text.
    pub async fn complete(&self, prompt: &str) -> DraftResult<String> {
        debug!(program = %self.program, model = %self.model, "invoking model");

        let mut child = Command::new(&self.program)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DraftError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take();
        let exchange = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(prompt.as_bytes()).await {
                    // A process that exits without reading is judged by its status.
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(DraftError::Io(e)),
                    _ => {}
                }
            }
            child.wait_with_output().await.map_err(DraftError::Io)
        };

        let output = match timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => return Err(DraftError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(DraftError::Process {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DraftingGateway for OllamaGateway {
    async fn draft(&self, request: &DraftRequest) -> DraftResult<RemediationDraft> {
        let prompt = self.template.render(request);
        let response = self.complete(&prompt).await?;
        parse_response(&response)
    }
}
