//! Error types for remediation drafting.

use std::time::Duration;

use thiserror::Error;

/// Errors a drafting gateway can report for a single request.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The model process could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Talking to the running process failed.
    #[error("model process I/O failed: {0}")]
    Io(#[source] std::io::Error),

    /// The process exited unsuccessfully.
    #[error("model process exited with {}: {stderr}", exit_label(.code))]
    Process { code: Option<i32>, stderr: String },

    /// No response within the configured limit.
    #[error("model did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The response contained none of the expected sections.
    #[error("model response contained no recognisable sections")]
    EmptyResponse,
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Result type for drafting operations.
pub type DraftResult<T> = Result<T, DraftError>;
