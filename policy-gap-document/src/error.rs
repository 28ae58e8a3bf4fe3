//! Error types for document loading.

use thiserror::Error;

/// Errors that can occur while loading a policy document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read policy document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Container formats that need a dedicated text extractor.
    #[error("unsupported policy document format `.{extension}` for {path}; convert it to plain text first")]
    UnsupportedFormat { path: String, extension: String },
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
