//! Policy documents: a source name plus the clauses extracted from it.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{DocumentError, DocumentResult};
use crate::extractor::ClauseExtractor;

/// Source formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// UTF-8 text (`.txt`, `.text`, `.md`, or no extension).
    PlainText,
    /// PDF or Word containers. Recognised so they can be rejected clearly.
    Unsupported,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            None | Some("txt") | Some("text") | Some("md") => DocumentFormat::PlainText,
            Some("pdf") | Some("docx") | Some("doc") => DocumentFormat::Unsupported,
            // Anything else is tried as text.
            Some(_) => DocumentFormat::PlainText,
        }
    }
}

/// A policy document reduced to its clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    /// File name or caller-supplied label.
    pub name: String,
    /// Normalized clauses in document order.
    pub clauses: Vec<String>,
}

impl PolicyDocument {
    /// Extract clauses from in-memory text.
    pub fn from_text(name: impl Into<String>, text: &str, extractor: &ClauseExtractor) -> Self {
        let name = name.into();
        let clauses = extractor.extract(text);
        debug!(
            document = %name,
            chars = text.len(),
            clauses = clauses.len(),
            "clauses extracted"
        );
        Self { name, clauses }
    }

    /// Read a plain-text policy file and extract its clauses.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; PDF and
    /// Word files are refused with [`DocumentError::UnsupportedFormat`].
    pub fn load(path: &Path, extractor: &ClauseExtractor) -> DocumentResult<Self> {
        ensure_supported(path)?;

        let bytes = fs::read(path).map_err(|e| DocumentError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_text(name, &decode(&bytes, path), extractor))
    }

    /// Extract clauses from uploaded bytes. `name` is the client's file name
    /// and decides the format the same way a path does in [`load`](Self::load).
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        extractor: &ClauseExtractor,
    ) -> DocumentResult<Self> {
        let name = name.into();
        let path = Path::new(&name);
        ensure_supported(path)?;
        let text = decode(bytes, path);
        Ok(Self::from_text(name, &text, extractor))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

fn ensure_supported(path: &Path) -> DocumentResult<()> {
    if DocumentFormat::from_path(path) == DocumentFormat::Unsupported {
        return Err(DocumentError::UnsupportedFormat {
            path: path.display().to_string(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default(),
        });
    }
    Ok(())
}

fn decode(bytes: &[u8], path: &Path) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!(path = %path.display(), "policy document is not valid UTF-8; replacing invalid bytes");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
