//! Error types for catalogue and lexicon loading.

use policy_gap::GapError;
use thiserror::Error;

/// Errors that can occur while loading controls or a lexicon.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The file could not be read.
    #[error("failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The control catalogue is not a valid JSON array of controls.
    #[error("invalid control catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    /// The lexicon file is not valid TOML for a lexicon.
    #[error("invalid lexicon: {0}")]
    Lexicon(#[from] toml::de::Error),

    /// Two controls share an id.
    #[error("duplicate control id `{id}` in catalogue")]
    DuplicateId { id: String },

    /// A control broke the classifier's input contract.
    #[error(transparent)]
    InvalidControl(#[from] GapError),
}

/// Result type for catalogue operations.
pub type CatalogueResult<T> = Result<T, CatalogueError>;
