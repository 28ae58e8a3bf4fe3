//! Lexicon files.
//!
//! A lexicon file is TOML. Every table is optional; omitted ones keep the
//! stock vocabulary from [`Lexicon::default`].
//!
//! ```toml
//! mandatory_terms = ["shall", "must", "is required to"]
//!
//! [synonyms]
//! "backup" = ["data backup", "backups"]
//! ```

use std::fs;
use std::path::Path;

use policy_gap::Lexicon;
use tracing::debug;

use crate::error::{CatalogueError, CatalogueResult};

/// Read a lexicon from a TOML file.
pub fn load_lexicon(path: &Path) -> CatalogueResult<Lexicon> {
    let content = fs::read_to_string(path).map_err(|e| CatalogueError::Load {
        path: path.display().to_string(),
        source: e,
    })?;
    let lexicon = parse_lexicon(&content)?;
    debug!(
        path = %path.display(),
        synonyms = lexicon.synonyms.len(),
        "lexicon loaded"
    );
    Ok(lexicon)
}

/// Parse a lexicon from TOML text. Terms are trimmed and lowercased.
pub fn parse_lexicon(content: &str) -> CatalogueResult<Lexicon> {
    let lexicon: Lexicon = toml::from_str(content)?;
    Ok(lexicon.normalized())
}
