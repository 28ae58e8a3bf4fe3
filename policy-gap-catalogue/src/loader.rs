//! Control catalogue loading.
//!
//! A catalogue is a JSON array of control objects. Loading normalizes the
//! element phrases (trimmed, lowercased), then enforces the contract the
//! classifier relies on:
//!
//! - every control passes [`Control::validate`]
//! - control ids are unique within the catalogue
//!
//! The order of the array is preserved; it drives the order of verdicts and
//! of function groups in the report.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use policy_gap::Control;
use tracing::debug;

use crate::error::{CatalogueError, CatalogueResult};

/// Read and validate a control catalogue from a JSON file.
pub fn load_controls(path: &Path) -> CatalogueResult<Vec<Control>> {
    let content = fs::read_to_string(path).map_err(|e| CatalogueError::Load {
        path: path.display().to_string(),
        source: e,
    })?;
    let controls = parse_controls(&content)?;
    debug!(path = %path.display(), controls = controls.len(), "control catalogue loaded");
    Ok(controls)
}

/// Parse and validate a control catalogue from JSON text.
pub fn parse_controls(json: &str) -> CatalogueResult<Vec<Control>> {
    let raw: Vec<Control> = serde_json::from_str(json)?;
    normalize_and_validate(raw)
}

fn normalize_and_validate(raw: Vec<Control>) -> CatalogueResult<Vec<Control>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut controls = Vec::with_capacity(raw.len());

    for mut control in raw {
        control.id = control.id.trim().to_string();
        for element in &mut control.required_elements {
            *element = element.trim().to_lowercase();
        }
        control.validate()?;

        if !seen.insert(control.id.clone()) {
            return Err(CatalogueError::DuplicateId { id: control.id });
        }
        controls.push(control);
    }

    Ok(controls)
}
