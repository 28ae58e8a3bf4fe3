//! Error types for the classification core.

use thiserror::Error;

/// Input contract violations detected before a verdict is produced.
///
/// Verdicts feed audit trails, so a control with broken identity or malformed
/// required elements is rejected rather than classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GapError {
    /// A required identity field is blank.
    #[error("control {} is missing required field `{field}`", .control_id.as_deref().unwrap_or("<unknown>"))]
    MissingField {
        control_id: Option<String>,
        field: &'static str,
    },

    /// A required element is empty or whitespace.
    #[error("control {control_id}: required element #{index} is empty")]
    EmptyElement { control_id: String, index: usize },

    /// Leading or trailing whitespace would stop the element matching at clause edges.
    #[error("control {control_id}: required element {element:?} has surrounding whitespace")]
    ElementNotTrimmed { control_id: String, element: String },

    /// Required elements are matched against lowercase clauses.
    #[error("control {control_id}: required element {element:?} is not lowercase")]
    ElementNotLowercase { control_id: String, element: String },

    /// Required elements form a set.
    #[error("control {control_id}: required element {element:?} is listed more than once")]
    DuplicateElement { control_id: String, element: String },
}

/// Result type for classification operations.
pub type GapResult<T> = Result<T, GapError>;
