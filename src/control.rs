//! Control records: the compliance requirements a policy is assessed against.
//!
//! Controls are owned by the catalogue and never mutated after loading. The
//! classifier only reads them, and copies their identity into every
//! [`Verdict`](crate::Verdict) it produces.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GapError, GapResult};

/// Broad compliance category a control belongs to (NIST CSF functions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    #[serde(alias = "govern", alias = "GOVERN", alias = "GV")]
    Govern,
    #[serde(alias = "identify", alias = "IDENTIFY", alias = "ID")]
    Identify,
    #[serde(alias = "protect", alias = "PROTECT", alias = "PR")]
    Protect,
    #[serde(alias = "detect", alias = "DETECT", alias = "DE")]
    Detect,
    #[serde(alias = "respond", alias = "RESPOND", alias = "RS")]
    Respond,
    #[serde(alias = "recover", alias = "RECOVER", alias = "RC")]
    Recover,
}

impl Function {
    /// Every function in CSF order.
    pub const ALL: [Function; 6] = [
        Function::Govern,
        Function::Identify,
        Function::Protect,
        Function::Detect,
        Function::Respond,
        Function::Recover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Govern => "Govern",
            Function::Identify => "Identify",
            Function::Protect => "Protect",
            Function::Detect => "Detect",
            Function::Respond => "Respond",
            Function::Recover => "Recover",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal severity label. Used for reporting only, never for classification.
///
/// Deserialization is lenient: any value that is not a recognised label
/// (case-insensitive) becomes [`Severity::Medium`], as does an absent or
/// `null` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse a severity label, falling back to `Medium` for anything unknown.
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" | "moderate" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            other => {
                warn!(severity = other, "unknown severity label; using Medium");
                Severity::Medium
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl From<Option<String>> for Severity {
    fn from(label: Option<String>) -> Self {
        label
            .map(|label| Severity::parse_lenient(&label))
            .unwrap_or_default()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single compliance requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Unique short code, e.g. `"AC-1"`.
    pub id: String,
    /// Human-readable title.
    pub name: String,
    /// Category used for grouping.
    pub function: Function,
    /// Reporting severity, `Medium` when absent.
    #[serde(default)]
    pub severity: Severity,
    /// Concepts a policy must mention for this control to be covered.
    #[serde(default)]
    pub required_elements: Vec<String>,
    /// Optional statement of what the control requires. Fed to drafting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl Control {
    /// Create a control with `Medium` severity and no intent statement.
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        function: Function,
        required_elements: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            function,
            severity: Severity::default(),
            required_elements: required_elements.into_iter().map(Into::into).collect(),
            intent: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// The intent statement, or the control name when none was given.
    pub fn intent_or_name(&self) -> &str {
        self.intent.as_deref().unwrap_or(&self.name)
    }

    /// Check the input contract the classifier relies on.
    ///
    /// Identity fields must be non-blank, and every required element must be
    /// a non-empty, trimmed, lowercase phrase that appears only once.
    pub fn validate(&self) -> GapResult<()> {
        if self.id.trim().is_empty() {
            return Err(GapError::MissingField {
                control_id: None,
                field: "id",
            });
        }
        if self.name.trim().is_empty() {
            return Err(GapError::MissingField {
                control_id: Some(self.id.clone()),
                field: "name",
            });
        }

        for (index, element) in self.required_elements.iter().enumerate() {
            if element.trim().is_empty() {
                return Err(GapError::EmptyElement {
                    control_id: self.id.clone(),
                    index,
                });
            }
            if element.trim() != element {
                return Err(GapError::ElementNotTrimmed {
                    control_id: self.id.clone(),
                    element: element.clone(),
                });
            }
            if element.chars().any(char::is_uppercase) {
                return Err(GapError::ElementNotLowercase {
                    control_id: self.id.clone(),
                    element: element.clone(),
                });
            }
            if self.required_elements[..index].contains(element) {
                return Err(GapError::DuplicateElement {
                    control_id: self.id.clone(),
                    element: element.clone(),
                });
            }
        }

        Ok(())
    }
}
