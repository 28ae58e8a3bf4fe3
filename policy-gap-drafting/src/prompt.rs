//! The single merged prompt sent to the model for each gap.

use crate::request::DraftRequest;

/// Prompt builder. The governance constraints are appended as a bullet list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    constraints: Vec<String>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        let constraints = [
            "Use formal, governance-appropriate policy language",
            "Describe role-based requirements generically (e.g. \"designated personnel\", \"assigned roles\")",
            "Do not name specific job titles, individuals, or departments",
            "Do not set exact timelines in hours or days",
            "Do not add requirements beyond the stated control intent",
            "Do not cite NIST or other external standards",
            "Be concise and precise",
        ];
        Self {
            constraints: constraints.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl PromptTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the constraint list.
    pub fn with_constraints<I, S>(constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            constraints: constraints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Render the prompt for one request.
    ///
    /// The requested answer layout matches what
    /// [`parse_response`](crate::parse_response) reads back.
    pub fn render(&self, request: &DraftRequest) -> String {
        let mut prompt = format!(
            "You are assisting in drafting cybersecurity policy documentation.\n\
             \n\
             Control:\n{id} ({name})\n\
             \n\
             Control Intent:\n{intent}\n\
             \n\
             Identified Gap ({status}, severity {severity}):\n{gap}\n\
             \n\
             Tasks:\n\
             - Explain why this gap poses a security or operational risk.\n\
             - Draft a high-level formal policy clause that closes this gap.\n\
             - Suggest one short-term and one long-term improvement action.\n\
             \n\
             Answer in exactly this format:\n\
             \n\
             1. Risk Explanation:\n<text>\n\
             \n\
             2. Policy Clause:\n<text>\n\
             \n\
             3. Roadmap:\nShort-term: <text>\nLong-term: <text>\n",
            id = request.control_id,
            name = request.control_name,
            intent = request.control_intent,
            status = request.status,
            severity = request.severity,
            gap = request.gap_description,
        );

        if !self.constraints.is_empty() {
            prompt.push_str("\nConstraints:\n");
            for constraint in &self.constraints {
                prompt.push_str("- ");
                prompt.push_str(constraint);
                prompt.push('\n');
            }
        }

        prompt
    }
}
