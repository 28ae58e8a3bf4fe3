//! Policy document loading and clause extraction for policy-gap.
//!
//! Turns a plain-text policy into the normalized clause sequence the
//! classifier consumes: lowercase, whitespace collapsed, short fragments
//! dropped.
//!
//! ## Example
//!
//! ```
//! use policy_gap_document::{ClauseExtractor, PolicyDocument};
//!
//! let doc = PolicyDocument::from_text(
//!     "inline.txt",
//!     "Scope\nAll   laptops MUST be encrypted at rest.",
//!     &ClauseExtractor::new(),
//! );
//! assert_eq!(doc.clauses, vec!["all laptops must be encrypted at rest."]);
//! ```

mod document;
mod error;
mod extractor;

pub use document::{DocumentFormat, PolicyDocument};
pub use error::{DocumentError, DocumentResult};
pub use extractor::{normalize_clause, ClauseExtractor, SplitMode, DEFAULT_MIN_CLAUSE_LEN};
