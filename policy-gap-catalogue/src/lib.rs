//! Control catalogues and lexicons for policy-gap.
//!
//! - [`load_controls`] / [`parse_controls`]: JSON catalogues, normalized and
//!   validated before the classifier sees them
//! - [`builtin_controls`]: the bundled NIST CSF subset
//! - [`load_lexicon`] / [`parse_lexicon`]: TOML keyword tables
//!
//! ## Example
//!
//! ```
//! use policy_gap::GapClassifier;
//! use policy_gap_catalogue::builtin_controls;
//!
//! let controls = builtin_controls().unwrap();
//! let clauses = ["all laptops shall use encryption managed by the security owner."];
//! let verdicts = GapClassifier::new().evaluate_all(&controls, &clauses).unwrap();
//! assert_eq!(verdicts.len(), controls.len());
//! ```

mod builtin;
mod error;
mod lexicon;
mod loader;

pub use builtin::builtin_controls;
pub use error::{CatalogueError, CatalogueResult};
pub use lexicon::{load_lexicon, parse_lexicon};
pub use loader::{load_controls, parse_controls};
