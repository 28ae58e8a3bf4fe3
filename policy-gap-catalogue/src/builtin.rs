//! The catalogue shipped with the crate: a NIST CSF 2.0 subset covering all
//! six functions.

use policy_gap::Control;

use crate::error::CatalogueResult;
use crate::loader::parse_controls;

const NIST_CONTROLS: &str = include_str!("../data/nist_controls.json");

/// Parse the embedded catalogue.
///
/// The data is compiled in, so an error here means the bundled file was
/// edited into an invalid state.
pub fn builtin_controls() -> CatalogueResult<Vec<Control>> {
    parse_controls(NIST_CONTROLS)
}
