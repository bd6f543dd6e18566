//! Chemical formula text and its element counts.
//!
//! [`parse_formula`] reads formulae such as `"(H2SO4)4"` or `"K4[Fe(CN)6]"`
//! into a [`FormulaMap`], and [`to_hill_formula`] writes a map back out in
//! Hill order.

pub mod error;
mod parser;
mod writer;

use std::collections::BTreeMap;

use crate::quantity::Quantity;
pub use error::FormulaError;
pub use writer::to_hill_formula;

/// Element symbol to quantity. Absent elements have quantity zero.
pub type FormulaMap = BTreeMap<String, Quantity>;

/// Parse a chemical formula into element counts.
///
/// Whitespace anywhere in `text` is ignored. Groups may be bracketed with
/// `()`, `[]` or `{}` and nested to any depth; a group or element may be
/// followed by an integer or decimal multiplier.
pub fn parse_formula(text: &str) -> Result<FormulaMap, FormulaError> {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    parser::parse(&chars)
}
