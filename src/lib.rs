pub mod composition;
pub mod formula;
pub mod quantity;
pub mod traits;

pub use composition::{Elements, Formula};
pub use formula::{parse_formula, to_hill_formula, FormulaError, FormulaMap};
pub use quantity::Quantity;
pub use traits::Composition;
