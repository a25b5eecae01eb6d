//! Collaborator interfaces the engine reads cells through.
//!
//! The engine owns no grid. Evaluation asks a [`FormulaContext`] for cell
//! values and cycle detection asks a [`FormulaSource`] for raw cell contents.
//! Plain closures work for both:
//!
//! ```
//! use sheetcalc_engine::engine::{Scalar, Value, evaluate};
//!
//! let ctx = |id: &str| match id {
//!     "A1" => Scalar::Number(2.0),
//!     _ => Scalar::default(),
//! };
//! assert_eq!(evaluate("=A1*21", &ctx), Value::Number(42.0));
//! ```

use super::Scalar;

/// Supplies the current value of a cell (`getCellValue`).
pub trait FormulaContext {
    fn cell_value(&self, id: &str) -> Scalar;
}

impl<F> FormulaContext for F
where
    F: Fn(&str) -> Scalar,
{
    fn cell_value(&self, id: &str) -> Scalar {
        self(id)
    }
}

/// Supplies the raw content of a cell, formula text included (`getCellFormula`).
/// Missing cells should return an empty string.
pub trait FormulaSource {
    fn cell_formula(&self, id: &str) -> String;
}

impl<F> FormulaSource for F
where
    F: Fn(&str) -> String,
{
    fn cell_formula(&self, id: &str) -> String {
        self(id)
    }
}

/// Whether raw cell content is a formula.
pub fn is_formula(content: &str) -> bool {
    content.starts_with('=')
}
