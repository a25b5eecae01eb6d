//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellRef`], [`column_to_number`], [`number_to_column`], [`expand_range`] -
//!   Cell reference parsing (A1 notation ↔ column/row numbers)
//! - [`evaluate`] - Evaluate a formula against a [`FormulaContext`]
//! - [`detect_circular_reference`] - Circular dependency detection
//! - [`referenced_cells`] - Parse formula dependencies
//! - [`substitute_cell_refs`] - Replace references with values for arithmetic
//! - [`format_value`] - Format results for display

mod arith;
mod cell_ref;
mod context;
mod cycle;
mod deps;
mod eval;
mod format;
mod limits;
mod preprocess;
mod value;

pub use arith::eval_arithmetic;
pub(crate) use cell_ref::cell_id_re;
pub use cell_ref::{
    CellRef, column_to_number, expand_range, number_to_column, range_cells, range_len,
};
pub use context::{FormulaContext, FormulaSource, is_formula};
pub use cycle::{detect_circular_reference, detect_circular_reference_with_limits};
pub use deps::{parse_range, referenced_cells, referenced_cells_with_limits};
pub use eval::{evaluate, evaluate_with_limits};
pub use format::{format_number, format_value};
pub use limits::{DEFAULT_MAX_RANGE_CELLS, Limits};
pub use preprocess::substitute_cell_refs;
pub use value::{ErrorValue, Scalar, Value, coerce_number, parse_number};

pub use crate::builtins::builtin_list;
