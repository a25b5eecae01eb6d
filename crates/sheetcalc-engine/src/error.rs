//! Formula error types.
//!
//! These never reach callers of [`evaluate`](crate::engine::evaluate): the
//! evaluator maps each one to an in-band sentinel with [`FormulaError::sentinel`].

use thiserror::Error;

use crate::engine::ErrorValue;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Range {range} spans {cells} cells, limit is {limit}")]
    RangeTooLarge {
        range: String,
        cells: usize,
        limit: usize,
    },
}

impl FormulaError {
    /// The sentinel shown in place of a result.
    pub fn sentinel(&self) -> ErrorValue {
        match self {
            FormulaError::UnknownFunction(_) => ErrorValue::Name,
            _ => ErrorValue::Error,
        }
    }
}
