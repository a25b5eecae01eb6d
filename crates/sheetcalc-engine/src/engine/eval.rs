//! Formula evaluation.
//!
//! A formula is either a single built-in call spanning the whole formula
//! (`=SUM(A1:A3)`) or a bare arithmetic expression (`=A1+A2*2`). Anything not
//! starting with `=` is a literal and comes back unchanged.
//!
//! Function arguments are split on every comma, so commas inside quotes or
//! nested calls are not protected. A call followed by more text
//! (`=SUM(A1)+1`) is treated as arithmetic and fails.

use regex::Regex;
use std::sync::OnceLock;

use super::arith::eval_arithmetic;
use super::context::FormulaContext;
use super::preprocess::substitute_cell_refs;
use super::{Limits, Value};
use crate::builtins;
use crate::error::FormulaResult;

/// Regex that matches a whole-formula function call like `=SUM(A1,A2)`.
///
/// Captures:
/// - group 1: function name
/// - group 2: raw argument text
fn function_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^=([A-Za-z]+)\((.*)\)$").expect("function call regex must compile")
    })
}

/// Evaluate a cell's content against the cells supplied by `context`.
///
/// Never fails: problems come back as `#ERROR!` or, for unknown function
/// names, `#NAME?`.
pub fn evaluate<C>(formula: &str, context: &C) -> Value
where
    C: FormulaContext + ?Sized,
{
    evaluate_with_limits(formula, context, &Limits::default())
}

/// Like [`evaluate`], rejecting ranges larger than `limits.max_range_cells`.
pub fn evaluate_with_limits<C>(formula: &str, context: &C, limits: &Limits) -> Value
where
    C: FormulaContext + ?Sized,
{
    let Some(expression) = formula.strip_prefix('=') else {
        return Value::Text(formula.to_string());
    };

    match evaluate_formula(formula, expression, context, limits) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("formula {:?} failed: {}", formula, err);
            Value::Error(err.sentinel())
        }
    }
}

fn evaluate_formula<C>(
    formula: &str,
    expression: &str,
    context: &C,
    limits: &Limits,
) -> FormulaResult<Value>
where
    C: FormulaContext + ?Sized,
{
    if let Some(caps) = function_call_re().captures(formula) {
        let args: Vec<&str> = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split(',')
            .collect();
        return builtins::call(&caps[1], &args, context, limits);
    }

    let substituted = substitute_cell_refs(expression, context);
    eval_arithmetic(&substituted).map(Value::Number)
}
