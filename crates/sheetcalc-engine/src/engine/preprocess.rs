//! Reference substitution for arithmetic formulas.
//!
//! Before a bare arithmetic formula can be evaluated, every cell reference
//! like `A1` is replaced by the referenced cell's numeric value:
//!
//! - `A1+A2*2` with `A1 = 1`, `A2 = 5` becomes `1+5*2`
//! - cells that are not numeric contribute `0`

use regex::Captures;

use super::context::FormulaContext;
use super::deps::cell_ref_re;
use super::format::format_number;

/// Replace cell references with their values coerced to numbers.
pub fn substitute_cell_refs<C>(expression: &str, context: &C) -> String
where
    C: FormulaContext + ?Sized,
{
    cell_ref_re()
        .replace_all(expression, |caps: &Captures| {
            format_number(context.cell_value(&caps[0]).to_number())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Scalar;

    fn ctx(id: &str) -> Scalar {
        match id {
            "A1" => Scalar::Number(1.0),
            "A2" => Scalar::Number(5.0),
            "B1" => Scalar::from("hello"),
            "B2" => Scalar::from(" 2.5 "),
            "C1" => Scalar::Number(-3.0),
            _ => Scalar::default(),
        }
    }

    #[test]
    fn test_substitute_numbers() {
        assert_eq!(substitute_cell_refs("A1+A2*2", &ctx), "1+5*2");
        assert_eq!(substitute_cell_refs("(A1 + C1) / 2", &ctx), "(1 + -3) / 2");
    }

    #[test]
    fn test_substitute_non_numeric_as_zero() {
        assert_eq!(substitute_cell_refs("B1+B2+Z9", &ctx), "0+2.5+0");
    }

    #[test]
    fn test_substitute_leaves_other_text() {
        assert_eq!(substitute_cell_refs("10 / 4", &ctx), "10 / 4");
        assert_eq!(substitute_cell_refs("1E3", &ctx), "1E3");
    }
}
