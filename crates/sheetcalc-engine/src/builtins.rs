//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing built-in names are ALL CAPS (e.g. `SUM`, `AVERAGE`);
//!   lookup is case-insensitive.
//! - Arguments arrive as raw comma-separated text. Each one is resolved to a
//!   cell value, a range of cell values, or a literal before the function runs.
//! - If you add a new built-in, add a row to `BUILTINS`.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::engine::{
    CellRef, FormulaContext, Limits, Scalar, Value, cell_id_re, coerce_number, parse_number,
    range_cells, range_len,
};
use crate::error::{FormulaError, FormulaResult};

/// A function argument after reference resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Arg {
    /// Literal text as written (trimmed).
    Literal(String),
    /// Value of a single referenced cell.
    Cell(Scalar),
    /// Values of a range, columns outer and rows inner.
    Range(Vec<Scalar>),
}

type BuiltinFn = fn(&[Arg]) -> FormulaResult<Value>;

#[derive(Debug, Clone, Copy)]
enum Arity {
    Variadic,
    Exact(usize),
}

pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
    arity: Arity,
    call: BuiltinFn,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "SUM",
        description: "Sum of the arguments",
        arity: Arity::Variadic,
        call: fn_sum,
    },
    Builtin {
        name: "AVERAGE",
        description: "Arithmetic mean of the arguments",
        arity: Arity::Variadic,
        call: fn_average,
    },
    Builtin {
        name: "MIN",
        description: "Smallest argument",
        arity: Arity::Variadic,
        call: fn_min,
    },
    Builtin {
        name: "MAX",
        description: "Largest argument",
        arity: Arity::Variadic,
        call: fn_max,
    },
    Builtin {
        name: "COUNT",
        description: "Number of numeric arguments",
        arity: Arity::Variadic,
        call: fn_count,
    },
    Builtin {
        name: "PRODUCT",
        description: "Product of the arguments",
        arity: Arity::Variadic,
        call: fn_product,
    },
    Builtin {
        name: "CONCATENATE",
        description: "Join the arguments as text",
        arity: Arity::Variadic,
        call: fn_concatenate,
    },
    Builtin {
        name: "IF",
        description: "IF(condition, then, else): non-zero condition picks then",
        arity: Arity::Exact(3),
        call: fn_if,
    },
    Builtin {
        name: "ROUND",
        description: "ROUND(value, digits): round half up to digits decimal places",
        arity: Arity::Exact(2),
        call: fn_round,
    },
];

/// Look up a built-in by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Names and descriptions of every built-in, in table order.
pub fn builtin_list() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTINS.iter().map(|b| (b.name, b.description))
}

/// Regex that matches a whole-argument range like `A1:B5`.
fn range_arg_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z]+[0-9]+):([A-Z]+[0-9]+)$").expect("range argument regex must compile")
    })
}

/// Resolve raw arguments and run the named built-in.
pub(crate) fn call<C>(
    name: &str,
    raw_args: &[&str],
    context: &C,
    limits: &Limits,
) -> FormulaResult<Value>
where
    C: FormulaContext + ?Sized,
{
    let builtin = lookup(name).ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    if let Arity::Exact(expected) = builtin.arity
        && raw_args.len() != expected
    {
        return Err(FormulaError::ArgumentCount {
            function: builtin.name,
            expected,
            actual: raw_args.len(),
        });
    }

    let args = raw_args
        .iter()
        .map(|raw| resolve_arg(raw, context, limits))
        .collect::<FormulaResult<Vec<_>>>()?;

    (builtin.call)(&args)
}

fn resolve_arg<C>(raw: &str, context: &C, limits: &Limits) -> FormulaResult<Arg>
where
    C: FormulaContext + ?Sized,
{
    let arg = raw.trim();

    if cell_id_re().is_match(arg) {
        return Ok(Arg::Cell(context.cell_value(arg)));
    }

    if let Some(caps) = range_arg_re().captures(arg) {
        let (Some(start), Some(end)) = (CellRef::parse(&caps[1]), CellRef::parse(&caps[2])) else {
            return Ok(Arg::Range(Vec::new()));
        };
        let cells = range_len(&start, &end).unwrap_or(usize::MAX);
        if cells > limits.max_range_cells {
            return Err(FormulaError::RangeTooLarge {
                range: arg.to_string(),
                cells,
                limit: limits.max_range_cells,
            });
        }
        let values = range_cells(start, end)
            .map(|cell| context.cell_value(&cell.to_string()))
            .collect();
        return Ok(Arg::Range(values));
    }

    Ok(Arg::Literal(arg.to_string()))
}

/// Flatten arguments to numbers; anything non-numeric counts as 0.
fn numbers(args: &[Arg]) -> Vec<f64> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Arg::Literal(s) => out.push(coerce_number(s)),
            Arg::Cell(v) => out.push(v.to_number()),
            Arg::Range(values) => out.extend(values.iter().map(Scalar::to_number)),
        }
    }
    out
}

/// Flatten arguments to their text forms.
fn texts(args: &[Arg]) -> Vec<String> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Arg::Literal(s) => out.push(unquote(s).to_string()),
            Arg::Cell(v) => out.push(v.to_text()),
            Arg::Range(values) => out.extend(values.iter().map(Scalar::to_text)),
        }
    }
    out
}

/// Strip one pair of surrounding double quotes.
fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

/// Single (non-range) argument as a number, for positional functions.
fn positional_number(function: &str, arg: &Arg) -> FormulaResult<f64> {
    match arg {
        Arg::Literal(s) => Ok(coerce_number(s)),
        Arg::Cell(v) => Ok(v.to_number()),
        Arg::Range(_) => Err(FormulaError::Evaluation(format!(
            "{} does not accept ranges",
            function
        ))),
    }
}

/// Single (non-range) argument in its raw form, for positional functions.
fn positional_value(function: &str, arg: &Arg) -> FormulaResult<Value> {
    match arg {
        Arg::Literal(s) => Ok(match parse_number(s) {
            Some(n) => Value::Number(n),
            None => Value::Text(unquote(s).to_string()),
        }),
        Arg::Cell(v) => Ok(Value::from(v.clone())),
        Arg::Range(_) => Err(FormulaError::Evaluation(format!(
            "{} does not accept ranges",
            function
        ))),
    }
}

fn fn_sum(args: &[Arg]) -> FormulaResult<Value> {
    Ok(Value::Number(numbers(args).iter().fold(0.0, |acc, n| acc + n)))
}

/// Zero arguments give NaN.
fn fn_average(args: &[Arg]) -> FormulaResult<Value> {
    let values = numbers(args);
    let sum = values.iter().fold(0.0, |acc, n| acc + n);
    Ok(Value::Number(sum / values.len() as f64))
}

fn fn_min(args: &[Arg]) -> FormulaResult<Value> {
    Ok(Value::Number(numbers(args).into_iter().fold(f64::INFINITY, f64::min)))
}

fn fn_max(args: &[Arg]) -> FormulaResult<Value> {
    Ok(Value::Number(numbers(args).into_iter().fold(f64::NEG_INFINITY, f64::max)))
}

fn fn_count(args: &[Arg]) -> FormulaResult<Value> {
    let count = numbers(args).iter().filter(|n| !n.is_nan()).count();
    Ok(Value::Number(count as f64))
}

fn fn_product(args: &[Arg]) -> FormulaResult<Value> {
    Ok(Value::Number(numbers(args).iter().fold(1.0, |acc, n| acc * n)))
}

fn fn_concatenate(args: &[Arg]) -> FormulaResult<Value> {
    Ok(Value::Text(texts(args).concat()))
}

fn fn_if(args: &[Arg]) -> FormulaResult<Value> {
    let condition = positional_number("IF", &args[0])?;
    let branch = if condition != 0.0 { &args[1] } else { &args[2] };
    positional_value("IF", branch)
}

fn fn_round(args: &[Arg]) -> FormulaResult<Value> {
    let value = positional_number("ROUND", &args[0])?;
    let digits = positional_number("ROUND", &args[1])?;
    Ok(Value::Number(round_half_up(value, digits)))
}

/// Decimal places a `Decimal` can carry.
const MAX_DECIMAL_DIGITS: i64 = 28;

/// Round to `digits` decimal places, ties toward positive infinity
/// (2.5 -> 3, -2.5 -> -2). `digits` is truncated to an integer; negative
/// digits round to tens, hundreds, ...
///
/// Works on the shortest decimal form of `value`, so 1.005 rounds to 1.01.
/// Values a `Decimal` cannot hold are returned unchanged.
fn round_half_up(value: f64, digits: f64) -> f64 {
    if !value.is_finite() || !digits.is_finite() {
        return value;
    }
    let Ok(decimal) = Decimal::from_str(&value.to_string()) else {
        return value;
    };

    let strategy = if decimal.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };

    let digits = (digits.trunc() as i64).clamp(-MAX_DECIMAL_DIGITS, MAX_DECIMAL_DIGITS);
    let rounded = if digits >= 0 {
        Some(decimal.round_dp_with_strategy(digits as u32, strategy))
    } else {
        let factor = (0..-digits).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(Decimal::TEN));
        factor.and_then(|factor| {
            decimal
                .checked_div(factor)?
                .round_dp_with_strategy(0, strategy)
                .checked_mul(factor)
        })
    };

    rounded
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Arg {
        Arg::Literal(s.to_string())
    }

    fn num(n: f64) -> Arg {
        Arg::Cell(Scalar::Number(n))
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("sum").map(|b| b.name), Some("SUM"));
        assert_eq!(lookup("Average").map(|b| b.name), Some("AVERAGE"));
        assert!(lookup("FOO").is_none());
    }

    #[test]
    fn test_aggregates_flatten_ranges() {
        let args = [num(1.0), Arg::Range(vec![2.0.into(), "3".into(), "x".into()]), lit("4")];
        assert_eq!(fn_sum(&args).unwrap(), Value::Number(10.0));
        assert_eq!(fn_product(&args).unwrap(), Value::Number(0.0));
        assert_eq!(fn_min(&args).unwrap(), Value::Number(0.0));
        assert_eq!(fn_max(&args).unwrap(), Value::Number(4.0));
        assert_eq!(fn_count(&args).unwrap(), Value::Number(5.0));
        assert_eq!(fn_average(&args).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_empty_aggregates() {
        let empty = [Arg::Range(Vec::new())];
        assert_eq!(fn_sum(&empty).unwrap(), Value::Number(0.0));
        assert_eq!(fn_product(&empty).unwrap(), Value::Number(1.0));
        assert_eq!(fn_min(&empty).unwrap(), Value::Number(f64::INFINITY));
        assert_eq!(fn_max(&empty).unwrap(), Value::Number(f64::NEG_INFINITY));
        assert!(fn_average(&empty).unwrap().as_number().unwrap().is_nan());
    }

    #[test]
    fn test_concatenate_uses_raw_text() {
        let args = [
            Arg::Cell("Hello".into()),
            lit("\" \""),
            Arg::Range(vec![2.0.into(), 0.5.into()]),
            lit("x"),
        ];
        assert_eq!(fn_concatenate(&args).unwrap(), Value::Text("Hello 20.5x".into()));
    }

    #[test]
    fn test_if_returns_raw_branch() {
        let args = [num(1.0), Arg::Cell("yes".into()), Arg::Cell("no".into())];
        assert_eq!(fn_if(&args).unwrap(), Value::Text("yes".into()));
        let args = [lit("0"), lit("\"a\""), lit("2")];
        assert_eq!(fn_if(&args).unwrap(), Value::Number(2.0));
        let args = [Arg::Range(vec![]), lit("1"), lit("2")];
        assert!(fn_if(&args).is_err());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5, 0.0), 3.0);
        assert_eq!(round_half_up(-2.5, 0.0), -2.0);
        assert_eq!(round_half_up(1.005, 2.0), 1.01);
        assert_eq!(round_half_up(3.14159, 3.0), 3.142);
        assert_eq!(round_half_up(1234.5, -2.0), 1200.0);
        assert_eq!(round_half_up(1250.0, -2.0), 1300.0);
        assert_eq!(round_half_up(2.675, 2.9), 2.68);
        assert_eq!(round_half_up(1e300, 2.0), 1e300);
        assert!(round_half_up(f64::NAN, 2.0).is_nan());
    }
}
