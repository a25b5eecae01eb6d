//! Cell values and formula results.
//!
//! - [`Scalar`] - what a cell provider hands to the evaluator (number or text)
//! - [`Value`] - what evaluation produces (number, text, or an error sentinel)
//! - [`ErrorValue`] - the in-band sentinels `#ERROR!` and `#NAME?`

use std::fmt;

use super::format::{format_number, format_value};

/// A raw cell value as supplied by a [`FormulaContext`](super::FormulaContext).
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view of the value. Anything that is not a number becomes 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Scalar::Number(n) if n.is_nan() => 0.0,
            Scalar::Number(n) => *n,
            Scalar::Text(s) => coerce_number(s),
        }
    }

    /// Text view of the value, numbers in shortest round-trip form.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(n) => format_number(*n),
            Scalar::Text(s) => s.clone(),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Text(String::new())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Sentinel error values returned in-band instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorValue {
    /// `#ERROR!`: the formula could not be parsed or evaluated.
    Error,
    /// `#NAME?`: unknown function name.
    Name,
}

impl ErrorValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorValue::Error => "#ERROR!",
            ErrorValue::Name => "#NAME?",
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of evaluating a formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Error(ErrorValue),
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert back into a cell value so results can feed other formulas.
    /// Sentinels become their display text.
    pub fn to_scalar(&self) -> Scalar {
        match self {
            Value::Number(n) => Scalar::Number(*n),
            Value::Text(s) => Scalar::Text(s.clone()),
            Value::Error(e) => Scalar::Text(e.as_str().to_string()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Number(n) => Value::Number(n),
            Scalar::Text(s) => Value::Text(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

/// Parse text as a number the way a lenient spreadsheet cell would.
///
/// Accepts surrounding whitespace, decimal and exponent forms (`1.5`, `.5`,
/// `2e3`), a signed `Infinity`, and unsigned `0x`/`0o`/`0b` integers.
/// Returns None for empty text and anything else.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    let (sign, body) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if body == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rust's float parser also takes "inf" and "nan"; keep to plain decimals.
    let plain = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !plain || !body.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Numeric coercion used wherever a formula needs a number: unparseable text is 0.
pub fn coerce_number(text: &str) -> f64 {
    parse_number(text).unwrap_or(0.0)
}
