use super::Value;

/// Format a formula result for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Text(s) => s.clone(),
        Value::Error(e) => e.as_str().to_string(),
    }
}

/// Format a number for display.
///
/// Integers print without a fraction, everything else in shortest
/// round-trip form. Negative zero prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorValue;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::Text("yes".into())), "yes");
        assert_eq!(format_value(&Value::Error(ErrorValue::Error)), "#ERROR!");
    }
}
