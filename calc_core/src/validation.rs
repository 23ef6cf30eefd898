//! # Input Validation & Result Formatting
//!
//! Every calculator input is a raw string typed by the user. A value is
//! usable only when it is non-empty, numeric, finite and strictly greater
//! than zero. Anything else is the normal "form not finished yet" state.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::validation::{format_result, is_valid};
//!
//! assert!(is_valid("12.5"));
//! assert!(!is_valid("-1"));
//! assert_eq!(format_result(3.14159, 2), "3.14");
//! assert_eq!(format_result(f64::NAN, 2), "--");
//! ```

use rust_decimal::prelude::*;

use crate::errors::{CalcError, CalcResult};

/// Text shown in place of a result that cannot be computed
pub const SENTINEL: &str = "--";

/// Keys that pass the typing filter besides digits and the decimal point
pub const CONTROL_KEYS: [&str; 6] = [
    "Backspace",
    "Delete",
    "Tab",
    "Enter",
    "ArrowLeft",
    "ArrowRight",
];

/// Parse a raw value as a finite number, ignoring surrounding whitespace.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True iff `raw` is non-empty, parses as a finite number, and is > 0.
pub fn is_valid(raw: &str) -> bool {
    parse_number(raw).is_some_and(|v| v > 0.0)
}

/// Typed form of [`is_valid`]: the parsed value, or an `InvalidInput`
/// error naming the field and the reason.
pub fn parse_positive(field: &str, raw: &str) -> CalcResult<f64> {
    if raw.trim().is_empty() {
        return Err(CalcError::invalid_input(field, raw, "Value is empty"));
    }
    match parse_number(raw) {
        None => Err(CalcError::invalid_input(field, raw, "Value is not a finite number")),
        Some(v) if v <= 0.0 => Err(CalcError::invalid_input(
            field,
            raw,
            "Value must be greater than zero",
        )),
        Some(v) => Ok(v),
    }
}

/// Format a computed value with a fixed number of decimals.
///
/// Exact ties round away from zero (`0.125` -> `"0.13"`). NaN and
/// infinities produce [`SENTINEL`].
pub fn format_result(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded =
                exact.round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals, rounded)
        }
        // Beyond Decimal's range no digit after the point is significant
        None => format!("{:.*}", decimals, value),
    }
}

/// Typing filter: digits, `.` and navigation/editing keys are accepted.
///
/// `key` is a key name as reported by the UI layer: a single character
/// for printable keys, a name like `"Backspace"` otherwise.
pub fn accepts_key(key: &str) -> bool {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_digit() || c == '.';
    }
    CONTROL_KEYS.contains(&key)
}

/// Clear values that parse to a negative number; leave everything else,
/// including partial input like `"-"` or `"1."`, untouched.
pub fn sanitize_input(raw: &str) -> String {
    match parse_number(raw) {
        Some(v) if v < 0.0 => String::new(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values() {
        for raw in ["1", "0.5", "100", "2.75", "1e3", " 42 ", "+7", ".5"] {
            assert!(is_valid(raw), "expected {raw:?} to be valid");
        }
    }

    #[test]
    fn test_invalid_values() {
        for raw in ["", "-1", "0", "abc", "-0.5", "   ", "inf", "NaN", "-0", "12abc"] {
            assert!(!is_valid(raw), "expected {raw:?} to be invalid");
        }
    }

    #[test]
    fn test_parse_positive_reasons() {
        assert_eq!(parse_positive("teeth-module", "4").unwrap(), 4.0);

        match parse_positive("teeth-module", "") {
            Err(CalcError::InvalidInput { field, reason, .. }) => {
                assert_eq!(field, "teeth-module");
                assert_eq!(reason, "Value is empty");
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = parse_positive("teeth-module", "0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(f64::NAN, 2), "--");
        assert_eq!(format_result(f64::INFINITY, 2), "--");
        assert_eq!(format_result(f64::NEG_INFINITY, 3), "--");
        assert_eq!(format_result(3.14159, 2), "3.14");
        assert_eq!(format_result(3.0, 3), "3.000");
        assert_eq!(format_result(25.0, 0), "25");
        assert_eq!(format_result(160.0, 2), "160.00");
    }

    #[test]
    fn test_format_result_ties_round_away_from_zero() {
        assert_eq!(format_result(0.125, 2), "0.13");
        assert_eq!(format_result(1.0625, 3), "1.063");
        assert_eq!(format_result(2.5, 0), "3");
        assert_eq!(format_result(-0.125, 2), "-0.13");
        // 2.675 is stored just below the tie
        assert_eq!(format_result(2.675, 2), "2.67");
        assert_eq!(format_result(1e30, 2), "1000000000000000019884624838656.00");
    }

    #[test]
    fn test_accepts_key() {
        assert!(accepts_key("7"));
        assert!(accepts_key("."));
        assert!(accepts_key("Backspace"));
        assert!(accepts_key("ArrowLeft"));
        assert!(!accepts_key("e"));
        assert!(!accepts_key("-"));
        assert!(!accepts_key("Escape"));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("-5"), "");
        assert_eq!(sanitize_input("-0.1"), "");
        assert_eq!(sanitize_input("-"), "-");
        assert_eq!(sanitize_input("12"), "12");
        assert_eq!(sanitize_input("abc"), "abc");
    }
}
