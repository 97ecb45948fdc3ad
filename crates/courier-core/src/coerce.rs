//! Heuristic coercion of request strings.
//!
//! [`coerce`] turns one raw token into the most specific value it spells,
//! trying in order: boolean keyword, integer, decimal, local date-time, local
//! date. Anything else stays a string. A token must match a form completely;
//! `"12abc"` is a string, not `12`.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::value::{Value, DATE_FORMAT};

fn decimal_regex() -> &'static Regex {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    DECIMAL.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid regex")
    })
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

fn date_time_regex() -> &'static Regex {
    static DATE_TIME: OnceLock<Regex> = OnceLock::new();
    DATE_TIME.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d{1,9})?)?$").expect("valid regex")
    })
}

/// Parses `true`/`on` and `false`/`off`, ignoring case.
#[must_use]
pub fn parse_bool_keyword(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("on") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("off") {
        Some(false)
    } else {
        None
    }
}

/// Parses a plain decimal literal such as `3.14`, `-2`, `.5` or `1e3`.
///
/// Named values (`inf`, `NaN`) and hexadecimal forms are rejected.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    if decimal_regex().is_match(raw) {
        raw.parse().ok()
    } else {
        None
    }
}

/// Parses an ISO-8601 local date (`2024-01-31`).
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if date_regex().is_match(raw) {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    } else {
        None
    }
}

/// Parses an ISO-8601 local date-time (`2024-01-31T10:30`, with optional
/// seconds and fraction).
#[must_use]
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if !date_time_regex().is_match(raw) {
        return None;
    }
    // Minutes-only form is 16 bytes long: yyyy-MM-ddTHH:mm
    let format = if raw.len() == 16 {
        "%Y-%m-%dT%H:%M"
    } else {
        "%Y-%m-%dT%H:%M:%S%.f"
    };
    NaiveDateTime::parse_from_str(raw, format).ok()
}

/// Converts a raw token into its best-guess typed value.
///
/// Total and pure: every input yields a value, and the same input always
/// yields the same value.
///
/// # Example
///
/// ```rust
/// use courier_core::{coerce, Value};
///
/// assert_eq!(coerce("on"), Value::Bool(true));
/// assert_eq!(coerce("42"), Value::Int(42));
/// assert_eq!(coerce("3.14"), Value::Float(3.14));
/// assert_eq!(coerce("12abc"), Value::from("12abc"));
/// ```
#[must_use]
pub fn coerce(raw: &str) -> Value {
    if let Some(b) = parse_bool_keyword(raw) {
        return Value::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Some(x) = parse_decimal(raw) {
        return Value::Float(x);
    }
    if let Some(dt) = parse_date_time(raw) {
        return Value::DateTime(dt);
    }
    if let Some(d) = parse_date(raw) {
        return Value::Date(d);
    }
    Value::Str(raw.to_string())
}

/// Coerces every token of a multi-valued parameter, keeping order.
#[must_use]
pub fn coerce_all<S: AsRef<str>>(raw: &[S]) -> Vec<Value> {
    raw.iter().map(|s| coerce(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("TRUE"), Value::Bool(true));
        assert_eq!(coerce("On"), Value::Bool(true));
        assert_eq!(coerce("false"), Value::Bool(false));
        assert_eq!(coerce("OFF"), Value::Bool(false));
        assert_eq!(coerce("yes"), Value::from("yes"));
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce("42"), Value::Int(42));
        assert_eq!(coerce("-7"), Value::Int(-7));
        assert_eq!(coerce("+5"), Value::Int(5));
        assert_eq!(coerce("0"), Value::Int(0));
    }

    #[test]
    fn test_coerce_large_integer_becomes_float() {
        assert_eq!(
            coerce("99999999999999999999"),
            Value::Float(99_999_999_999_999_999_999.0)
        );
    }

    #[test]
    fn test_coerce_decimals() {
        assert_eq!(coerce("3.14"), Value::Float(3.14));
        assert_eq!(coerce(".5"), Value::Float(0.5));
        assert_eq!(coerce("1e3"), Value::Float(1000.0));
        assert_eq!(coerce("2."), Value::Float(2.0));
    }

    #[test]
    fn test_coerce_rejects_named_floats() {
        assert_eq!(coerce("inf"), Value::from("inf"));
        assert_eq!(coerce("NaN"), Value::from("NaN"));
        assert_eq!(coerce("infinity"), Value::from("infinity"));
    }

    #[test]
    fn test_coerce_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(coerce("2024-01-01"), Value::Date(d));
        assert_eq!(
            coerce("2024-01-01T10:30"),
            Value::DateTime(d.and_hms_opt(10, 30, 0).unwrap())
        );
        assert_eq!(
            coerce("2024-01-01T10:30:15"),
            Value::DateTime(d.and_hms_opt(10, 30, 15).unwrap())
        );
        assert_eq!(
            coerce("2024-01-01T10:30:15.5"),
            Value::DateTime(d.and_hms_milli_opt(10, 30, 15, 500).unwrap())
        );
    }

    #[test]
    fn test_coerce_invalid_dates_stay_strings() {
        assert_eq!(coerce("2024-13-01"), Value::from("2024-13-01"));
        assert_eq!(coerce("2024-1-1"), Value::from("2024-1-1"));
        assert_eq!(coerce("2024-01-01T25:00"), Value::from("2024-01-01T25:00"));
    }

    #[test]
    fn test_coerce_no_partial_match() {
        assert_eq!(coerce("12abc"), Value::from("12abc"));
        assert_eq!(coerce("hello"), Value::from("hello"));
        assert_eq!(coerce(""), Value::from(""));
        assert_eq!(coerce(" 42"), Value::from(" 42"));
    }

    #[test]
    fn test_coerce_all_keeps_order() {
        let values = coerce_all(&["1", "x", "true"]);
        assert_eq!(
            values,
            vec![Value::Int(1), Value::from("x"), Value::Bool(true)]
        );
    }

    proptest! {
        #[test]
        fn prop_int_display_round_trips(i in any::<i64>()) {
            let value = Value::Int(i);
            prop_assert_eq!(coerce(&value.to_string()), value);
        }

        #[test]
        fn prop_float_display_round_trips(x in -1.0e12f64..1.0e12f64) {
            let value = Value::Float(x);
            prop_assert_eq!(coerce(&value.to_string()), value);
        }

        #[test]
        fn prop_date_display_round_trips(days in 0i64..200_000) {
            let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
            let date = base + chrono::Duration::days(days);
            let value = Value::Date(date);
            prop_assert_eq!(coerce(&value.to_string()), value);
        }

        #[test]
        fn prop_date_time_display_round_trips(secs in 0i64..3_000_000_000, millis in 0u32..1000) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
            let dt = base
                + chrono::Duration::seconds(secs)
                + chrono::Duration::milliseconds(i64::from(millis));
            let value = Value::DateTime(dt);
            prop_assert_eq!(coerce(&value.to_string()), value);
        }

        #[test]
        fn prop_words_stay_strings(s in "[g-z]{1,12}") {
            prop_assume!(parse_bool_keyword(&s).is_none());
            prop_assert_eq!(coerce(&s), Value::Str(s.clone()));
        }

        #[test]
        fn prop_coerce_is_deterministic(s in ".{0,24}") {
            prop_assert_eq!(coerce(&s), coerce(&s));
        }
    }
}
