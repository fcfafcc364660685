//! Extension helpers over [`serde_json::Value`].
//!
//! Field values are dynamically typed. Rules mostly care about three views
//! of a value: "is it numeric", "give me its text" and "is it empty". These
//! helpers centralise the coercions so every rule agrees on them.

use std::borrow::Cow;

use serde_json::Value;

/// Coercion helpers shared by the built-in rules.
pub trait ValueExt {
    /// Numeric view: JSON numbers, and strings that parse as numbers.
    fn as_numeric(&self) -> Option<f64>;

    /// Whether the value counts as "empty" for the `required` rule:
    /// null, empty string, empty array or empty object.
    fn is_empty_like(&self) -> bool;

    /// Text view used by string-shaped rules. Numbers and booleans render
    /// to their literal form, null to the empty string; arrays and objects
    /// have no sensible text view and also map to the empty string.
    fn coerce_str(&self) -> Cow<'_, str>;

    /// Scalar rendering for error messages and set listings.
    /// Strings render without quotes.
    fn display_atom(&self) -> String;
}

impl ValueExt for Value {
    fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn is_empty_like(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    fn coerce_str(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
        }
    }

    fn display_atom(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}

/// Formats a float without a trailing `.0` so messages read
/// "less than or equal to 100" rather than "100.0".
pub(crate) fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_view_accepts_numeric_strings() {
        assert_eq!(json!(42).as_numeric(), Some(42.0));
        assert_eq!(json!("42.5").as_numeric(), Some(42.5));
        assert_eq!(json!(" 7 ").as_numeric(), Some(7.0));
        assert_eq!(json!("abc").as_numeric(), None);
        assert_eq!(json!(true).as_numeric(), None);
        assert_eq!(json!(null).as_numeric(), None);
    }

    #[test]
    fn empty_like_covers_null_and_empty_containers() {
        assert!(json!(null).is_empty_like());
        assert!(json!("").is_empty_like());
        assert!(json!([]).is_empty_like());
        assert!(json!({}).is_empty_like());
        assert!(!json!(0).is_empty_like());
        assert!(!json!(false).is_empty_like());
        assert!(!json!("0").is_empty_like());
    }

    #[test]
    fn coerce_str_renders_scalars() {
        assert_eq!(json!("hi").coerce_str(), "hi");
        assert_eq!(json!(12).coerce_str(), "12");
        assert_eq!(json!(true).coerce_str(), "true");
        assert_eq!(json!(null).coerce_str(), "");
    }

    #[test]
    fn fmt_number_trims_integral_floats() {
        assert_eq!(fmt_number(100.0), "100");
        assert_eq!(fmt_number(0.5), "0.5");
        assert_eq!(fmt_number(-3.0), "-3");
    }
}
