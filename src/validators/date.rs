//! Date parsing and range rule.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};
use crate::value_ext::ValueExt;

/// Canonical registry name.
pub const NAME: &str = "date";

/// Default format when none is supplied.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Validates that a value parses against a chrono format string and,
/// optionally, falls within `[min, max]` bounds given in the same format.
///
/// Parsing is strict: the parsed date must render back to the exact input
/// (round-trip check), so `2024-2-30`-style near-misses fail with the
/// `format` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    format: String,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
    min_raw: Option<String>,
    max_raw: Option<String>,
    messages: MessageSet,
}

impl Date {
    /// Creates a date rule. Bound strings must parse with `format`.
    pub fn new(
        format: impl Into<String>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<Self, EngineError> {
        let format = format.into();
        let min_parsed = parse_bound(min, &format, "min")?;
        let max_parsed = parse_bound(max, &format, "max")?;
        Ok(Self {
            min: min_parsed,
            max: max_parsed,
            min_raw: min.map(str::to_string),
            max_raw: max.map(str::to_string),
            messages: MessageSet::from_pairs([
                ("default", "The value should be a date"),
                ("max", "The value should be less than or equal to {max}"),
                ("min", "The value should be greater than or equal to {min}"),
                ("between", "The value should be between {min} and {max}"),
                ("format", "The value should be have the {format} format"),
            ]),
            format,
        })
    }

    /// Date rule with the default `%Y-%m-%d` format and no bounds.
    pub fn ymd() -> Self {
        Self::new(DEFAULT_FORMAT, None, None).expect("no bounds to parse")
    }

    /// Builds the rule from a parameter bag: positional
    /// `[format, min, max]` or named `{format, min, max}`.
    pub fn from_params(params: &Params) -> Result<Self, EngineError> {
        let format = params.arg_str(0, "format").unwrap_or(DEFAULT_FORMAT);
        let min = params.arg_str(1, "min");
        let max = params.arg_str(2, "max");
        Self::new(format, min, max)
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }

    fn violation(&self, variant: &str) -> Violation {
        let mut v = Violation::new(self.messages.resolve(Some(variant)))
            .with_variant(variant)
            .with_param("format", self.format.clone());
        if let Some(min) = &self.min_raw {
            v = v.with_param("min", min.clone());
        }
        if let Some(max) = &self.max_raw {
            v = v.with_param("max", max.clone());
        }
        v
    }
}

/// Parses `raw` with `format`, accepting date-and-time or date-only
/// formats.
fn parse_datetime(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, format)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn parse_bound(
    raw: Option<&str>,
    format: &str,
    key: &str,
) -> Result<Option<NaiveDateTime>, EngineError> {
    match raw {
        None => Ok(None),
        Some(raw) => parse_datetime(raw, format).map(Some).ok_or_else(|| {
            EngineError::construction(NAME, format!("{key} bound `{raw}` does not match `{format}`"))
        }),
    }
}

impl Rule for Date {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, _ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        let raw = field.value().coerce_str();
        let parsed = parse_datetime(&raw, &self.format)
            .filter(|dt| dt.format(&self.format).to_string() == *raw);
        let Some(date) = parsed else {
            return Ok(Outcome::Fail(self.violation("format")));
        };

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if date < min || date > max {
                return Ok(Outcome::Fail(self.violation("between")));
            }
        }
        if let Some(max) = self.max {
            if date > max {
                return Ok(Outcome::Fail(self.violation("max")));
            }
        }
        if let Some(min) = self.min {
            if date < min {
                return Ok(Outcome::Fail(self.violation("min")));
            }
        }
        Ok(Outcome::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::interpolate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn outcome(rule: &Date, value: &str) -> Outcome {
        let field = Field::with_value("when", json!(value));
        rule.validate(&field, &ValidationContext::empty()).unwrap()
    }

    fn failed_message(rule: &Date, value: &str) -> String {
        match outcome(rule, value) {
            Outcome::Fail(v) => interpolate(v.template().unwrap(), v.params()),
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn parses_against_format() {
        let rule = Date::ymd();
        assert!(outcome(&rule, "2024-02-29").is_pass());
        assert_eq!(
            failed_message(&rule, "29/02/2024"),
            "The value should be have the %Y-%m-%d format"
        );
    }

    #[test]
    fn round_trip_mismatch_fails() {
        // parses as a date but does not render back identically
        let rule = Date::ymd();
        assert!(!outcome(&rule, "2024-2-9").is_pass());
    }

    #[test]
    fn bounds_use_between_max_min_variants() {
        let rule = Date::new(DEFAULT_FORMAT, Some("2024-01-01"), Some("2024-12-31")).unwrap();
        assert!(outcome(&rule, "2024-06-15").is_pass());
        assert_eq!(
            failed_message(&rule, "2025-01-01"),
            "The value should be between 2024-01-01 and 2024-12-31"
        );

        let max_only = Date::new(DEFAULT_FORMAT, None, Some("2024-12-31")).unwrap();
        assert_eq!(
            failed_message(&max_only, "2025-01-01"),
            "The value should be less than or equal to 2024-12-31"
        );

        let min_only = Date::new(DEFAULT_FORMAT, Some("2024-01-01"), None).unwrap();
        assert_eq!(
            failed_message(&min_only, "2023-12-31"),
            "The value should be greater than or equal to 2024-01-01"
        );
    }

    #[test]
    fn custom_format_with_time() {
        let rule = Date::new("%Y-%m-%d %H:%M", None, None).unwrap();
        assert!(outcome(&rule, "2024-06-15 09:30").is_pass());
        assert!(!outcome(&rule, "2024-06-15").is_pass());
    }

    #[test]
    fn bad_bound_is_a_construction_error() {
        let err = Date::new(DEFAULT_FORMAT, Some("not-a-date"), None).unwrap_err();
        assert!(matches!(err, EngineError::Construction { .. }));
    }

    #[test]
    fn from_params_defaults_format() {
        let rule = Date::from_params(&Params::None).unwrap();
        assert!(outcome(&rule, "2030-01-02").is_pass());

        let named = Date::from_params(&Params::from(
            json!({"format": "%d/%m/%Y", "min": "01/01/2020"}),
        ))
        .unwrap();
        assert!(outcome(&named, "02/03/2021").is_pass());
        assert!(!outcome(&named, "31/12/2019").is_pass());
    }
}
