//! Numeric range rule.

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};
use crate::value_ext::{fmt_number, ValueExt};

/// Canonical registry name.
pub const NAME: &str = "numeric";

/// Validates that a value is numeric and, optionally, within `[min, max]`.
///
/// Bound checks follow a three-way scheme: when both bounds are set and the
/// value falls outside, the `between` message applies; otherwise the `max`
/// bound is checked first, then `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct Numeric {
    min: Option<f64>,
    max: Option<f64>,
    messages: MessageSet,
}

impl Numeric {
    /// Creates a numeric rule with optional bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            messages: MessageSet::from_pairs([
                ("default", "The value should be a numeric value"),
                ("max", "The value should be less than or equal to {max}"),
                ("min", "The value should be greater than or equal to {min}"),
                ("between", "The value should be between {min} and {max}"),
            ]),
        }
    }

    /// Builds the rule from a descriptor parameter bag:
    /// positional `[min, max]` or named `{min, max}`.
    pub fn from_params(params: &Params) -> Result<Self, EngineError> {
        let min = bound(params, 0, "min")?;
        let max = bound(params, 1, "max")?;
        Ok(Self::new(min, max))
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }

    fn violation(&self, variant: &str) -> Violation {
        let mut v = Violation::new(self.messages.resolve(Some(variant))).with_variant(variant);
        if let Some(min) = self.min {
            v = v.with_param("min", fmt_number(min));
        }
        if let Some(max) = self.max {
            v = v.with_param("max", fmt_number(max));
        }
        v
    }
}

fn bound(params: &Params, index: usize, key: &str) -> Result<Option<f64>, EngineError> {
    match params.arg(index, key) {
        None => Ok(None),
        Some(value) if value.is_null() => Ok(None),
        Some(value) => value
            .as_numeric()
            .map(Some)
            .ok_or_else(|| EngineError::construction(NAME, format!("{key} is not numeric"))),
    }
}

impl Rule for Numeric {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, _ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        let Some(value) = field.value().as_numeric() else {
            return Ok(Outcome::Fail(
                Violation::new(self.messages.resolve(None)),
            ));
        };

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if value < min || value > max {
                return Ok(Outcome::Fail(self.violation("between")));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Ok(Outcome::Fail(self.violation("max")));
            }
        }
        if let Some(min) = self.min {
            if value < min {
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

    fn outcome(rule: &Numeric, value: serde_json::Value) -> Outcome {
        let field = Field::with_value("n", value);
        rule.validate(&field, &ValidationContext::empty()).unwrap()
    }

    fn failed_message(rule: &Numeric, value: serde_json::Value) -> String {
        match outcome(rule, value) {
            Outcome::Fail(v) => interpolate(v.template().unwrap(), v.params()),
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn non_numeric_gets_default_message() {
        let rule = Numeric::new(None, None);
        assert_eq!(
            failed_message(&rule, json!("abc")),
            "The value should be a numeric value"
        );
        assert!(outcome(&rule, json!("12.5")).is_pass());
    }

    #[test]
    fn both_bounds_use_between_variant() {
        let rule = Numeric::new(Some(10.0), Some(100.0));
        assert_eq!(
            failed_message(&rule, json!(500)),
            "The value should be between 10 and 100"
        );
        assert!(outcome(&rule, json!(50)).is_pass());
        assert!(outcome(&rule, json!(10)).is_pass());
        assert!(outcome(&rule, json!(100)).is_pass());
    }

    #[test]
    fn single_bounds_use_their_own_variants() {
        let max_only = Numeric::new(None, Some(100.0));
        assert_eq!(
            failed_message(&max_only, json!(101)),
            "The value should be less than or equal to 100"
        );

        let min_only = Numeric::new(Some(10.0), None);
        assert_eq!(
            failed_message(&min_only, json!(9)),
            "The value should be greater than or equal to 10"
        );
    }

    #[test]
    fn zero_bound_is_honored() {
        let rule = Numeric::new(Some(0.0), None);
        assert!(!outcome(&rule, json!(-1)).is_pass());
        assert!(outcome(&rule, json!(0)).is_pass());
    }

    #[test]
    fn from_params_accepts_positional_and_named() {
        let positional = Numeric::from_params(&Params::from(vec![json!(10), json!(100)])).unwrap();
        assert_eq!(positional, Numeric::new(Some(10.0), Some(100.0)));

        let named =
            Numeric::from_params(&Params::from(json!({"min": "10", "max": 100}))).unwrap();
        assert_eq!(named, Numeric::new(Some(10.0), Some(100.0)));

        let err = Numeric::from_params(&Params::single(json!("abc"))).unwrap_err();
        assert!(matches!(err, EngineError::Construction { .. }));
    }

    #[test]
    fn set_message_replaces_a_default() {
        let mut rule = Numeric::new(None, Some(10.0));
        rule.set_message("max", "at most {max}!");
        assert_eq!(failed_message(&rule, json!(11)), "at most 10!");
    }
}
