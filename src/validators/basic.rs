//! Presence and sign checks.

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::Outcome;
use crate::validators::named_violation;
use crate::value_ext::ValueExt;

/// `required`: fails for null, empty strings and empty containers.
pub fn required(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    if field.value().is_empty_like() {
        Ok(Outcome::Fail(named_violation(
            field,
            "{name} should have value",
        )))
    } else {
        Ok(Outcome::Pass)
    }
}

/// `positiveNumber`: numeric (or numeric string) strictly greater than zero.
pub fn positive_number(
    field: &Field,
    _params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let ok = field.value().as_numeric().is_some_and(|n| n > 0.0);
    if ok {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail(named_violation(
            field,
            "{name} should be a positive number",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::interpolate;
    use serde_json::json;

    fn run(
        rule: fn(&Field, &Params, &ValidationContext) -> Result<Outcome, EngineError>,
        value: serde_json::Value,
    ) -> Outcome {
        let field = Field::with_value("amount", value);
        rule(&field, &Params::None, &ValidationContext::empty()).unwrap()
    }

    #[test]
    fn required_fails_on_empty_equivalents() {
        for empty in [json!(null), json!(""), json!([]), json!({})] {
            assert!(!run(required, empty).is_pass());
        }
        for present in [json!("x"), json!(0), json!(false)] {
            assert!(run(required, present).is_pass());
        }
    }

    #[test]
    fn required_message_substitutes_field_name() {
        let field = Field::with_value("email", json!(null));
        match required(&field, &Params::None, &ValidationContext::empty()).unwrap() {
            Outcome::Fail(v) => {
                assert_eq!(
                    interpolate(v.template().unwrap(), v.params()),
                    "email should have value"
                );
            }
            Outcome::Pass => panic!("expected failure"),
        }
    }

    #[test]
    fn positive_number_requires_strictly_positive() {
        assert!(run(positive_number, json!(3)).is_pass());
        assert!(run(positive_number, json!("2.5")).is_pass());
        assert!(!run(positive_number, json!(0)).is_pass());
        assert!(!run(positive_number, json!(-1)).is_pass());
        assert!(!run(positive_number, json!("abc")).is_pass());
    }
}
