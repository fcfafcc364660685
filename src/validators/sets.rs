//! Membership rules over caller-supplied value sets.

use serde_json::Value;

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::Outcome;
use crate::validators::named_violation;
use crate::value_ext::ValueExt;

fn contains(set: &[&Value], value: &Value) -> bool {
    // Equal values match; numbers additionally match their numeric string
    // form so inline descriptors like "valuesIn 1 2 3" behave.
    set.iter().any(|candidate| {
        *candidate == value
            || match (candidate.as_numeric(), value.as_numeric()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
    })
}

fn listing(set: &[&Value]) -> String {
    set.iter()
        .map(|v| v.display_atom())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `valuesIn`: the value must be one of the parameter values.
pub fn values_in(
    field: &Field,
    params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let set = params.values();
    if contains(&set, field.value()) {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail(
            named_violation(
                field,
                "{name} should have only these possible values [{values}]",
            )
            .with_param("values", listing(&set)),
        ))
    }
}

/// `valuesNotIn`: the value must be none of the parameter values.
pub fn values_not_in(
    field: &Field,
    params: &Params,
    _ctx: &ValidationContext,
) -> Result<Outcome, EngineError> {
    let set = params.values();
    if contains(&set, field.value()) {
        Ok(Outcome::Fail(
            named_violation(field, "{name} should not have these values [{values}]")
                .with_param("values", listing(&set)),
        ))
    } else {
        Ok(Outcome::Pass)
    }
}
