//! String length rule.

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};
use crate::value_ext::ValueExt;

/// Canonical registry name.
pub const NAME: &str = "length";

/// Validates string length (counted in Unicode scalar values) against
/// optional `min`/`max` bounds or an `exact` length.
///
/// The `exact` check runs first; then the same three-way bound scheme as
/// the numeric rule (`between`, `max`, `min`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    exact: Option<usize>,
    messages: MessageSet,
}

impl Length {
    /// Creates a length rule with optional bounds and exact length.
    pub fn new(min: Option<usize>, max: Option<usize>, exact: Option<usize>) -> Self {
        Self {
            min,
            max,
            exact,
            messages: MessageSet::from_pairs([
                ("default", "The value has invalid length"),
                (
                    "max",
                    "The value should has less than or equal to {max} characters",
                ),
                (
                    "min",
                    "The value should has greater than or equal to {min} characters",
                ),
                (
                    "between",
                    "The value should has between {min} and {max} characters",
                ),
                ("exact", "The value should has exactly {exact} characters"),
            ]),
        }
    }

    /// Exact-length convenience constructor.
    pub fn exactly(exact: usize) -> Self {
        Self::new(None, None, Some(exact))
    }

    /// Builds the rule from a parameter bag: positional
    /// `[min, max, exact]` or named `{min, max, exact}`.
    pub fn from_params(params: &Params) -> Result<Self, EngineError> {
        Ok(Self::new(
            bound(params, 0, "min")?,
            bound(params, 1, "max")?,
            bound(params, 2, "exact")?,
        ))
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }

    fn violation(&self, variant: &str) -> Violation {
        let mut v = Violation::new(self.messages.resolve(Some(variant))).with_variant(variant);
        if let Some(min) = self.min {
            v = v.with_param("min", min.to_string());
        }
        if let Some(max) = self.max {
            v = v.with_param("max", max.to_string());
        }
        if let Some(exact) = self.exact {
            v = v.with_param("exact", exact.to_string());
        }
        v
    }
}

fn bound(params: &Params, index: usize, key: &str) -> Result<Option<usize>, EngineError> {
    match params.arg(index, key) {
        None => Ok(None),
        Some(value) if value.is_null() => Ok(None),
        Some(_) => params
            .arg_usize(index, key)
            .map(Some)
            .ok_or_else(|| {
                EngineError::construction(NAME, format!("{key} is not a non-negative integer"))
            }),
    }
}

impl Rule for Length {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, _ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        let len = field.value().coerce_str().chars().count();

        if let Some(exact) = self.exact {
            if len != exact {
                return Ok(Outcome::Fail(self.violation("exact")));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if len < min || len > max {
                return Ok(Outcome::Fail(self.violation("between")));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Ok(Outcome::Fail(self.violation("max")));
            }
        }
        if let Some(min) = self.min {
            if len < min {
                return Ok(Outcome::Fail(self.violation("min")));
            }
        }
        Ok(Outcome::Pass)
    }
}
