//! Uniqueness rule backed by an injected collaborator.
//!
//! The engine has no idea what "unique" means for a dataset; a caller
//! supplies a [`UniqueHandler`] (typically closing over a repository or
//! connection) and the rule passes its fixed parameters plus the field
//! value through. The call is synchronous and blocking; handler errors
//! propagate to the caller unchanged.

use std::sync::Arc;

use serde_json::Value;

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::{BoxError, EngineError};
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};

/// Canonical registry name.
pub const NAME: &str = "unique";

/// External collaborator answering "is this value unique?".
pub trait UniqueHandler: Send + Sync {
    /// Returns whether `value` is unique with respect to `params`
    /// (e.g. a table and column name). Errors propagate unchanged.
    fn check(&self, params: &Params, value: &Value) -> Result<bool, BoxError>;
}

impl<F> UniqueHandler for F
where
    F: Fn(&Params, &Value) -> Result<bool, BoxError> + Send + Sync,
{
    fn check(&self, params: &Params, value: &Value) -> Result<bool, BoxError> {
        self(params, value)
    }
}

/// Validates a value through an injected uniqueness handler.
#[derive(Clone)]
pub struct Unique {
    handler: Arc<dyn UniqueHandler>,
    params: Params,
    messages: MessageSet,
}

impl Unique {
    /// Creates a uniqueness rule around a handler and its fixed
    /// parameters.
    pub fn new(handler: Arc<dyn UniqueHandler>, params: Params) -> Self {
        Self {
            handler,
            params,
            messages: MessageSet::from_pairs([
                ("default", "The value should be unique"),
                ("unique", "The value should be unique"),
            ]),
        }
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }
}

impl std::fmt::Debug for Unique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unique")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Rule for Unique {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, _ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        let unique = self
            .handler
            .check(&self.params, field.value())
            .map_err(EngineError::collaborator)?;
        if unique {
            Ok(Outcome::Pass)
        } else {
            Ok(Outcome::Fail(
                Violation::new(self.messages.resolve(None)).with_variant("unique"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler(result: Result<bool, &'static str>) -> Arc<dyn UniqueHandler> {
        Arc::new(move |_params: &Params, _value: &Value| {
            result.map_err(|e| -> BoxError { e.into() })
        })
    }

    #[test]
    fn passes_through_handler_verdict() {
        let field = Field::with_value("email", json!("a@b.com"));
        let ctx = ValidationContext::empty();

        let rule = Unique::new(handler(Ok(true)), Params::None);
        assert!(rule.validate(&field, &ctx).unwrap().is_pass());

        let rule = Unique::new(handler(Ok(false)), Params::None);
        assert!(!rule.validate(&field, &ctx).unwrap().is_pass());
    }

    #[test]
    fn handler_errors_propagate_as_collaborator_failures() {
        let field = Field::with_value("email", json!("a@b.com"));
        let rule = Unique::new(handler(Err("connection refused")), Params::None);
        let err = rule.validate(&field, &ValidationContext::empty()).unwrap_err();
        assert!(matches!(err, EngineError::Collaborator(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn handler_sees_fixed_params_and_value() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let seen_in = Arc::clone(&seen);
        let rule = Unique::new(
            Arc::new(move |params: &Params, value: &Value| {
                *seen_in.lock().unwrap() = Some((params.clone(), value.clone()));
                Ok(true)
            }),
            Params::from(vec![json!("users"), json!("email")]),
        );

        let field = Field::with_value("email", json!("a@b.com"));
        rule.validate(&field, &ValidationContext::empty()).unwrap();

        let (params, value) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(params.positional(0), Some(&json!("users")));
        assert_eq!(value, json!("a@b.com"));
    }
}
