//! Hard-failure error types for the validation engine.
//!
//! Ordinary validation failures are *data*, not errors: they are folded into
//! a field's validity flag and error list. `EngineError` covers the cases
//! that indicate a programming or configuration mistake instead.

use thiserror::Error;

/// Boxed error type used by external collaborators (e.g. uniqueness handlers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by rule resolution and execution.
///
/// Batch validation never returns `Err` for invalid data; only for rule
/// descriptors that cannot be resolved, rules that cannot be constructed
/// from their parameters, or collaborator calls that fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A string rule descriptor matched no method rule, derived alias,
    /// constructible rule or valid `name + inline params` split.
    #[error("invalid rule: {0}")]
    UnknownRule(String),

    /// A rule name resolved, but the rule could not be built from the
    /// supplied parameters.
    #[error("failed to construct rule `{name}`: {reason}")]
    Construction {
        /// Canonical rule name.
        name: String,
        /// Human-readable reason.
        reason: String,
    },

    /// An external collaborator (e.g. a uniqueness handler) failed.
    /// Propagated to the caller unchanged.
    #[error(transparent)]
    Collaborator(#[from] BoxError),
}

impl EngineError {
    /// Creates an [`EngineError::UnknownRule`] for the given descriptor text.
    pub fn unknown_rule(rule: impl Into<String>) -> Self {
        EngineError::UnknownRule(rule.into())
    }

    /// Creates an [`EngineError::Construction`] error.
    pub fn construction(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Construction {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a collaborator failure.
    pub fn collaborator(error: BoxError) -> Self {
        EngineError::Collaborator(error)
    }

    /// Whether this error is an unresolved rule name.
    pub fn is_unknown_rule(&self) -> bool {
        matches!(self, EngineError::UnknownRule(_))
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_display_names_the_descriptor() {
        let err = EngineError::unknown_rule("frobnicate 3");
        assert_eq!(err.to_string(), "invalid rule: frobnicate 3");
        assert!(err.is_unknown_rule());
    }

    #[test]
    fn construction_display_carries_reason() {
        let err = EngineError::construction("numeric", "min is not numeric");
        assert_eq!(
            err.to_string(),
            "failed to construct rule `numeric`: min is not numeric"
        );
    }
}
