//! The rule contract: what every concrete validator satisfies.
//!
//! A rule inspects a [`Field`] (and, for cross-field rules, a
//! [`ValidationContext`]) and reports an [`Outcome`]. Failures carry a
//! [`Violation`] describing *which* variant of the rule failed and the
//! parameters needed to render its message; the engine combines that with
//! the field's message overrides to pick the final user-facing text.

pub mod messages;

use std::collections::BTreeMap;

use crate::context::ValidationContext;
use crate::error::EngineError;
use crate::field::Field;

pub use messages::{interpolate, MessageSet, DEFAULT_VARIANT, GENERIC_INVALID, GENERIC_INVALID_VALUE};

// ============================================================================
// RULE TRAIT
// ============================================================================

/// Contract satisfied by every concrete validation rule.
///
/// The canonical name is used for message-override lookup and must not be
/// inferred from call context; it is carried alongside every dispatch.
///
/// # Examples
///
/// ```rust,ignore
/// struct NonZero;
///
/// impl Rule for NonZero {
///     fn name(&self) -> &str {
///         "nonZero"
///     }
///
///     fn validate(&self, field: &Field, _ctx: &ValidationContext)
///         -> Result<Outcome, EngineError>
///     {
///         Ok(Outcome::from_bool(field.value() != &json!(0)))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Canonical rule name as known to the registry.
    fn name(&self) -> &str;

    /// Runs the rule against a field.
    ///
    /// Returns `Err` only for hard failures (collaborator errors); an
    /// ordinary validation failure is `Ok(Outcome::Fail(..))`.
    fn validate(&self, field: &Field, ctx: &ValidationContext) -> Result<Outcome, EngineError>;
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of running one rule against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rule passed.
    Pass,
    /// The rule failed; the violation describes the failure.
    Fail(Violation),
}

impl Outcome {
    /// `Pass` for `true`, a bare (unframed) failure for `false`.
    ///
    /// Useful for simple custom rules that do not frame their own
    /// messages; the engine falls back to the field's override for the
    /// rule name, or a generic message.
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Outcome::Pass
        } else {
            Outcome::Fail(Violation::bare())
        }
    }

    /// Whether this outcome is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

// ============================================================================
// SEVERITY & VIOLATION
// ============================================================================

/// How a violation affects the field.
///
/// Warnings are recorded on the field but do not flip its validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Fails the field.
    #[default]
    Error,
    /// Recorded in the field's warning list only.
    Warning,
}

/// A single rule failure: the message variant that applies, the template
/// chosen by the rule (if it frames its own messages) and the explicit
/// placeholder parameters for interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    variant: Option<String>,
    template: Option<String>,
    params: BTreeMap<String, String>,
    severity: Severity,
}

impl Violation {
    /// A framed violation with the rule's own message template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            variant: None,
            template: Some(template.into()),
            params: BTreeMap::new(),
            severity: Severity::Error,
        }
    }

    /// An unframed violation: the engine picks the field override for the
    /// rule name or the generic fallback message.
    pub fn bare() -> Self {
        Self {
            variant: None,
            template: None,
            params: BTreeMap::new(),
            severity: Severity::Error,
        }
    }

    /// Tags the violation with a message variant (`"max"`, `"between"`, ...).
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Adds an interpolation parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Downgrades the violation to a warning.
    #[must_use]
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    /// Message variant, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Rule-supplied message template, if the rule frames its own messages.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Interpolation parameters.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Violation severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }
}
