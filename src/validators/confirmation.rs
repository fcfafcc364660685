//! Peer-field equality rule.
//!
//! Compares a field to a sibling in the same collection — the classic
//! `password` / `password_confirmation` pair. The peer is looked up by
//! name in the [`ValidationContext`] at validation time, so the comparison
//! always sees the peer's current value.

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};

/// Canonical registry name.
pub const NAME: &str = "confirmation";

/// Validates that a field equals the named peer field.
///
/// A missing peer fails the rule; it usually means the confirmation rule
/// was attached outside a collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    other: String,
    messages: MessageSet,
}

impl Confirmation {
    /// Creates a confirmation rule against the peer field `other`.
    pub fn new(other: impl Into<String>) -> Self {
        Self {
            other: other.into(),
            messages: MessageSet::from_pairs([(
                "default",
                "The value should be equal to {other}",
            )]),
        }
    }

    /// Builds the rule from a parameter bag: positional `[field]` or named
    /// `{field}`.
    pub fn from_params(params: &Params) -> Result<Self, EngineError> {
        params
            .arg_str(0, "field")
            .map(Self::new)
            .ok_or_else(|| EngineError::construction(NAME, "missing peer field name"))
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }

    fn violation(&self) -> Violation {
        Violation::new(self.messages.resolve(None)).with_param("other", self.other.clone())
    }
}

impl Rule for Confirmation {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        match ctx.peer(&self.other) {
            Some(peer) if peer == field.value() => Ok(Outcome::Pass),
            _ => Ok(Outcome::Fail(self.violation())),
        }
    }
}
