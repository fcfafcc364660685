//! A single named value under validation.

use std::collections::HashMap;

use serde_json::Value;

use crate::descriptor::RuleDescriptor;
use crate::rules::messages::DEFAULT_VARIANT;

// ============================================================================
// MESSAGE OVERRIDE
// ============================================================================

/// Caller-supplied replacement for a rule's default error text.
///
/// A single string applies to every variant of the rule; a variant map
/// targets specific variants and may carry a `"default"` catch-all entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOverride {
    /// One message for every variant of the rule.
    Single(String),
    /// Variant-specific messages (`"max"`, `"min"`, `"between"`, ...).
    ByVariant(HashMap<String, String>),
}

impl MessageOverride {
    /// Builds a variant map from `(variant, message)` pairs.
    pub fn by_variant<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        MessageOverride::ByVariant(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Message for a variant under this override, honoring the
    /// variant-then-default layering.
    fn resolve(&self, variant: Option<&str>) -> Option<&str> {
        match self {
            MessageOverride::Single(message) => Some(message),
            MessageOverride::ByVariant(map) => variant
                .and_then(|v| map.get(v))
                .or_else(|| map.get(DEFAULT_VARIANT))
                .map(String::as_str),
        }
    }
}

impl From<&str> for MessageOverride {
    fn from(message: &str) -> Self {
        MessageOverride::Single(message.to_string())
    }
}

impl From<String> for MessageOverride {
    fn from(message: String) -> Self {
        MessageOverride::Single(message)
    }
}

impl From<HashMap<String, String>> for MessageOverride {
    fn from(map: HashMap<String, String>) -> Self {
        MessageOverride::ByVariant(map)
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A named, mutable container holding a value, its ordered rule list,
/// per-rule message overrides, and the accumulated validation state.
///
/// Validity is tri-state: `None` until a rule has run, then a monotonic
/// AND-fold of rule outcomes — once `Some(false)`, it stays `false` for
/// the rest of the pass.
///
/// # Examples
///
/// ```rust,ignore
/// let mut field = Field::with_value("age", json!(21))
///     .rule("required")
///     .rule(("numeric", [json!(18), json!(99)]));
/// ValidationEngine::default().validate_field(&mut field, false)?;
/// assert_eq!(field.is_valid(), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Field {
    name: String,
    value: Value,
    rules: Vec<RuleDescriptor>,
    messages: HashMap<String, MessageOverride>,
    valid: Option<bool>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Field {
    /// Creates an empty field (value `null`, no rules).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a field pre-populated with a value.
    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Builder-style attachment
    // ------------------------------------------------------------------

    /// Attaches a rule (builder style).
    #[must_use]
    pub fn rule(mut self, rule: impl Into<RuleDescriptor>) -> Self {
        self.add_rule(rule);
        self
    }

    /// Attaches several rules (builder style).
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleDescriptor>) -> Self {
        self.add_rules(rules);
        self
    }

    /// Attaches a message override for a rule (builder style).
    #[must_use]
    pub fn message(
        mut self,
        rule: impl Into<String>,
        message: impl Into<MessageOverride>,
    ) -> Self {
        self.add_message(rule, message);
        self
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Replaces the field's value.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Renames the field. Renaming inside a collection goes through
    /// [`Fields::rename_field`](crate::field::Fields::rename_field) so the
    /// key stays in sync.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a rule to the ordered rule list.
    pub fn add_rule(&mut self, rule: impl Into<RuleDescriptor>) {
        self.rules.push(rule.into());
    }

    /// Appends several rules, preserving order.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = RuleDescriptor>) {
        self.rules.extend(rules);
    }

    /// Sets the message override for a rule name.
    pub fn add_message(&mut self, rule: impl Into<String>, message: impl Into<MessageOverride>) {
        self.messages.insert(rule.into(), message.into());
    }

    /// Clears computed state (validity, errors, warnings) so a fresh
    /// evaluation pass can begin. Rules and overrides are kept.
    pub fn reset(&mut self) {
        self.valid = None;
        self.errors.clear();
        self.warnings.clear();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Attached rules, in evaluation order.
    pub fn rule_list(&self) -> &[RuleDescriptor] {
        &self.rules
    }

    /// Tri-state validity: `None` until a rule has run.
    pub fn is_valid(&self) -> Option<bool> {
        self.valid
    }

    /// Accumulated errors, in rule evaluation order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Accumulated warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// First recorded error, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Message override for `(rule, variant)`, applying the field-level
    /// layers of the precedence scheme (variant entry, then `"default"`
    /// entry or single value).
    pub fn message_for(&self, rule: &str, variant: Option<&str>) -> Option<&str> {
        self.messages.get(rule).and_then(|m| m.resolve(variant))
    }

    // ------------------------------------------------------------------
    // Engine-facing mutation
    // ------------------------------------------------------------------

    /// Folds a rule outcome into the validity flag: the first outcome seeds
    /// the flag, later outcomes AND into it. Monotonic — a `false` never
    /// becomes `true` within a pass.
    pub fn merge_validity(&mut self, result: bool) {
        self.valid = Some(match self.valid {
            None => result,
            Some(current) => current && result,
        });
    }

    /// Appends an error message. Errors are never overwritten.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Appends a warning message.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}
