//! The dispatcher: descriptor normalization, rule resolution and
//! outcome merging.
//!
//! Every accepted descriptor spelling funnels through
//! [`ValidationEngine::execute_rule`], which resolves it against the
//! registry in a fixed order: method rule, then derived alias, then
//! constructible class rule, then a whitespace split of the string into
//! `name params...`. A string that survives none of those paths is a
//! configuration mistake and surfaces as [`EngineError::UnknownRule`]
//! rather than a validation failure.
//!
//! Outcome merging is the other half of the contract: validity is a
//! monotonic AND across a field's rules, every failing rule appends one
//! rendered error message, and warnings never touch validity.

use serde::Serialize;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::descriptor::{Params, RuleDescriptor};
use crate::error::EngineError;
use crate::field::{Field, Fields};
use crate::registry::{self, RuleRegistry};
use crate::rules::{interpolate, Outcome, Rule, Severity, GENERIC_INVALID_VALUE};

// ============================================================================
// REPORT
// ============================================================================

/// Result of a batch pass over a field collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether every evaluated field passed.
    pub passed: bool,
    /// Fields that failed, with their rendered errors, in field order.
    pub invalid: Vec<InvalidField>,
}

/// One failed field in a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidField {
    /// Field name.
    pub name: String,
    /// Rendered error messages, in rule evaluation order.
    pub errors: Vec<String>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Resolves rule descriptors through a [`RuleRegistry`] and runs them
/// against fields.
#[derive(Debug, Default)]
pub struct ValidationEngine {
    registry: RuleRegistry,
}

impl ValidationEngine {
    /// Creates an engine around a registry.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// The engine's registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for registering custom rule
    /// constructors or injecting the uniqueness handler.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    // ------------------------------------------------------------------
    // Batch evaluation
    // ------------------------------------------------------------------

    /// Validates every field in the collection against its own rules.
    ///
    /// Peer values are snapshotted once before the pass, so cross-field
    /// rules see the values as they were when validation started. With
    /// `bail = true` a failing field ends the pass; later fields keep the
    /// state of their last evaluation (`None` if never evaluated).
    pub fn validate(
        &self,
        fields: &mut Fields,
        bail: bool,
    ) -> Result<ValidationReport, EngineError> {
        let ctx = ValidationContext::new(fields.values());
        tracing::debug!(fields = fields.len(), bail, "starting validation pass");

        let mut passed = true;
        for field in fields.iter_mut() {
            let ok = self.validate_field_with(field, bail, &ctx)?;
            passed = passed && ok;
            if bail && !ok {
                break;
            }
        }

        let invalid = fields
            .get_invalid_fields()
            .into_iter()
            .map(|field| InvalidField {
                name: field.name().to_string(),
                errors: field.errors().to_vec(),
            })
            .collect();
        Ok(ValidationReport { passed, invalid })
    }

    // ------------------------------------------------------------------
    // Field evaluation
    // ------------------------------------------------------------------

    /// Validates a standalone field (no peer context).
    pub fn validate_field(&self, field: &mut Field, bail: bool) -> Result<bool, EngineError> {
        self.validate_field_with(field, bail, &ValidationContext::empty())
    }

    /// Validates one field against its ordered rule list.
    ///
    /// Each call is a fresh pass: computed state is cleared first, so
    /// re-validation never accumulates duplicate errors. Returns the
    /// AND-fold of the rule results — `true` for a field with no rules,
    /// whose validity stays `None`.
    pub fn validate_field_with(
        &self,
        field: &mut Field,
        bail: bool,
        ctx: &ValidationContext,
    ) -> Result<bool, EngineError> {
        field.reset();
        let rules = field.rule_list().to_vec();

        let mut all = true;
        for rule in &rules {
            let ok = self.execute_rule_with(field, rule, bail, ctx)?;
            all = all && ok;
            if bail && !all {
                break;
            }
        }
        Ok(all)
    }

    // ------------------------------------------------------------------
    // Rule execution
    // ------------------------------------------------------------------

    /// Executes one descriptor against a standalone field.
    pub fn execute_rule(
        &self,
        field: &mut Field,
        rule: &RuleDescriptor,
        bail: bool,
    ) -> Result<bool, EngineError> {
        self.execute_rule_with(field, rule, bail, &ValidationContext::empty())
    }

    /// Normalizes and dispatches one descriptor.
    ///
    /// With `bail = true` and the field already failed, the rule is
    /// skipped and `false` returned without dispatching.
    pub fn execute_rule_with(
        &self,
        field: &mut Field,
        rule: &RuleDescriptor,
        bail: bool,
        ctx: &ValidationContext,
    ) -> Result<bool, EngineError> {
        if bail && field.is_valid() == Some(false) {
            return Ok(false);
        }
        match rule {
            RuleDescriptor::Instance(rule) => self.dispatch(field, rule.as_ref(), ctx),
            RuleDescriptor::WithParams(name, params) => {
                self.resolve_string(field, name, params, ctx)
            }
            RuleDescriptor::Name(name) => self.resolve_string(field, name, &Params::None, ctx),
        }
    }

    /// String resolution: method, then derived/constructible, then a
    /// whitespace split into `name params...`.
    fn resolve_string(
        &self,
        field: &mut Field,
        raw: &str,
        params: &Params,
        ctx: &ValidationContext,
    ) -> Result<bool, EngineError> {
        if let Some(method) = self.registry.method(raw) {
            tracing::trace!(field = %field.name(), rule = %raw, "dispatching method rule");
            let outcome = method(field, params, ctx)?;
            return Ok(self.update_status(field, registry::canonical(raw), outcome));
        }
        if let Some(rule) = self.registry.construct(raw, params)? {
            return self.dispatch(field, rule.as_ref(), ctx);
        }

        // "length 7": split off inline parameters and retry once.
        let mut tokens = raw.split_whitespace();
        let head = tokens.next().unwrap_or(raw);
        let inline: Vec<Value> = tokens.map(|t| Value::String(t.to_string())).collect();
        if inline.is_empty() || !self.registry.is_builtin_name(head) {
            return Err(EngineError::UnknownRule(raw.to_string()));
        }
        let merged = merge_inline(head, inline, params)?;
        self.resolve_string(field, head, &merged, ctx)
    }

    /// Runs a constructed rule object and merges its outcome.
    pub fn dispatch(
        &self,
        field: &mut Field,
        rule: &dyn Rule,
        ctx: &ValidationContext,
    ) -> Result<bool, EngineError> {
        tracing::trace!(field = %field.name(), rule = %rule.name(), "dispatching rule");
        let outcome = rule.validate(field, ctx)?;
        Ok(self.update_status(field, rule.name(), outcome))
    }

    /// Merges one rule outcome into the field and returns the boolean
    /// result of the rule.
    ///
    /// Message precedence on failure: field override for
    /// `(rule, variant)`, then the rule's own template, then the generic
    /// fallback. Warnings are recorded without touching validity.
    pub fn update_status(&self, field: &mut Field, rule_name: &str, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Pass => {
                field.merge_validity(true);
                true
            }
            Outcome::Fail(violation) => {
                let template = field
                    .message_for(rule_name, violation.variant())
                    .or(violation.template())
                    .unwrap_or(GENERIC_INVALID_VALUE)
                    .to_string();
                let message = interpolate(&template, violation.params());
                match violation.severity() {
                    Severity::Warning => {
                        field.add_warning(message);
                        true
                    }
                    Severity::Error => {
                        field.add_error(message);
                        field.merge_validity(false);
                        false
                    }
                }
            }
        }
    }
}

/// Prepends inline string tokens to an explicit positional bag. Inline
/// tokens cannot be combined with named parameters.
fn merge_inline(name: &str, inline: Vec<Value>, params: &Params) -> Result<Params, EngineError> {
    match params {
        Params::None => Ok(Params::Positional(inline)),
        Params::Positional(explicit) => {
            let mut merged = inline;
            merged.extend(explicit.iter().cloned());
            Ok(Params::Positional(merged))
        }
        Params::Named(_) => Err(EngineError::construction(
            name,
            "inline parameters cannot be combined with named parameters",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn engine() -> ValidationEngine {
        ValidationEngine::default()
    }

    #[test]
    fn method_rule_end_to_end() {
        let mut field = Field::with_value("email", json!("not-an-email")).rule("email");
        let ok = engine().validate_field(&mut field, false).unwrap();
        assert!(!ok);
        assert_eq!(field.is_valid(), Some(false));
        assert_eq!(field.errors(), ["email should be a valid email id"]);
    }

    #[test]
    fn inline_parameters_split_from_the_name() {
        // "length 7" resolves as minimum length 7
        let mut field = Field::with_value("code", json!("abcdefg")).rule("length 7");
        assert!(engine().validate_field(&mut field, false).unwrap());

        let mut field = Field::with_value("code", json!("abc")).rule("length 7");
        assert!(!engine().validate_field(&mut field, false).unwrap());
        assert_eq!(
            field.errors(),
            ["The value should has greater than or equal to 7 characters"]
        );
    }

    #[test]
    fn inline_tokens_precede_explicit_positional_params() {
        // "numeric 10" with explicit [100] resolves to min 10, max 100.
        let mut field =
            Field::with_value("age", json!(50)).rule(("numeric 10", [json!(100)]));
        assert!(engine().validate_field(&mut field, false).unwrap());

        let mut field =
            Field::with_value("age", json!(500)).rule(("numeric 10", [json!(100)]));
        assert!(!engine().validate_field(&mut field, false).unwrap());
    }

    #[test]
    fn unknown_rule_is_a_hard_error() {
        let mut field = Field::with_value("age", json!(5)).rule("noSuchRule");
        let err = engine().validate_field(&mut field, false).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule(name) if name == "noSuchRule"));
    }

    #[test]
    fn unknown_head_of_split_reports_the_raw_descriptor() {
        let mut field = Field::with_value("age", json!(5)).rule("noSuch 7");
        let err = engine().validate_field(&mut field, false).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule(name) if name == "noSuch 7"));
    }

    #[test]
    fn bail_skips_rules_after_the_first_failure() {
        let mut field = Field::with_value("email", json!(""))
            .rule("required")
            .rule("email");
        assert!(!engine().validate_field(&mut field, true).unwrap());
        assert_eq!(field.errors(), ["email should have value"]);

        // without bail both failures are recorded
        assert!(!engine().validate_field(&mut field, false).unwrap());
        assert_eq!(
            field.errors(),
            [
                "email should have value",
                "email should be a valid email id"
            ]
        );
    }

    #[test]
    fn revalidation_starts_from_a_clean_slate() {
        let mut field = Field::with_value("email", json!("bad")).rule("email");
        engine().validate_field(&mut field, false).unwrap();
        engine().validate_field(&mut field, false).unwrap();
        assert_eq!(field.errors().len(), 1);
    }

    #[test]
    fn field_override_beats_rule_template() {
        let mut field = Field::with_value("price", json!(500))
            .rule(("numeric", [json!(10), json!(100)]))
            .message(
                "numeric",
                crate::field::MessageOverride::by_variant([("between", "price out of range")]),
            );
        engine().validate_field(&mut field, false).unwrap();
        assert_eq!(field.errors(), ["price out of range"]);
    }

    #[test]
    fn bare_violation_falls_back_to_generic_message() {
        struct AlwaysFails;
        impl Rule for AlwaysFails {
            fn name(&self) -> &str {
                "alwaysFails"
            }
            fn validate(
                &self,
                _field: &Field,
                _ctx: &ValidationContext,
            ) -> Result<Outcome, EngineError> {
                Ok(Outcome::from_bool(false))
            }
        }

        let mut field = Field::with_value("x", json!(1)).rule(RuleDescriptor::instance(AlwaysFails));
        engine().validate_field(&mut field, false).unwrap();
        assert_eq!(field.errors(), ["Invalid value"]);
    }

    #[test]
    fn warnings_do_not_affect_validity() {
        struct Deprecated;
        impl Rule for Deprecated {
            fn name(&self) -> &str {
                "deprecated"
            }
            fn validate(
                &self,
                _field: &Field,
                _ctx: &ValidationContext,
            ) -> Result<Outcome, EngineError> {
                Ok(Outcome::Fail(
                    crate::rules::Violation::new("this field is deprecated").as_warning(),
                ))
            }
        }

        let mut field = Field::with_value("legacy", json!("x"))
            .rule(RuleDescriptor::instance(Deprecated))
            .rule("required");
        let ok = engine().validate_field(&mut field, false).unwrap();
        assert!(ok);
        assert_eq!(field.is_valid(), Some(true));
        assert_eq!(field.warnings(), ["this field is deprecated"]);
        assert!(field.errors().is_empty());
    }

    #[test]
    fn batch_pass_reports_invalid_fields() {
        let mut fields = Fields::new();
        fields.add_field(Field::with_value("name", json!("Ada")).rule("required"));
        fields.add_field(Field::with_value("email", json!("bad")).rule("email"));
        fields.add_field(Field::new("untouched"));

        let report = engine().validate(&mut fields, false).unwrap();
        assert!(!report.passed);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].name, "email");
        assert_eq!(
            report.invalid[0].errors,
            ["email should be a valid email id"]
        );

        // a field with no rules stays unevaluated but counts as success
        assert_eq!(fields.get("untouched").unwrap().is_valid(), None);
    }

    #[test]
    fn batch_bail_stops_at_the_first_failing_field() {
        let mut fields = Fields::new();
        fields.add_field(Field::with_value("first", json!("")).rule("required"));
        fields.add_field(Field::with_value("second", json!("")).rule("required"));

        let report = engine().validate(&mut fields, true).unwrap();
        assert!(!report.passed);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(fields.get("second").unwrap().is_valid(), None);
    }

    #[test]
    fn confirmation_reads_peers_from_the_snapshot() {
        let mut fields = Fields::new();
        fields.add_field(Field::with_value("password", json!("s3cret")));
        fields.add_field(
            Field::with_value("password_confirmation", json!("s3cret"))
                .rule(("confirmation", [json!("password")])),
        );
        assert!(engine().validate(&mut fields, false).unwrap().passed);

        fields.set_value("password_confirmation", json!("other"));
        let report = engine().validate(&mut fields, false).unwrap();
        assert!(!report.passed);
        assert_eq!(
            report.invalid[0].errors,
            ["The value should be equal to password"]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = ValidationReport {
            passed: false,
            invalid: vec![InvalidField {
                name: "email".to_string(),
                errors: vec!["email should be a valid email id".to_string()],
            }],
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "passed": false,
                "invalid": [
                    {"name": "email", "errors": ["email should be a valid email id"]}
                ]
            })
        );
    }
}
