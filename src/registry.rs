//! Rule registry: name → implementation lookup.
//!
//! Three kinds of entries resolve a rule name:
//!
//! - **Method rules**: plain routines dispatched by name (`"email"`).
//! - **Class rules**: constructors invoked with a parameter bag
//!   (`"numeric"` with `[10, 100]`).
//! - **Derived rules**: aliases expanding to a class rule with fixed
//!   parameters (`"integer"` → `data-type` with `"integer"`).
//!
//! Method names win collisions; class and derived resolution is only
//! attempted after a method lookup misses. Lookups strip one trailing
//! `Validation` suffix, so `"emailValidation"` resolves like `"email"`.
//! An unknown name is an absence here, never an error; the engine turns
//! it into [`EngineError::UnknownRule`] once every resolution path has
//! failed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{Outcome, Rule};
use crate::validators::{
    basic, confirmation, data_type, date, isbn, length, numeric, patterns, sets, unique,
    Confirmation, DataType, Date, Length, Numeric, Unique, UniqueHandler,
};

// ============================================================================
// RULE NAMES
// ============================================================================

/// Canonical names of the built-in rules.
pub mod names {
    pub const REQUIRED: &str = "required";
    pub const URL: &str = "url";
    pub const EMAIL: &str = "email";
    pub const REGEX: &str = "regex";
    pub const ALPHA: &str = "alpha";
    pub const ALPHA_NUMERIC: &str = "alphaNumeric";
    pub const ALPHA_SPACE: &str = "alphaspace";
    pub const MOBILE_NUMBER: &str = "mobileNumber";
    pub const LANDLINE: &str = "landline";
    pub const VALUES_IN: &str = "valuesIn";
    pub const VALUES_NOT_IN: &str = "valuesNotIn";
    pub const ISBN: &str = "isbn";
    pub const ISBN10: &str = "isbn10";
    pub const ISBN13: &str = "isbn13";
    pub const POSITIVE_NUMBER: &str = "positiveNumber";

    pub const DATA_TYPE: &str = "data-type";
    pub const NUMERIC: &str = "numeric";
    pub const LENGTH: &str = "length";
    pub const DATE: &str = "date";
    pub const CONFIRMATION: &str = "confirmation";
    pub const UNIQUE: &str = "unique";

    pub const INTEGER: &str = "integer";
    pub const FLOAT: &str = "float";
    pub const STRING: &str = "string";
    pub const BOOLEAN: &str = "boolean";
    pub const ARRAY: &str = "array";
    pub const NULL: &str = "null";
}

// ============================================================================
// ENTRY KINDS
// ============================================================================

/// Routine signature shared by all method rules.
pub type MethodRule =
    fn(&Field, &Params, &ValidationContext) -> Result<Outcome, EngineError>;

/// Constructor invoked when a class rule is addressed by name.
pub type RuleConstructor =
    Box<dyn Fn(&Params) -> Result<Arc<dyn Rule>, EngineError> + Send + Sync>;

// ============================================================================
// REGISTRY
// ============================================================================

/// Name → implementation tables for every resolvable rule.
pub struct RuleRegistry {
    methods: HashMap<&'static str, MethodRule>,
    constructors: HashMap<String, RuleConstructor>,
    derived: HashMap<&'static str, (&'static str, Params)>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        let mut registry = Self {
            methods: HashMap::new(),
            constructors: HashMap::new(),
            derived: HashMap::new(),
        };
        registry.register_builtins();
        registry
    }
}

impl RuleRegistry {
    /// An empty registry with no built-ins. Useful in tests.
    pub fn bare() -> Self {
        Self {
            methods: HashMap::new(),
            constructors: HashMap::new(),
            derived: HashMap::new(),
        }
    }

    fn register_builtins(&mut self) {
        self.methods.insert(names::REQUIRED, basic::required);
        self.methods
            .insert(names::POSITIVE_NUMBER, basic::positive_number);
        self.methods.insert(names::URL, patterns::url_rule);
        self.methods.insert(names::EMAIL, patterns::email);
        self.methods.insert(names::REGEX, patterns::regex_rule);
        self.methods.insert(names::ALPHA, patterns::alpha);
        self.methods
            .insert(names::ALPHA_NUMERIC, patterns::alpha_numeric);
        self.methods.insert(names::ALPHA_SPACE, patterns::alpha_space);
        self.methods
            .insert(names::MOBILE_NUMBER, patterns::mobile_number);
        self.methods.insert(names::LANDLINE, patterns::landline);
        self.methods.insert(names::VALUES_IN, sets::values_in);
        self.methods.insert(names::VALUES_NOT_IN, sets::values_not_in);
        self.methods.insert(names::ISBN, isbn::isbn);
        self.methods.insert(names::ISBN10, isbn::isbn10);
        self.methods.insert(names::ISBN13, isbn::isbn13);

        self.register(numeric::NAME, |params| {
            Ok(Arc::new(Numeric::from_params(params)?) as Arc<dyn Rule>)
        });
        self.register(length::NAME, |params| {
            Ok(Arc::new(Length::from_params(params)?) as Arc<dyn Rule>)
        });
        self.register(date::NAME, |params| {
            Ok(Arc::new(Date::from_params(params)?) as Arc<dyn Rule>)
        });
        self.register(data_type::NAME, |params| {
            Ok(Arc::new(DataType::from_params(params)?) as Arc<dyn Rule>)
        });
        self.register(confirmation::NAME, |params| {
            Ok(Arc::new(Confirmation::from_params(params)?) as Arc<dyn Rule>)
        });
        // "unique" stays unconstructible until a handler is injected.
        self.register(unique::NAME, |_params| {
            Err(EngineError::construction(
                unique::NAME,
                "no uniqueness handler registered",
            ))
        });

        for kind in [
            names::INTEGER,
            names::FLOAT,
            names::STRING,
            names::BOOLEAN,
            names::ARRAY,
            names::NULL,
        ] {
            self.derived
                .insert(kind, (names::DATA_TYPE, Params::single(kind)));
        }
    }

    /// Registers (or replaces) a constructor under `name`, making the name
    /// addressable from rule descriptors.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&Params) -> Result<Arc<dyn Rule>, EngineError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(rule = %name, "registering rule constructor");
        self.constructors.insert(name, Box::new(constructor));
    }

    /// Injects the collaborator behind the `unique` rule.
    pub fn set_unique_handler(&mut self, handler: Arc<dyn UniqueHandler>) {
        self.register(unique::NAME, move |params| {
            Ok(Arc::new(Unique::new(Arc::clone(&handler), params.clone())) as Arc<dyn Rule>)
        });
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Whether `name` resolves to any kind of entry.
    pub fn is_builtin_name(&self, name: &str) -> bool {
        self.is_method_rule(name) || self.is_class_rule(name) || self.is_derived_rule(name)
    }

    /// Whether `name` resolves to a method rule.
    pub fn is_method_rule(&self, name: &str) -> bool {
        self.methods.contains_key(canonical(name))
    }

    /// Whether `name` resolves to a registered constructor.
    pub fn is_class_rule(&self, name: &str) -> bool {
        self.constructors.contains_key(canonical(name))
    }

    /// Whether `name` is a derived alias.
    pub fn is_derived_rule(&self, name: &str) -> bool {
        self.derived.contains_key(canonical(name))
    }

    /// The method routine registered under `name`, if any.
    pub fn method(&self, name: &str) -> Option<MethodRule> {
        self.methods.get(canonical(name)).copied()
    }

    /// The base rule and fixed parameters a derived alias expands to.
    pub fn resolve_derived(&self, name: &str) -> Option<(&'static str, &Params)> {
        self.derived
            .get(canonical(name))
            .map(|(base, params)| (*base, params))
    }

    /// Constructs the class rule registered under `name`, expanding derived
    /// aliases first. `Ok(None)` means the name is not constructible;
    /// constructor failures surface as [`EngineError::Construction`].
    pub fn construct(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<Option<Arc<dyn Rule>>, EngineError> {
        let name = canonical(name);
        if let Some((base, fixed)) = self.derived.get(name) {
            // Derived aliases carry their own parameters; explicit ones
            // are ignored.
            return self.construct(base, fixed);
        }
        match self.constructors.get(name) {
            Some(constructor) => constructor(params).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .field("derived", &self.derived.len())
            .finish()
    }
}

/// Strips one trailing `Validation` suffix (`"emailValidation"` → `"email"`).
pub(crate) fn canonical(name: &str) -> &str {
    match name.strip_suffix("Validation") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn method_names_resolve_with_and_without_suffix() {
        let registry = RuleRegistry::default();
        assert!(registry.is_method_rule("email"));
        assert!(registry.is_method_rule("emailValidation"));
        assert!(!registry.is_method_rule("numeric"));
        assert!(!registry.is_method_rule("Validation"));
    }

    #[test]
    fn construct_builds_class_rules() {
        let registry = RuleRegistry::default();
        let rule = registry
            .construct("numeric", &Params::from(vec![json!(10), json!(100)]))
            .unwrap()
            .unwrap();
        assert_eq!(rule.name(), "numeric");

        assert!(registry.construct("nosuch", &Params::None).unwrap().is_none());
    }

    #[test]
    fn construct_surfaces_constructor_failures() {
        let registry = RuleRegistry::default();
        let err = registry
            .construct("numeric", &Params::single(json!("abc")))
            .unwrap_err();
        assert!(matches!(err, EngineError::Construction { .. }));
    }

    #[test]
    fn derived_aliases_expand_to_data_type() {
        let registry = RuleRegistry::default();
        let (base, params) = registry.resolve_derived("integer").unwrap();
        assert_eq!(base, names::DATA_TYPE);
        assert_eq!(params, &Params::single(json!("integer")));

        // Explicit params on an alias are ignored.
        let rule = registry
            .construct("integer", &Params::single(json!("float")))
            .unwrap()
            .unwrap();
        assert_eq!(rule.name(), names::DATA_TYPE);
    }

    #[test]
    fn unique_needs_an_injected_handler() {
        let mut registry = RuleRegistry::default();
        let err = registry.construct("unique", &Params::None).unwrap_err();
        assert!(matches!(err, EngineError::Construction { .. }));

        registry.set_unique_handler(Arc::new(|_: &Params, _: &Value| Ok(true)));
        let rule = registry.construct("unique", &Params::None).unwrap().unwrap();
        assert_eq!(rule.name(), "unique");
    }

    #[test]
    fn custom_constructors_register_under_their_name() {
        let mut registry = RuleRegistry::bare();
        assert!(!registry.is_builtin_name("evenNumber"));
        registry.register("evenNumber", |params| {
            Ok(Arc::new(Numeric::from_params(params)?) as Arc<dyn Rule>)
        });
        assert!(registry.is_class_rule("evenNumber"));
        assert!(registry.is_class_rule("evenNumberValidation"));
    }
}
