//! The ordered, name-keyed collection of fields.

use indexmap::IndexMap;
use serde_json::Value;

use crate::descriptor::RuleDescriptor;
use crate::engine::ValidationEngine;
use crate::error::EngineError;
use crate::field::Field;
use crate::registry::names;
use crate::rules::Rule;

/// Insertion-ordered collection of [`Field`]s keyed by name.
///
/// Keys are unique: adding a field instance under an existing name replaces
/// the previous field. Iteration order is insertion order;
/// [`rename_field`](Fields::rename_field) moves the renamed entry to the end.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    fields: IndexMap<String, Field>,
}

impl Fields {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Adds a field, either by name (an empty field is created) or as a
    /// built [`Field`] instance. An instance with a duplicate name replaces
    /// the existing entry.
    pub fn add_field(&mut self, field: impl Into<Field>) {
        let field = field.into();
        self.fields.insert(field.name().to_string(), field);
    }

    /// Adds several fields.
    pub fn add_fields<F: Into<Field>>(&mut self, fields: impl IntoIterator<Item = F>) {
        for field in fields {
            self.add_field(field);
        }
    }

    /// Removes the named fields, preserving the order of the rest.
    pub fn remove_fields<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        for name in names {
            self.fields.shift_remove(name.as_ref());
        }
    }

    /// Reassigns a field to a new key. The renamed entry moves to the end
    /// of iteration order; if `new` already exists it is replaced.
    pub fn rename_field(&mut self, old: &str, new: impl Into<String>) {
        if let Some(mut field) = self.fields.shift_remove(old) {
            let new = new.into();
            field.set_name(new.clone());
            self.fields.insert(new, field);
        }
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    /// Assigns values by field name. Names with no matching field are
    /// ignored.
    pub fn set_values<N: Into<String>, V: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = (N, V)>,
    ) {
        for (name, value) in values {
            self.set_value(&name.into(), value);
        }
    }

    /// Assigns one field's value. A missing name is ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) {
        if let Some(field) = self.fields.get_mut(name) {
            field.set_value(value);
        }
    }

    /// Snapshot of `(name, value)` pairs in field order.
    pub fn values(&self) -> IndexMap<String, Value> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value().clone()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Rules and messages
    // ------------------------------------------------------------------

    /// Attaches one rule to the named field. A missing name is ignored.
    pub fn add_rule(&mut self, name: &str, rule: impl Into<RuleDescriptor>) {
        if let Some(field) = self.fields.get_mut(name) {
            field.add_rule(rule);
        }
    }

    /// Attaches several rules to the named field.
    pub fn add_rules(&mut self, name: &str, rules: impl IntoIterator<Item = RuleDescriptor>) {
        if let Some(field) = self.fields.get_mut(name) {
            field.add_rules(rules);
        }
    }

    /// Bulk rule attachment from a `field name -> rules` mapping.
    pub fn apply_rules<'a>(
        &mut self,
        field_rules: impl IntoIterator<Item = (&'a str, Vec<RuleDescriptor>)>,
    ) {
        for (name, rules) in field_rules {
            self.add_rules(name, rules);
        }
    }

    /// Attaches a constructed custom rule object to the named field.
    pub fn add_custom_rule(&mut self, name: &str, rule: impl Rule + 'static) {
        self.add_rule(name, RuleDescriptor::instance(rule));
    }

    /// Marks the named fields as required. Missing names are ignored.
    pub fn set_required_fields<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        for name in names {
            self.add_rule(name.as_ref(), names::REQUIRED);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Mutable field by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Iterates fields mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.values_mut()
    }

    /// Fields whose validity is `false`. Unevaluated fields (`None`) land
    /// on the valid side.
    pub fn get_invalid_fields(&self) -> Vec<&Field> {
        self.fields
            .values()
            .filter(|f| f.is_valid() == Some(false))
            .collect()
    }

    /// Fields whose validity is not `false` (evaluated-valid or untouched).
    pub fn get_valid_fields(&self) -> Vec<&Field> {
        self.fields
            .values()
            .filter(|f| f.is_valid() != Some(false))
            .collect()
    }

    /// All field errors, aggregated in field order.
    pub fn errors(&self) -> Vec<String> {
        self.fields
            .values()
            .flat_map(|f| f.errors().iter().cloned())
            .collect()
    }

    /// All field warnings, aggregated in field order.
    pub fn warnings(&self) -> Vec<String> {
        self.fields
            .values()
            .flat_map(|f| f.warnings().iter().cloned())
            .collect()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validates every field with a default engine.
    ///
    /// With `bail = true` a failing field stops the pass. See
    /// [`ValidationEngine::validate`] for the full contract.
    pub fn validate(&mut self, bail: bool) -> Result<bool, EngineError> {
        let engine = ValidationEngine::default();
        engine.validate(self, bail).map(|report| report.passed)
    }
}

impl<F: Into<Field>> FromIterator<F> for Fields {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.add_fields(iter);
        fields
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
