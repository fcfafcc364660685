//! Data-type rule and the kinds it recognizes.
//!
//! The derived aliases (`integer`, `float`, `string`, `boolean`, `array`,
//! `null`) all expand to this rule with a fixed kind.

use serde_json::Value;

use crate::context::ValidationContext;
use crate::descriptor::Params;
use crate::error::EngineError;
use crate::field::Field;
use crate::rules::{MessageSet, Outcome, Rule, Violation};

/// Canonical registry name.
pub const NAME: &str = "data-type";

/// The value kinds the data-type rule can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// A JSON string.
    String,
    /// An integral JSON number.
    Integer,
    /// A fractional JSON number.
    Float,
    /// A JSON boolean.
    Boolean,
    /// Array-like: a JSON array or object.
    Array,
    /// JSON null.
    Null,
}

impl DataKind {
    /// Parses a kind name as used in descriptors and derived aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(DataKind::String),
            "integer" => Some(DataKind::Integer),
            "float" => Some(DataKind::Float),
            "boolean" => Some(DataKind::Boolean),
            "array" => Some(DataKind::Array),
            "null" => Some(DataKind::Null),
            _ => None,
        }
    }

    /// Kind name as used in messages and variants.
    pub fn name(self) -> &'static str {
        match self {
            DataKind::String => "string",
            DataKind::Integer => "integer",
            DataKind::Float => "float",
            DataKind::Boolean => "boolean",
            DataKind::Array => "array",
            DataKind::Null => "null",
        }
    }

    /// Whether `value` is of this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            DataKind::String => value.is_string(),
            DataKind::Integer => matches!(value, Value::Number(n) if !n.is_f64()),
            DataKind::Float => matches!(value, Value::Number(n) if n.is_f64()),
            DataKind::Boolean => value.is_boolean(),
            DataKind::Array => value.is_array() || value.is_object(),
            DataKind::Null => value.is_null(),
        }
    }
}

/// Validates that a value has a specific [`DataKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    kind: DataKind,
    messages: MessageSet,
}

impl DataType {
    /// Creates a data-type rule for `kind`.
    pub fn new(kind: DataKind) -> Self {
        Self {
            kind,
            messages: MessageSet::from_pairs([
                ("string", "The value should be a string"),
                ("integer", "The value should be an integer"),
                ("float", "The value should be a float"),
                ("boolean", "The value should be a boolean"),
                ("array", "The value should be an array"),
                ("null", "The value should be null"),
                ("default", "The value should be {type} data type"),
            ]),
        }
    }

    /// Builds the rule from a parameter bag: positional `[kind]` or named
    /// `{type}`.
    pub fn from_params(params: &Params) -> Result<Self, EngineError> {
        let name = params
            .arg_str(0, "type")
            .ok_or_else(|| EngineError::construction(NAME, "missing type parameter"))?;
        let kind = DataKind::from_name(name)
            .ok_or_else(|| EngineError::construction(NAME, format!("unknown type `{name}`")))?;
        Ok(Self::new(kind))
    }

    /// Replaces one of the rule's own default messages.
    pub fn set_message(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.set(variant, template);
    }
}

impl Rule for DataType {
    fn name(&self) -> &str {
        NAME
    }

    fn validate(&self, field: &Field, _ctx: &ValidationContext) -> Result<Outcome, EngineError> {
        if self.kind.matches(field.value()) {
            Ok(Outcome::Pass)
        } else {
            let variant = self.kind.name();
            Ok(Outcome::Fail(
                Violation::new(self.messages.resolve(Some(variant)))
                    .with_variant(variant)
                    .with_param("type", variant),
            ))
        }
    }
}
