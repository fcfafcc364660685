//! Rule descriptors: every accepted spelling of "which rule, with which
//! parameters".
//!
//! A rule can be attached to a field as a bare name (`"required"`), a name
//! with inline parameters (`"length 7"`), a name paired with a parameter
//! bag (`("numeric", [10, 100])`), a pre-built rule instance, or — for
//! custom validators registered under a type name — that name plus a
//! parameter bag. All spellings normalize to one internal shape before
//! dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::rules::Rule;
use crate::value_ext::ValueExt;

// ============================================================================
// RULE DESCRIPTOR
// ============================================================================

/// One attached rule, in any of the accepted representations.
#[derive(Clone)]
pub enum RuleDescriptor {
    /// A rule name, possibly with space-separated inline parameters
    /// (`"required"`, `"length 7"`).
    Name(String),
    /// A rule name plus an explicit parameter bag.
    WithParams(String, Params),
    /// A constructed rule object, dispatched directly.
    Instance(Arc<dyn Rule>),
}

impl RuleDescriptor {
    /// Wraps a concrete rule object.
    pub fn instance(rule: impl Rule + 'static) -> Self {
        RuleDescriptor::Instance(Arc::new(rule))
    }

    /// Pairs a rule name with parameters.
    pub fn with_params(name: impl Into<String>, params: impl Into<Params>) -> Self {
        RuleDescriptor::WithParams(name.into(), params.into())
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleDescriptor::Name(name) => f.debug_tuple("Name").field(name).finish(),
            RuleDescriptor::WithParams(name, params) => f
                .debug_tuple("WithParams")
                .field(name)
                .field(params)
                .finish(),
            RuleDescriptor::Instance(rule) => {
                f.debug_tuple("Instance").field(&rule.name()).finish()
            }
        }
    }
}

impl From<&str> for RuleDescriptor {
    fn from(name: &str) -> Self {
        RuleDescriptor::Name(name.to_string())
    }
}

impl From<String> for RuleDescriptor {
    fn from(name: String) -> Self {
        RuleDescriptor::Name(name)
    }
}

impl From<Arc<dyn Rule>> for RuleDescriptor {
    fn from(rule: Arc<dyn Rule>) -> Self {
        RuleDescriptor::Instance(rule)
    }
}

impl<N: Into<String>, P: Into<Params>> From<(N, P)> for RuleDescriptor {
    fn from((name, params): (N, P)) -> Self {
        RuleDescriptor::WithParams(name.into(), params.into())
    }
}

// ============================================================================
// PARAMS
// ============================================================================

/// Parameter bag handed to a rule routine or constructor.
///
/// Positional bags call positional constructors; named bags are matched to
/// constructor arguments by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No parameters.
    #[default]
    None,
    /// Positional parameters with contiguous zero-based indices.
    Positional(Vec<Value>),
    /// Keyed parameters.
    Named(BTreeMap<String, Value>),
}

impl Params {
    /// A single positional parameter.
    pub fn single(value: impl Into<Value>) -> Self {
        Params::Positional(vec![value.into()])
    }

    /// Whether the bag holds no parameters.
    pub fn is_empty(&self) -> bool {
        match self {
            Params::None => true,
            Params::Positional(values) => values.is_empty(),
            Params::Named(map) => map.is_empty(),
        }
    }

    /// Positional parameter at `index`.
    pub fn positional(&self, index: usize) -> Option<&Value> {
        match self {
            Params::Positional(values) => values.get(index),
            _ => None,
        }
    }

    /// Named parameter under `key`.
    pub fn named(&self, key: &str) -> Option<&Value> {
        match self {
            Params::Named(map) => map.get(key),
            _ => None,
        }
    }

    /// Constructor argument lookup: positional `index` for positional bags,
    /// `key` for named bags.
    pub fn arg(&self, index: usize, key: &str) -> Option<&Value> {
        match self {
            Params::None => None,
            Params::Positional(_) => self.positional(index),
            Params::Named(_) => self.named(key),
        }
    }

    /// All parameter values, in positional order or named-key order.
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Params::None => Vec::new(),
            Params::Positional(values) => values.iter().collect(),
            Params::Named(map) => map.values().collect(),
        }
    }

    /// Numeric view of a constructor argument, accepting numeric strings
    /// (inline descriptor tokens arrive as strings).
    pub fn arg_f64(&self, index: usize, key: &str) -> Option<f64> {
        self.arg(index, key).and_then(ValueExt::as_numeric)
    }

    /// Unsigned-integer view of a constructor argument.
    pub fn arg_usize(&self, index: usize, key: &str) -> Option<usize> {
        self.arg_f64(index, key)
            .filter(|n| *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as usize)
    }

    /// String view of a constructor argument.
    pub fn arg_str(&self, index: usize, key: &str) -> Option<&str> {
        self.arg(index, key).and_then(Value::as_str)
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        if values.is_empty() {
            Params::None
        } else {
            Params::Positional(values)
        }
    }
}

impl From<BTreeMap<String, Value>> for Params {
    fn from(map: BTreeMap<String, Value>) -> Self {
        if map.is_empty() {
            Params::None
        } else {
            Params::Named(map)
        }
    }
}

impl From<Value> for Params {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Params::None,
            Value::Array(values) => Params::from(values),
            Value::Object(map) => Params::Named(map.into_iter().collect()),
            other => Params::single(other),
        }
    }
}

impl<const N: usize> From<[Value; N]> for Params {
    fn from(values: [Value; N]) -> Self {
        Params::from(values.to_vec())
    }
}
