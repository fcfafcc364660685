//! Default message sets and `{placeholder}` template interpolation.
//!
//! Every class-backed rule carries a [`MessageSet`]: a map from message
//! variant (`"max"`, `"between"`, `"format"`, ...) to a template string.
//! Templates interpolate `{key}` placeholders from an explicit parameter
//! map built by the failing rule; a placeholder with no matching parameter
//! substitutes to the empty string.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Fallback when a rule has no message for a variant and no default.
pub const GENERIC_INVALID: &str = "The value is invalid";

/// Fallback for rules that do not frame their own messages at all.
pub const GENERIC_INVALID_VALUE: &str = "Invalid value";

/// Key of the catch-all entry in a message set or override map.
pub const DEFAULT_VARIANT: &str = "default";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

// ============================================================================
// MESSAGE SET
// ============================================================================

/// Variant-keyed default messages owned by a rule.
///
/// Resolution falls back from the requested variant to the `"default"`
/// entry to [`GENERIC_INVALID`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSet {
    messages: BTreeMap<String, String>,
}

impl MessageSet {
    /// Empty message set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(variant, template)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            messages: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Sets (or replaces) the template for a variant.
    pub fn set(&mut self, variant: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(variant.into(), template.into());
    }

    /// Template for a variant, falling back to `"default"`, then to
    /// [`GENERIC_INVALID`].
    pub fn resolve(&self, variant: Option<&str>) -> &str {
        variant
            .and_then(|v| self.messages.get(v))
            .or_else(|| self.messages.get(DEFAULT_VARIANT))
            .map_or(GENERIC_INVALID, String::as_str)
    }

    /// Raw template for a variant, with no fallback.
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.messages.get(variant).map(String::as_str)
    }
}

// ============================================================================
// INTERPOLATION
// ============================================================================

/// Substitutes `{key}` placeholders in `template` from `params`.
///
/// Placeholders with no matching parameter become empty strings; the
/// output is always a plain string.
pub fn interpolate(template: &str, params: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            params.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}
