//! Cross-field validation context.
//!
//! Some rules need to see more than the field they run against — the
//! `confirmation` rule compares a field to a sibling. The engine snapshots
//! the collection's values before a pass and hands every rule a
//! [`ValidationContext`] with read access to those peers.

use std::collections::BTreeMap;

use serde_json::Value;

/// Read-only snapshot of peer field values for the current validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    peers: BTreeMap<String, Value>,
}

impl ValidationContext {
    /// Creates a context from `(name, value)` pairs.
    pub fn new(peers: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            peers: peers.into_iter().collect(),
        }
    }

    /// Context with no peers, for standalone field validation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Current value of a peer field, if present.
    pub fn peer(&self, name: &str) -> Option<&Value> {
        self.peers.get(name)
    }

    /// Whether a peer field exists in this snapshot.
    pub fn has_peer(&self, name: &str) -> bool {
        self.peers.contains_key(name)
    }

    /// Adds a peer value. Mostly useful when constructing contexts by hand.
    #[must_use]
    pub fn with_peer(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.peers.insert(name.into(), value.into());
        self
    }
}
