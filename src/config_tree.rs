//! `ConfigTree` — the structured-config value type threaded through refs,
//! connections, and deployments. Loading such a tree from a file is an
//! out-of-scope collaborator's job; this crate only ever constructs,
//! merges, and reads these values in memory.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured configuration value, keyed like a HOCON/JSON object.
///
/// Modeled as a thin wrapper around a JSON object rather than a bespoke
/// tree so that it serializes identically to the `ApplicationDescriptor`'s
/// other fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ConfigTree(Map<String, Value>);

impl ConfigTree {
    pub fn empty() -> Self {
        ConfigTree(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// A single-key config tree, used for the container-port config a
    /// server streamlet deployment carries.
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        ConfigTree::empty().with(key, value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ConfigTree {
    fn from(map: Map<String, Value>) -> Self {
        ConfigTree(map)
    }
}
