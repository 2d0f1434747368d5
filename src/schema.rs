//! Schema model and compatibility.

use serde::{Deserialize, Serialize};

/// A named schema. Two schemas are compatible iff their fingerprints are
/// bytewise equal; there is no structural subtyping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Schema {
    pub name: String,
    pub fingerprint: Vec<u8>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fingerprint: impl Into<Vec<u8>>) -> Self {
        Schema {
            name: name.into(),
            fingerprint: fingerprint.into(),
        }
    }

    /// Two schemas are compatible iff their fingerprints are bytewise equal.
    pub fn is_compatible_with(&self, other: &Schema) -> bool {
        self.fingerprint == other.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_is_fingerprint_equality() {
        let a = Schema::new("Foo", vec![1, 2, 3]);
        let b = Schema::new("FooRenamed", vec![1, 2, 3]);
        let c = Schema::new("Foo", vec![1, 2, 4]);
        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
    }
}
