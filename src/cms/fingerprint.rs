//! Query fingerprinting.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Deterministic identifier for a query + variables pair.
///
/// The fingerprint doubles as the storage key for the cached result entry.
/// `serde_json` maps iterate in key order, so serializing the variables
/// yields a canonical form and identical inputs always hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryFingerprint(String);

impl QueryFingerprint {
    /// Compute the fingerprint of a query and its variables.
    pub fn compute(query: &str, variables: &Value) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        hasher.update(variables.to_string().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reconstruct a fingerprint read back from a tag mapping.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
