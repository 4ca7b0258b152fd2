//! Normalized documents and their code-translation index

use crate::Document;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Index from a raw (pre-resolution) code to the canonical codes found for it
///
/// Each value is a set: members have no defined order, and callers must not
/// depend on one. Serialized as a map of lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parts(HashMap<String, HashSet<String>>);

impl Parts {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `raw` resolved to `canonical`
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.0.entry(raw.into()).or_default().insert(canonical.into());
    }

    /// Canonical codes recorded for a raw code
    pub fn get(&self, raw: &str) -> Option<&HashSet<String>> {
        self.0.get(raw)
    }

    /// Canonical codes for a raw code as a list (order unspecified)
    pub fn codes(&self, raw: &str) -> Vec<String> {
        self.0
            .get(raw)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Iterate over every `(raw, canonical)` pair
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(raw, set)| set.iter().map(move |c| (raw.as_str(), c.as_str())))
    }

    /// Number of raw codes indexed
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A validated, completed document plus its [`Parts`] index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// The normalized document
    #[serde(flatten)]
    pub document: Document,

    /// Raw code to canonical codes
    #[serde(default)]
    pub parts: Parts,
}
