//! Taxonomy module - canonical, locale-specific vocabulary

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One canonical code within a taxonomy section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyEntry {
    /// Display label
    pub value: String,

    /// Canonical code
    pub code: String,

    /// Category key (dotted hierarchy for data categories, e.g. `1.2`)
    pub category: String,

    /// Entry may not be edited by users
    pub fixed: bool,
}

/// Mapping from section name (`action`, `scope`, ...) to its ordered entries
///
/// Loaded once per locale and read-only afterwards. Entry order is
/// significant: code resolution takes the first category match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy(HashMap<String, Vec<TaxonomyEntry>>);

impl Taxonomy {
    /// Create an empty taxonomy
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a taxonomy from its JSON asset
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Entries of a section, in taxonomy order
    pub fn entries(&self, section: &str) -> Option<&[TaxonomyEntry]> {
        self.0.get(section).map(Vec::as_slice)
    }

    /// Append an entry to a section
    pub fn push(&mut self, section: impl Into<String>, entry: TaxonomyEntry) {
        self.0.entry(section.into()).or_default().push(entry);
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_entry(
        mut self,
        section: impl Into<String>,
        code: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let code = code.into();
        self.push(
            section,
            TaxonomyEntry {
                value: code.clone(),
                code,
                category: category.into(),
                fixed: false,
            },
        );
        self
    }
}
