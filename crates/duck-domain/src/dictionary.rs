//! Dictionary module - local vocabularies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from vocabulary-local code to its entry
///
/// Keys are unique; iteration order carries no meaning.
pub type Dictionary = HashMap<String, DictionaryEntry>;

/// Kind of code a vocabulary entry (or taxonomy section) describes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    /// Data-use action (collect, share, ...)
    #[default]
    Action,

    /// Data category qualifier
    Qualifier,

    /// Data category
    DataCategory,

    /// Use, source or result scope
    Scope,
}

impl EntryType {
    /// Taxonomy section name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Action => "action",
            EntryType::Qualifier => "qualifier",
            EntryType::DataCategory => "dataCategory",
            EntryType::Scope => "scope",
        }
    }

    /// Parse a taxonomy section name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "action" => Some(EntryType::Action),
            "qualifier" => Some(EntryType::Qualifier),
            "dataCategory" => Some(EntryType::DataCategory),
            "scope" => Some(EntryType::Scope),
            _ => None,
        }
    }
}

/// Where a dictionary entry was defined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryType {
    /// Scoped to a single document
    #[default]
    Document,

    /// The acting user's global vocabulary
    #[serde(alias = "user")]
    Global,
}

/// A vocabulary entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryEntry {
    /// Display label
    pub value: String,

    /// Kind of code
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Vocabulary-local identifier
    pub code: String,

    /// Cross-vocabulary join key into the taxonomy
    pub category: String,

    /// Document-scoped or global
    pub dictionary_type: DictionaryType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_names() {
        for t in [
            EntryType::Action,
            EntryType::Qualifier,
            EntryType::DataCategory,
            EntryType::Scope,
        ] {
            assert_eq!(EntryType::parse(t.as_str()), Some(t));
        }
        assert_eq!(EntryType::parse("purpose"), None);
    }

    #[test]
    fn test_entry_from_json() {
        let json = r#"{
            "value": "Microsoft Azure",
            "type": "scope",
            "code": "microsoft_azure",
            "category": "2",
            "dictionaryType": "global"
        }"#;
        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.entry_type, EntryType::Scope);
        assert_eq!(entry.category, "2");
        assert_eq!(entry.dictionary_type, DictionaryType::Global);
    }

    #[test]
    fn test_user_alias_is_global() {
        let entry: DictionaryEntry =
            serde_json::from_str(r#"{"type": "dataCategory", "dictionaryType": "user"}"#).unwrap();
        assert_eq!(entry.entry_type, EntryType::DataCategory);
        assert_eq!(entry.dictionary_type, DictionaryType::Global);
    }
}
