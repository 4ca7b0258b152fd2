//! Code resolution against dictionaries and the taxonomy

use duck_domain::{Dictionary, EntryType, Taxonomy};

/// Resolve a raw code to its canonical taxonomy code
///
/// The document dictionary is consulted first, then the global dictionary.
/// Within a dictionary the first taxonomy entry (in taxonomy order) whose
/// category equals the dictionary entry's category wins. Returns an empty
/// string if nothing resolves.
pub fn resolve(
    kind: EntryType,
    raw: &str,
    document_dict: &Dictionary,
    global_dict: &Dictionary,
    taxonomy: &Taxonomy,
) -> String {
    if raw.is_empty() {
        return String::new();
    }

    [document_dict, global_dict]
        .into_iter()
        .filter_map(|dict| dict.get(raw))
        .find_map(|entry| first_category_match(taxonomy, kind, &entry.category))
        .unwrap_or_default()
}

fn first_category_match(taxonomy: &Taxonomy, kind: EntryType, category: &str) -> Option<String> {
    taxonomy
        .entries(kind.as_str())?
        .iter()
        .find(|entry| entry.category == category)
        .map(|entry| entry.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_domain::{DictionaryEntry, DictionaryType};

    fn entry(code: &str, kind: EntryType, category: &str, dt: DictionaryType) -> DictionaryEntry {
        DictionaryEntry {
            value: code.to_string(),
            entry_type: kind,
            code: code.to_string(),
            category: category.to_string(),
            dictionary_type: dt,
        }
    }

    fn dict(entries: &[(&str, &str)], dt: DictionaryType) -> Dictionary {
        entries
            .iter()
            .map(|(code, cat)| (code.to_string(), entry(code, EntryType::Scope, cat, dt)))
            .collect()
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::new()
            .with_entry("scope", "capability", "1")
            .with_entry("scope", "cloud_provider", "2")
            .with_entry("scope", "hosting", "2")
            .with_entry("scope", "third_party_services", "3")
    }

    #[test]
    fn test_resolve_from_document_dictionary() {
        let doc = dict(&[("microsoft_azure", "2")], DictionaryType::Document);
        let code = resolve(
            EntryType::Scope,
            "microsoft_azure",
            &doc,
            &Dictionary::new(),
            &taxonomy(),
        );
        assert_eq!(code, "cloud_provider");
    }

    #[test]
    fn test_first_category_match_wins() {
        // "hosting" shares category 2 but comes later
        let doc = dict(&[("aws", "2")], DictionaryType::Document);
        let code = resolve(EntryType::Scope, "aws", &doc, &Dictionary::new(), &taxonomy());
        assert_eq!(code, "cloud_provider");
    }

    #[test]
    fn test_document_dictionary_takes_precedence() {
        let doc = dict(&[("acme", "1")], DictionaryType::Document);
        let global = dict(&[("acme", "3")], DictionaryType::Global);
        let code = resolve(EntryType::Scope, "acme", &doc, &global, &taxonomy());
        assert_eq!(code, "capability");
    }

    #[test]
    fn test_falls_back_to_global_when_document_has_no_match() {
        let doc = dict(&[("acme", "99")], DictionaryType::Document);
        let global = dict(&[("acme", "3")], DictionaryType::Global);
        let code = resolve(EntryType::Scope, "acme", &doc, &global, &taxonomy());
        assert_eq!(code, "third_party_services");
    }

    #[test]
    fn test_misses_return_empty() {
        let doc = dict(&[("acme", "1")], DictionaryType::Document);
        let empty = Dictionary::new();

        assert_eq!(resolve(EntryType::Scope, "", &doc, &empty, &taxonomy()), "");
        assert_eq!(resolve(EntryType::Scope, "unknown", &doc, &empty, &taxonomy()), "");
        // no taxonomy section for the type
        assert_eq!(resolve(EntryType::Action, "acme", &doc, &empty, &taxonomy()), "");
    }
}
