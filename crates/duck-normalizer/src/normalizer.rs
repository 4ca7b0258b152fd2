//! Statement validation and completion

use crate::error::NormalizeError;
use crate::resolver::resolve;
use duck_domain::{
    Dictionary, Document, EntryType, NormalizedDocument, Parts, Statement, Taxonomy, UNQUALIFIED,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Normalizes one document against a user's vocabulary and a taxonomy
///
/// Keeps the original so it can be handed back after checking.
#[derive(Debug, Clone)]
pub struct Normalizer {
    original: Document,
    global_dict: Dictionary,
    taxonomy: Arc<Taxonomy>,
}

impl Normalizer {
    /// Create a normalizer for `original`
    pub fn new(original: Document, global_dict: Dictionary, taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            original,
            global_dict,
            taxonomy,
        }
    }

    /// Normalize using the document's own dictionary
    pub fn normalize(&self) -> Result<NormalizedDocument, NormalizeError> {
        normalize(
            &self.original,
            &self.original.dictionary,
            &self.global_dict,
            &self.taxonomy,
        )
    }

    /// The document as it was before normalization
    pub fn denormalize(&self) -> &Document {
        &self.original
    }

    /// Taxonomy in use
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}

/// Validate and complete every statement of `document`
///
/// Stops at the first invalid statement. Only id, locale, name, owner and
/// revision are carried over from the source document.
pub fn normalize(
    document: &Document,
    document_dict: &Dictionary,
    global_dict: &Dictionary,
    taxonomy: &Taxonomy,
) -> Result<NormalizedDocument, NormalizeError> {
    let mut parts = Parts::new();
    let mut statements = Vec::with_capacity(document.statements.len());

    for statement in &document.statements {
        record_parts(statement, document_dict, global_dict, taxonomy, &mut parts);

        if let Err(err) = validate(statement, &statements) {
            warn!(document = %document.id, error = %err, "normalization failed");
            return Err(err);
        }

        let mut stmt = statement.clone();
        if stmt.qualifier_code.is_empty() {
            stmt.qualifier_code = UNQUALIFIED.to_string();
        }
        triangulate_scopes(&mut stmt);
        statements.push(stmt);
    }

    debug!(
        document = %document.id,
        statements = statements.len(),
        parts = parts.len(),
        "normalized document"
    );

    Ok(NormalizedDocument {
        document: Document {
            id: document.id.clone(),
            locale: document.locale.clone(),
            name: document.name.clone(),
            owner: document.owner.clone(),
            revision: document.revision.clone(),
            statements,
            ..Default::default()
        },
        parts,
    })
}

fn record_parts(
    statement: &Statement,
    document_dict: &Dictionary,
    global_dict: &Dictionary,
    taxonomy: &Taxonomy,
    parts: &mut Parts,
) {
    let fields = [
        (EntryType::Action, &statement.action_code),
        (EntryType::Qualifier, &statement.qualifier_code),
        (EntryType::DataCategory, &statement.data_category_code),
        (EntryType::Scope, &statement.use_scope_code),
        (EntryType::Scope, &statement.result_scope_code),
        (EntryType::Scope, &statement.source_scope_code),
    ];

    for (kind, raw) in fields {
        if raw.is_empty() {
            continue;
        }
        let canonical = resolve(kind, raw, document_dict, global_dict, taxonomy);
        if !canonical.is_empty() {
            parts.insert(raw.as_str(), canonical);
        }
    }
}

fn validate(statement: &Statement, accepted: &[Statement]) -> Result<(), NormalizeError> {
    let tracking_id = statement.tracking_id.clone();

    if !statement.has_scope() {
        return Err(NormalizeError::MissingScope {
            tracking_id,
            partial: accepted.to_vec(),
        });
    }
    if statement.action_code.is_empty() {
        return Err(NormalizeError::MissingAction {
            tracking_id,
            partial: accepted.to_vec(),
        });
    }
    if statement.data_category_code.is_empty() {
        return Err(NormalizeError::MissingDataCategory {
            tracking_id,
            partial: accepted.to_vec(),
        });
    }
    Ok(())
}

fn fill(target: &mut String, from: &str) {
    if target.is_empty() {
        *target = from.to_string();
    }
}

/// Fill empty scopes from the set ones, in use → source → result order.
/// A set field is never overwritten.
fn triangulate_scopes(stmt: &mut Statement) {
    if !stmt.use_scope_code.is_empty() {
        let use_scope = stmt.use_scope_code.clone();
        fill(&mut stmt.source_scope_code, &use_scope);
        fill(&mut stmt.result_scope_code, &use_scope);
    }
    if !stmt.source_scope_code.is_empty() {
        let source = stmt.source_scope_code.clone();
        fill(&mut stmt.use_scope_code, &source);
        fill(&mut stmt.result_scope_code, &source);
    }
    if !stmt.result_scope_code.is_empty() {
        let result = stmt.result_scope_code.clone();
        fill(&mut stmt.use_scope_code, &result);
        fill(&mut stmt.source_scope_code, &result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_domain::{DictionaryEntry, DictionaryType};

    fn stmt(id: &str, use_scope: &str, action: &str, category: &str) -> Statement {
        Statement {
            use_scope_code: use_scope.to_string(),
            action_code: action.to_string(),
            data_category_code: category.to_string(),
            tracking_id: id.to_string(),
            ..Default::default()
        }
    }

    fn doc(statements: Vec<Statement>) -> Document {
        Document {
            id: "doc-1".to_string(),
            name: "Example".to_string(),
            revision: "3-abc".to_string(),
            owner: "alice".to_string(),
            locale: "en".to_string(),
            description: "dropped".to_string(),
            assumption_set: "default".to_string(),
            statements,
            ..Default::default()
        }
    }

    fn normalize_plain(document: &Document) -> Result<NormalizedDocument, NormalizeError> {
        normalize(document, &document.dictionary, &Dictionary::new(), &Taxonomy::new())
    }

    #[test]
    fn test_microsoft_azure_scenario() {
        let mut document = doc(vec![stmt("s1", "microsoft_azure", "collect", "c1")]);
        document.dictionary.insert(
            "microsoft_azure".to_string(),
            DictionaryEntry {
                value: "Microsoft Azure".to_string(),
                entry_type: EntryType::Scope,
                code: "microsoft_azure".to_string(),
                category: "2".to_string(),
                dictionary_type: DictionaryType::Document,
            },
        );
        let taxonomy = Taxonomy::new().with_entry("scope", "cloud_provider", "2");

        let normalized =
            normalize(&document, &document.dictionary, &Dictionary::new(), &taxonomy).unwrap();

        let s = &normalized.document.statements[0];
        assert_eq!(s.use_scope_code, "microsoft_azure");
        assert_eq!(s.source_scope_code, "microsoft_azure");
        assert_eq!(s.result_scope_code, "microsoft_azure");
        assert_eq!(s.qualifier_code, UNQUALIFIED);
        assert_eq!(normalized.parts.codes("microsoft_azure"), vec!["cloud_provider"]);
        assert_eq!(normalized.parts.len(), 1);
    }

    #[test]
    fn test_copies_only_identity_fields() {
        let document = doc(vec![stmt("s1", "x", "collect", "c1")]);
        let normalized = normalize_plain(&document).unwrap();

        let out = &normalized.document;
        assert_eq!(out.id, "doc-1");
        assert_eq!(out.name, "Example");
        assert_eq!(out.revision, "3-abc");
        assert_eq!(out.owner, "alice");
        assert_eq!(out.locale, "en");
        assert!(out.description.is_empty());
        assert!(out.assumption_set.is_empty());
    }

    #[test]
    fn test_validation_order_and_messages() {
        let missing_all = doc(vec![Statement {
            tracking_id: "t1".to_string(),
            ..Default::default()
        }]);
        let err = normalize_plain(&missing_all).unwrap_err();
        assert_eq!(err.to_string(), "statement is missing all scope fields: t1");

        let missing_action = doc(vec![stmt("t2", "x", "", "")]);
        let err = normalize_plain(&missing_action).unwrap_err();
        assert_eq!(err.to_string(), "statement is missing data use field: t2");

        let missing_category = doc(vec![stmt("t3", "x", "collect", "")]);
        let err = normalize_plain(&missing_category).unwrap_err();
        assert_eq!(err.to_string(), "statement is missing data category field: t3");
    }

    #[test]
    fn test_error_carries_partial_output() {
        let document = doc(vec![
            stmt("ok-1", "x", "collect", "c1"),
            stmt("bad", "x", "", "c1"),
            stmt("ok-2", "x", "collect", "c1"),
        ]);
        let err = normalize_plain(&document).unwrap_err();

        assert_eq!(err.tracking_id(), "bad");
        let ids: Vec<_> = err.partial().iter().map(|s| s.tracking_id.as_str()).collect();
        assert_eq!(ids, vec!["ok-1"]);
    }

    #[test]
    fn test_two_scopes_first_writer_wins() {
        let mut s = stmt("s1", "", "collect", "c1");
        s.source_scope_code = "src".to_string();
        s.result_scope_code = "res".to_string();
        triangulate_scopes(&mut s);
        assert_eq!(s.use_scope_code, "src");
        assert_eq!(s.source_scope_code, "src");
        assert_eq!(s.result_scope_code, "res");

        let mut s = stmt("s2", "use", "collect", "c1");
        s.result_scope_code = "res".to_string();
        triangulate_scopes(&mut s);
        assert_eq!(s.source_scope_code, "use");
        assert_eq!(s.result_scope_code, "res");
    }

    #[test]
    fn test_normalizer_denormalize_returns_original() {
        let document = doc(vec![stmt("s1", "x", "collect", "c1")]);
        let normalizer = Normalizer::new(
            document.clone(),
            Dictionary::new(),
            Arc::new(Taxonomy::new()),
        );

        let normalized = normalizer.normalize().unwrap();
        assert_ne!(normalized.document, document);
        assert_eq!(normalizer.denormalize(), &document);
    }
}
