//! Translation of normalized documents into reasoner assumptions

use crate::error::ComplianceError;
use duck_domain::{NormalizedDocument, Statement};
use duck_engine::Term;
use duck_explainer::dus::{DATA_USE_STATEMENT, DUS};

/// Assumption terms for a document
///
/// One `dataUseStatement(dus(...))` per statement, in document order,
/// followed by one `isA(Raw,Canonical)` fact per resolved code.
pub fn assumptions(document: &NormalizedDocument) -> Result<Vec<Term>, ComplianceError> {
    let mut terms = document
        .document
        .statements
        .iter()
        .map(statement_term)
        .collect::<Result<Vec<_>, _>>()?;

    let mut facts: Vec<(&str, &str)> = document.parts.pairs().collect();
    facts.sort_unstable();
    terms.extend(facts.into_iter().map(|(raw, canonical)| {
        Term::compound("isA", vec![Term::atom(raw), Term::atom(canonical)])
    }));

    Ok(terms)
}

/// `dataUseStatement(dus(Use,Qualifier,Category,Source,Action,Result,TrackingId,Passive))`
pub fn statement_term(stmt: &Statement) -> Result<Term, ComplianceError> {
    if stmt.tracking_id.is_empty() {
        return Err(ComplianceError::MalformedStatement(
            "statement has no tracking id".to_string(),
        ));
    }
    if stmt.action_code.is_empty() || stmt.data_category_code.is_empty() {
        return Err(ComplianceError::MalformedStatement(format!(
            "statement {} has no action or data category",
            stmt.tracking_id
        )));
    }

    let dus = Term::compound(
        DUS,
        vec![
            Term::atom(stmt.use_scope_code.as_str()),
            Term::atom(stmt.qualifier_code.as_str()),
            Term::atom(stmt.data_category_code.as_str()),
            Term::atom(stmt.source_scope_code.as_str()),
            Term::atom(stmt.action_code.as_str()),
            Term::atom(stmt.result_scope_code.as_str()),
            Term::atom(stmt.tracking_id.as_str()),
            Term::atom(if stmt.passive { "true" } else { "false" }),
        ],
    );
    Ok(Term::compound(DATA_USE_STATEMENT, vec![dus]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_domain::{Document, Parts};
    use duck_explainer::dus;

    fn stmt(id: &str) -> Statement {
        Statement {
            use_scope_code: "Azure".to_string(),
            source_scope_code: "Azure".to_string(),
            result_scope_code: "Azure".to_string(),
            qualifier_code: "unqualified".to_string(),
            action_code: "collect".to_string(),
            data_category_code: "contact_data".to_string(),
            tracking_id: id.to_string(),
            passive: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_statement_term_shape() {
        let term = statement_term(&stmt("7f3a-01")).unwrap();
        assert_eq!(
            term.to_string(),
            "dataUseStatement(dus('Azure',unqualified,contact_data,'Azure',collect,'Azure','7f3a-01',true))"
        );

        let inner = dus::statement_term(&term).unwrap();
        assert_eq!(dus::tracking_id(inner), Some("7f3a-01"));
    }

    #[test]
    fn test_assumptions_include_is_a_facts() {
        let mut parts = Parts::new();
        parts.insert("Azure", "cloud_provider");
        let doc = NormalizedDocument {
            document: Document {
                statements: vec![stmt("s1"), stmt("s2")],
                ..Default::default()
            },
            parts,
        };

        let terms = assumptions(&doc).unwrap();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[2].to_string(), "isA('Azure',cloud_provider)");
    }

    #[test]
    fn test_malformed_statements() {
        assert!(matches!(
            statement_term(&stmt("")),
            Err(ComplianceError::MalformedStatement(_))
        ));

        let mut no_action = stmt("s1");
        no_action.action_code.clear();
        assert!(matches!(
            statement_term(&no_action),
            Err(ComplianceError::MalformedStatement(_))
        ));
    }
}
