//! Expansion of data-category refinements
//!
//! A statement may refine its data category with a chain such as
//! `c1 and c2 except c2_1`. The reasoner only understands one category per
//! statement, so refined statements are split. Derived statements are
//! numbered `<trackingId>-<n>`.

use duck_domain::{EntryType, NormalizedDocument, Operator, Statement, Taxonomy, UNQUALIFIED};
use std::collections::HashSet;

/// Unfold every statement of a normalized document
pub fn unfold(document: &NormalizedDocument, taxonomy: &Taxonomy) -> NormalizedDocument {
    let mut unfolded = document.clone();
    unfolded.document.statements = unfold_statements(&document.document.statements, taxonomy);
    unfolded
}

/// Unfold a statement list, preserving order
pub fn unfold_statements(statements: &[Statement], taxonomy: &Taxonomy) -> Vec<Statement> {
    let mut out = Vec::with_capacity(statements.len());
    for stmt in statements {
        unfold_statement(stmt, taxonomy, &mut out);
    }
    out
}

fn unfold_statement(stmt: &Statement, taxonomy: &Taxonomy, out: &mut Vec<Statement>) {
    let refinements = &stmt.data_categories;
    if refinements.is_empty() {
        out.push(stmt.clone());
        return;
    }

    for (i, refinement) in refinements.iter().enumerate() {
        let next_is_except = refinements
            .get(i + 1)
            .is_some_and(|next| next.operator == Operator::Except);

        if refinement.operator == Operator::Except || next_is_except {
            let parent = match refinement.operator {
                Operator::Except => &stmt.data_category_code,
                Operator::And => &refinement.data_category_code,
            };
            let excluded: HashSet<&str> = refinements[i..]
                .iter()
                .map(|r| r.data_category_code.as_str())
                .collect();

            let remaining = child_categories(taxonomy, parent)
                .into_iter()
                .filter(|code| !excluded.contains(code));
            for (n, code) in (i..).zip(remaining) {
                out.push(derive(stmt, code, &refinement.qualifier_code, n));
            }
            // an except consumes the rest of the chain
            return;
        }

        out.push(derive(
            stmt,
            &refinement.data_category_code,
            &refinement.qualifier_code,
            i,
        ));
    }
}

fn derive(stmt: &Statement, category: &str, qualifier: &str, n: usize) -> Statement {
    let qualifier = if qualifier.is_empty() {
        UNQUALIFIED
    } else {
        qualifier
    };
    Statement {
        data_category_code: category.to_string(),
        qualifier_code: qualifier.to_string(),
        data_categories: Vec::new(),
        tracking_id: format!("{}-{}", stmt.tracking_id, n),
        ..stmt.clone()
    }
}

/// Codes of the direct children of a data category, in taxonomy order
///
/// Children sit exactly one level deeper in the dotted category hierarchy
/// (`1.2` → `1.2.1`, `1.2.7`). Unknown codes have no children.
pub fn child_categories<'t>(taxonomy: &'t Taxonomy, code: &str) -> Vec<&'t str> {
    let Some(entries) = taxonomy.entries(EntryType::DataCategory.as_str()) else {
        return Vec::new();
    };
    let Some(parent) = entries.iter().rev().find(|e| e.code == code) else {
        return Vec::new();
    };

    let prefix = format!("{}.", parent.category);
    let depth = parent.category.split('.').count() + 1;

    entries
        .iter()
        .filter(|e| e.category.starts_with(&prefix) && e.category.split('.').count() == depth)
        .map(|e| e.code.as_str())
        .collect()
}
