//! Document module - data-use documents and their statements

use crate::Dictionary;
use serde::{Deserialize, Serialize};

/// Qualifier assigned to statements that declare none
pub const UNQUALIFIED: &str = "unqualified";

/// A data-use document
///
/// Owned by its author (`owner`). The `revision` is the optimistic-concurrency
/// token handed out by the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Document identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Store revision token
    pub revision: String,

    /// Id of the owning user
    pub owner: String,

    /// Locale selecting the taxonomy (e.g. `en`)
    pub locale: String,

    /// Free-text description
    pub description: String,

    /// Identifier of the assumption set the document is checked under
    pub assumption_set: String,

    /// Data-use statements, in document order
    pub statements: Vec<Statement>,

    /// Vocabulary scoped to this document
    pub dictionary: Dictionary,
}

impl Document {
    /// Find a statement by tracking id
    pub fn statement(&self, tracking_id: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.tracking_id == tracking_id)
    }
}

/// One declared use of personal data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statement {
    /// Scope in which the data is used
    pub use_scope_code: String,

    /// Qualifier of the data category
    pub qualifier_code: String,

    /// Category of the data being used
    pub data_category_code: String,

    /// Finer-grained category refinements (`and` / `except` clauses)
    pub data_categories: Vec<Refinement>,

    /// Scope the data is sourced from
    pub source_scope_code: String,

    /// What is done with the data
    pub action_code: String,

    /// Scope receiving the result
    pub result_scope_code: String,

    /// Stable identity within the document
    pub tracking_id: String,

    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Passive voice flag
    pub passive: bool,
}

impl Statement {
    /// True if at least one of the three scope fields is set
    pub fn has_scope(&self) -> bool {
        !self.use_scope_code.is_empty()
            || !self.source_scope_code.is_empty()
            || !self.result_scope_code.is_empty()
    }
}

/// How a refinement combines with the statement's data category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// The refined category is used in addition
    #[default]
    And,

    /// The refined category is excluded
    Except,
}

impl Operator {
    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Except => "except",
        }
    }
}

/// A finer-grained data category attached to a statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refinement {
    /// Combination operator
    pub operator: Operator,

    /// Qualifier of the refined category
    pub qualifier_code: String,

    /// Refined data category
    pub data_category_code: String,
}
