//! DUCK Domain Layer
//!
//! Data model shared by every part of the Data Use Statement Compliance
//! Checker. The types here mirror the JSON documents exchanged with the web
//! layer and the document store, so field names follow the wire format
//! (`useScopeCode`, `trackingId`, ...).
//!
//! ## Key Concepts
//!
//! - **Document**: a declared set of data-use statements owned by one user
//! - **Statement**: one declared use of personal data (scopes, action, category)
//! - **Dictionary**: document- or user-scoped vocabulary mapping local codes to categories
//! - **Taxonomy**: the canonical, locale-specific vocabulary per code type
//! - **NormalizedDocument**: a validated document plus its code-translation index
//! - **Explanation**: per-statement reasons behind a compliance verdict
//!
//! ## Architecture
//!
//! Only `serde` is used here. Behaviour lives in the normalizer, explainer
//! and compliance crates; collaborator boundaries are described in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dictionary;
pub mod document;
pub mod explanation;
pub mod normalized;
pub mod taxonomy;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use dictionary::{Dictionary, DictionaryEntry, DictionaryType, EntryType};
pub use document::{Document, Operator, Refinement, Statement, UNQUALIFIED};
pub use explanation::{BoolValue, Explanation, StmtExplanation, Verdict};
pub use normalized::{NormalizedDocument, Parts};
pub use taxonomy::{Taxonomy, TaxonomyEntry};
pub use user::User;
