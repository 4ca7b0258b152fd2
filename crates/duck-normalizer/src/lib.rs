//! DUCK Document Normalizer
//!
//! Turns a data-use document written in its author's vocabulary into the
//! canonical form the reasoner consumes.
//!
//! # Pipeline
//!
//! 1. **Resolve**: map each raw code through the document dictionary, then
//!    the user's global dictionary, to a canonical taxonomy code ([`resolve`])
//! 2. **Normalize**: validate statements, default the qualifier and fill in
//!    missing scopes ([`normalize`])
//! 3. **Unfold**: expand data-category refinements into one statement per
//!    category ([`unfold`])
//!
//! Resolution fails open: a code that cannot be resolved is simply left out of
//! the [`Parts`](duck_domain::Parts) index.
//!
//! # Examples
//!
//! ```
//! use duck_domain::{Dictionary, Document, Statement, Taxonomy};
//! use duck_normalizer::normalize;
//!
//! let doc = Document {
//!     statements: vec![Statement {
//!         use_scope_code: "capability".into(),
//!         action_code: "collect".into(),
//!         data_category_code: "credentials".into(),
//!         tracking_id: "s1".into(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let normalized = normalize(&doc, &doc.dictionary, &Dictionary::new(), &Taxonomy::new()).unwrap();
//! let stmt = &normalized.document.statements[0];
//! assert_eq!(stmt.qualifier_code, "unqualified");
//! assert_eq!(stmt.result_scope_code, "capability");
//! ```

#![warn(missing_docs)]

mod error;
mod normalizer;
mod resolver;
mod taxonomy;
mod unfold;

pub use error::{NormalizeError, TaxonomyError};
pub use normalizer::{normalize, Normalizer};
pub use resolver::resolve;
pub use taxonomy::TaxonomyStore;
pub use unfold::{child_categories, unfold, unfold_statements};
