//! DUCK Explanation Extractor
//!
//! Reads an evaluated argument graph and reports, per data-use statement,
//! which obligations the reasoner established and which were only assumed.
//!
//! # Components
//!
//! - [`Explainer`]: extracts an [`Explanation`](duck_domain::Explanation) from a graph
//! - [`fold_explanation`]: merges explanations of unfolded statements back
//!   into their source statement
//! - [`dus`]: the term shape data-use statements take inside the reasoner

#![warn(missing_docs)]

pub mod dus;
mod explainer;
mod fold;

pub use explainer::Explainer;
pub use fold::fold_explanation;
