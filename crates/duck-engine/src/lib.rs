//! DUCK Reasoning Engine Interface
//!
//! The narrow capability surface through which the compliance pipeline talks
//! to an argumentation engine.
//!
//! # Architecture
//!
//! The engine itself (rule compilation, argument construction, labelling)
//! lives outside this workspace. This crate fixes what the pipeline needs
//! from it:
//!
//! - **Terms**: [`Term`], [`parse_term`] and [`unify`] for reading formulas
//! - [`TermEngine`]: parse + unify behind a trait, [`SyntacticEngine`] by default
//! - [`ArgumentGraph`]: read-only access to formulas and their [`Label`]s
//! - [`Reasoner`]: compile a rulebase into a theory, evaluate assumptions against it
//!
//! # Providers
//!
//! - `MockReasoner`: closure-driven reasoner for tests
//!
//! # Examples
//!
//! ```
//! use duck_engine::{parse_term, unify};
//!
//! let goal = parse_term("pii(dus(a,X))").unwrap();
//! let fact = parse_term("pii(dus(a,'s-1'))").unwrap();
//! let bindings = unify(&goal, &fact).unwrap();
//! assert_eq!(bindings.get("X").unwrap().to_string(), "'s-1'");
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod graph;
mod parser;
mod reasoner;
mod term;
mod unify;

pub use engine::{SyntacticEngine, TermEngine};
pub use error::{ReasonerError, TermError};
pub use graph::{ArgumentGraph, Label, LabelledGraph, COMPLIANT};
pub use parser::{parse_term, MAX_TERM_DEPTH};
pub use reasoner::{MockReasoner, MockTheory, Reasoner};
pub use term::Term;
pub use unify::{unify, Bindings};
