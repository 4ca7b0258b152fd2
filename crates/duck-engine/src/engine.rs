//! Term capabilities consumed by explanation extraction

use crate::error::TermError;
use crate::parser::parse_term;
use crate::term::Term;
use crate::unify::{unify, Bindings};

/// Parse and unify formulas
///
/// Engines with their own term representation can implement this directly;
/// everything else uses [`SyntacticEngine`].
pub trait TermEngine: Send + Sync {
    /// Read a formula into a term
    fn parse_term(&self, text: &str) -> Result<Term, TermError>;

    /// Unify two terms
    fn unify(&self, a: &Term, b: &Term) -> Option<Bindings>;
}

/// Plain syntactic parsing and unification
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticEngine;

impl TermEngine for SyntacticEngine {
    fn parse_term(&self, text: &str) -> Result<Term, TermError> {
        parse_term(text)
    }

    fn unify(&self, a: &Term, b: &Term) -> Option<Bindings> {
        unify(a, b)
    }
}
