//! Engine error types

use thiserror::Error;

/// Errors raised while reading a formula
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Nothing to parse
    #[error("Empty formula")]
    Empty,

    /// Input ended inside a term
    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    /// A character that cannot start or continue a term
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Character position
        pos: usize,
    },

    /// A complete term followed by more input
    #[error("Trailing input at position {0}")]
    TrailingInput(usize),

    /// Compound terms nested deeper than the limit
    #[error("Formula nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Errors reported by a reasoning engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasonerError {
    /// The rulebase could not be compiled into a theory
    #[error("Compile error: {0}")]
    Compile(String),

    /// The assumptions could not be evaluated against the theory
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}
