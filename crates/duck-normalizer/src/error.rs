//! Normalization error types

use duck_domain::Statement;
use std::path::PathBuf;
use thiserror::Error;

/// A statement failed validation
///
/// Each variant names the offending statement and carries the statements
/// accepted before it. Callers must treat the whole normalization as failed;
/// the partial list is only there for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// None of use, source and result scope is set
    #[error("statement is missing all scope fields: {tracking_id}")]
    MissingScope {
        /// Offending statement
        tracking_id: String,
        /// Statements normalized before the failure
        partial: Vec<Statement>,
    },

    /// No action code
    #[error("statement is missing data use field: {tracking_id}")]
    MissingAction {
        /// Offending statement
        tracking_id: String,
        /// Statements normalized before the failure
        partial: Vec<Statement>,
    },

    /// No data category code
    #[error("statement is missing data category field: {tracking_id}")]
    MissingDataCategory {
        /// Offending statement
        tracking_id: String,
        /// Statements normalized before the failure
        partial: Vec<Statement>,
    },
}

impl NormalizeError {
    /// Tracking id of the statement that failed
    pub fn tracking_id(&self) -> &str {
        match self {
            NormalizeError::MissingScope { tracking_id, .. }
            | NormalizeError::MissingAction { tracking_id, .. }
            | NormalizeError::MissingDataCategory { tracking_id, .. } => tracking_id,
        }
    }

    /// Statements normalized before the failure
    pub fn partial(&self) -> &[Statement] {
        match self {
            NormalizeError::MissingScope { partial, .. }
            | NormalizeError::MissingAction { partial, .. }
            | NormalizeError::MissingDataCategory { partial, .. } => partial,
        }
    }
}

/// Errors loading a locale taxonomy
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// Locale cannot be used to build a file name
    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    /// Taxonomy file could not be read
    #[error("Failed to read taxonomy {path}: {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Taxonomy file is not valid JSON
    #[error("Failed to parse taxonomy {path}: {source}")]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
