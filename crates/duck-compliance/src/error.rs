//! Error types for compliance checking

use duck_engine::ReasonerError;
use duck_normalizer::{NormalizeError, TaxonomyError};
use thiserror::Error;

/// Errors that can occur while checking compliance
#[derive(Error, Debug)]
pub enum ComplianceError {
    /// Rulebase directory could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rulebase directory path is not a directory
    #[error("Rulebase directory {0} is not a directory")]
    NotADirectory(String),

    /// A rulebase file has an unusable metadata header
    #[error("Invalid rulebase metadata in {file}: {reason}")]
    Metadata {
        /// Rulebase file name
        file: String,
        /// What was wrong
        reason: String,
    },

    /// Two rulebase files declare the same id
    #[error("Duplicate rulebase id: {0}")]
    DuplicateRuleBase(String),

    /// A rulebase did not compile
    #[error("Failed to compile rulebase {rulebase}: {source}")]
    Compile {
        /// Rulebase id
        rulebase: String,
        /// Engine error
        #[source]
        source: ReasonerError,
    },

    /// No rulebase with this id in the catalog
    #[error("Unknown rulebase: {0}")]
    UnknownRuleBase(String),

    /// Rulebase source could not be fetched for recompilation
    #[error("Rulebase source error: {0}")]
    Source(String),

    /// A statement cannot be expressed as an assumption
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    /// The reasoner failed during evaluation
    #[error("Reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),

    /// The document failed normalization
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// The document's taxonomy could not be loaded
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// The variant search could not be started
    #[error("Search error: {0}")]
    Search(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
