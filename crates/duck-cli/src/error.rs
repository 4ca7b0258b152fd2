//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] duck_compliance::ConfigError),

    /// Input file could not be read
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON for its type
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Normalization rejected a statement
    #[error("Normalization failed: {0}")]
    Normalize(#[from] duck_normalizer::NormalizeError),

    /// Taxonomy could not be loaded
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] duck_normalizer::TaxonomyError),

    /// Rulebase catalog error
    #[error("Rulebase error: {0}")]
    Compliance(#[from] duck_compliance::ComplianceError),
}
