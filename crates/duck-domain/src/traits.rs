//! Trait definitions for external collaborators
//!
//! The document store and the rulebase repository live outside this
//! workspace. These traits are the only way the compliance pipeline reaches
//! them.

/// Source of rulebase text for (re)compilation
///
/// Implemented by whatever holds the rulebases: a directory of files, or the
/// document store for rulebases edited at runtime.
pub trait RuleBaseSource: Send + Sync {
    /// Error type for fetch operations
    type Error;

    /// Fetch the source of a rulebase at the given revision
    fn fetch_source(&self, rulebase_id: &str, revision: &str) -> Result<String, Self::Error>;
}
