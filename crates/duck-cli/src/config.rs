//! Configuration loading for the CLI.

use crate::error::Result;
use duck_compliance::ComplianceConfig;
use std::path::Path;
use tracing::debug;

/// Load the configuration file, if any, then apply environment overrides.
pub fn load(path: Option<&Path>) -> Result<ComplianceConfig> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            ComplianceConfig::from_file(path)?
        }
        None => ComplianceConfig::default(),
    };
    Ok(config.apply_env())
}
