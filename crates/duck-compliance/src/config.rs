//! Configuration for the compliance service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding [`ComplianceConfig::rulebase_dir`]
pub const RULEBASE_DIR_ENV: &str = "DUCK_RULEBASEDIR";

/// Environment variable overriding [`ComplianceConfig::web_dir`]
pub const WEB_DIR_ENV: &str = "DUCK_WEBDIR";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to write config TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the compliance service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Directory holding one file per rulebase
    pub rulebase_dir: PathBuf,

    /// Web asset root; taxonomies live under `assets/config/`
    pub web_dir: PathBuf,

    /// Page size used when a caller does not ask for one
    pub default_max_results: usize,

    /// Upper bound on variants explored per search (0 = unlimited)
    pub max_search_variants: usize,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            rulebase_dir: PathBuf::from("rulebases"),
            web_dir: PathBuf::from("web"),
            default_max_results: 10,
            max_search_variants: 10_000,
        }
    }
}

impl ComplianceConfig {
    /// Exhaustive preset: no bound on explored variants
    ///
    /// Variant search is exponential in the number of statements; only use
    /// this for small documents.
    pub fn exhaustive() -> Self {
        Self {
            max_search_variants: 0,
            ..Self::default()
        }
    }

    /// Parse configuration from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Apply `DUCK_RULEBASEDIR` / `DUCK_WEBDIR` overrides from the environment
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(RULEBASE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.rulebase_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(WEB_DIR_ENV).filter(|v| !v.is_empty()) {
            self.web_dir = PathBuf::from(dir);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rulebase_dir.as_os_str().is_empty() {
            return Err("rulebase_dir must not be empty".to_string());
        }
        if self.web_dir.as_os_str().is_empty() {
            return Err("web_dir must not be empty".to_string());
        }
        if self.default_max_results == 0 {
            return Err("default_max_results must be greater than 0".to_string());
        }
        Ok(())
    }
}
