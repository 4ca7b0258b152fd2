//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use duck_compliance::ComplianceConfig;
use duck_domain::{Dictionary, Document, Taxonomy, User};
use duck_normalizer::{unfold, Normalizer, TaxonomyStore};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Execute the normalize command.
pub fn execute_normalize(
    args: NormalizeArgs,
    config: &ComplianceConfig,
    formatter: &Formatter,
) -> Result<String> {
    let document: Document = read_json(&args.document)?;
    let global_dict = match &args.user {
        Some(path) => read_json::<User>(path)?.global_dictionary,
        None => Dictionary::new(),
    };

    let taxonomy = match (&args.taxonomy, &args.web_dir) {
        (Some(path), _) => Arc::new(read_json::<Taxonomy>(path)?),
        (None, Some(dir)) => TaxonomyStore::new(dir).get(&document.locale)?,
        (None, None) => TaxonomyStore::new(&config.web_dir).get(&document.locale)?,
    };

    let normalizer = Normalizer::new(document, global_dict, Arc::clone(&taxonomy));
    let normalized = normalizer.normalize().inspect_err(|e| {
        warn!(tracking_id = e.tracking_id(), "document rejected");
    })?;
    let normalized = if args.unfold {
        unfold(&normalized, &taxonomy)
    } else {
        normalized
    };

    info!(
        document = %normalizer.denormalize().id,
        statements = normalized.document.statements.len(),
        "normalized document"
    );
    formatter.format_document(&normalized)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
