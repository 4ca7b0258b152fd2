//! Locale taxonomy loading

use crate::error::TaxonomyError;
use duck_domain::Taxonomy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Loads `<web_dir>/assets/config/taxonomy-<locale>.json` once per locale
///
/// Loaded taxonomies are shared read-only between all callers.
#[derive(Debug)]
pub struct TaxonomyStore {
    web_dir: PathBuf,
    loaded: RwLock<HashMap<String, Arc<Taxonomy>>>,
}

impl TaxonomyStore {
    /// Create a store rooted at the web asset directory
    pub fn new(web_dir: impl Into<PathBuf>) -> Self {
        Self {
            web_dir: web_dir.into(),
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Path of the taxonomy file for a locale
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.web_dir
            .join("assets")
            .join("config")
            .join(format!("taxonomy-{}.json", locale))
    }

    /// Taxonomy for `locale`, loading it on first use
    pub fn get(&self, locale: &str) -> Result<Arc<Taxonomy>, TaxonomyError> {
        if let Some(taxonomy) = self
            .loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
        {
            return Ok(Arc::clone(taxonomy));
        }

        if locale.is_empty() || locale.contains(['/', '\\', '.']) {
            return Err(TaxonomyError::InvalidLocale(locale.to_string()));
        }

        let taxonomy = Arc::new(load_file(&self.path_for(locale))?);
        info!(locale, "loaded taxonomy");

        let mut loaded = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        // a concurrent loader may have won
        Ok(Arc::clone(
            loaded.entry(locale.to_string()).or_insert(taxonomy),
        ))
    }

    /// Register a taxonomy without reading it from disk
    pub fn insert(&self, locale: impl Into<String>, taxonomy: Taxonomy) {
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locale.into(), Arc::new(taxonomy));
    }
}

/// Read a taxonomy JSON file
pub(crate) fn load_file(path: &Path) -> Result<Taxonomy, TaxonomyError> {
    let json = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Taxonomy::from_json(&json).map_err(|source| TaxonomyError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
