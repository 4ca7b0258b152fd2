//! Rulebase catalog
//!
//! Every regular file in the rulebase directory is one rulebase. Files start
//! with a YAML metadata header:
//!
//! ```yaml
//! meta:
//!   id: gdpr
//!   version: "2018-05"
//!   title: General Data Protection Regulation
//!   description: Rules for personal data processing in the EU
//! ```

use crate::cache::TheoryCache;
use crate::error::ComplianceError;
use duck_domain::traits::RuleBaseSource;
use duck_engine::Reasoner;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog metadata for one rulebase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBaseDescription {
    /// File the rulebase was read from
    pub filename: String,
    /// Rulebase id
    pub id: String,
    /// Version; the revision the rulebase is compiled at
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    /// Human readable title
    pub title: String,
    /// Free-text description
    pub description: String,
}

/// Accept `version: 3` as well as `version: "3"`
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a scalar version, found {:?}",
            other
        ))),
    }
}

#[derive(Deserialize)]
struct Header {
    meta: RuleBaseDescription,
}

/// Parse the metadata header of a rulebase source
pub fn read_header(source: &str) -> Result<RuleBaseDescription, serde_yaml::Error> {
    let header: Header = serde_yaml::from_str(source)?;
    Ok(header.meta)
}

/// Read every rulebase in `dir`, in file-name order
///
/// Hidden files are skipped. Returns each description with its full source.
pub fn scan(dir: &Path) -> Result<Vec<(RuleBaseDescription, String)>, ComplianceError> {
    if !std::fs::metadata(dir)?.is_dir() {
        return Err(ComplianceError::NotADirectory(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() || name.starts_with('.') {
            continue;
        }
        files.push((name, entry.path()));
    }
    files.sort();

    let mut rulebases = Vec::with_capacity(files.len());
    for (name, path) in files {
        let source = std::fs::read_to_string(&path)?;
        let mut desc = read_header(&source).map_err(|e| ComplianceError::Metadata {
            file: name.clone(),
            reason: e.to_string(),
        })?;
        if desc.id.is_empty() {
            return Err(ComplianceError::Metadata {
                file: name,
                reason: "meta.id is missing".to_string(),
            });
        }
        desc.filename = name;
        debug!(rulebase = %desc.id, file = %desc.filename, "found rulebase");
        rulebases.push((desc, source));
    }
    Ok(rulebases)
}

/// The set of rulebases available for checking
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    rulebases: BTreeMap<String, RuleBaseDescription>,
}

impl Catalog {
    /// Scan `dir`, compile every rulebase and install the theories in `cache`
    ///
    /// Fails as a whole if any rulebase cannot be read or compiled; in that
    /// case nothing is installed.
    pub fn initialize<R: Reasoner>(
        dir: impl Into<PathBuf>,
        cache: &TheoryCache<R>,
    ) -> Result<Self, ComplianceError> {
        let dir = dir.into();
        let mut rulebases = BTreeMap::new();
        let mut compiled = Vec::new();

        for (desc, source) in scan(&dir)? {
            if rulebases.contains_key(&desc.id) {
                return Err(ComplianceError::DuplicateRuleBase(desc.id));
            }
            compiled.push(cache.compile(&desc.id, &desc.version, &source)?);
            rulebases.insert(desc.id.clone(), desc);
        }

        for theory in compiled {
            cache.insert(theory);
        }
        info!(
            dir = %dir.display(),
            rulebases = rulebases.len(),
            "initialized rulebase catalog"
        );

        Ok(Self { dir, rulebases })
    }

    /// Description of a rulebase
    pub fn get(&self, rulebase_id: &str) -> Option<&RuleBaseDescription> {
        self.rulebases.get(rulebase_id)
    }

    /// All descriptions, sorted by id
    pub fn descriptions(&self) -> impl Iterator<Item = &RuleBaseDescription> {
        self.rulebases.values()
    }

    /// Number of rulebases
    pub fn len(&self) -> usize {
        self.rulebases.len()
    }

    /// True if the directory held no rulebases
    pub fn is_empty(&self) -> bool {
        self.rulebases.is_empty()
    }

    /// Source reader over the catalog's files
    pub fn source(&self) -> DirectorySource {
        DirectorySource {
            dir: self.dir.clone(),
            files: self
                .rulebases
                .values()
                .map(|d| (d.id.clone(), d.filename.clone()))
                .collect(),
        }
    }
}

/// Reads rulebase sources back from the catalog directory
///
/// File-backed rulebases have a single revision, so the requested revision
/// is informational only.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    files: HashMap<String, String>,
}

impl RuleBaseSource for DirectorySource {
    type Error = io::Error;

    fn fetch_source(&self, rulebase_id: &str, _revision: &str) -> Result<String, io::Error> {
        let file = self.files.get(rulebase_id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("rulebase {} is not in the catalog", rulebase_id),
            )
        })?;
        std::fs::read_to_string(self.dir.join(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_engine::MockReasoner;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn rulebase(id: &str, version: &str) -> String {
        format!(
            "meta:\n  id: {}\n  version: \"{}\"\n  title: {} rules\n  description: test\nrules: []\n",
            id, version, id
        )
    }

    #[test]
    fn test_read_header() {
        let desc = read_header(&rulebase("gdpr", "1.0")).unwrap();
        assert_eq!(desc.id, "gdpr");
        assert_eq!(desc.version, "1.0");
        assert_eq!(desc.title, "gdpr rules");
        assert!(desc.filename.is_empty());
        assert!(read_header("rules: []").is_err());

        let numeric = read_header("meta:\n  id: x\n  version: 3\n").unwrap();
        assert_eq!(numeric.version, "3");
    }

    #[test]
    fn test_initialize_compiles_everything() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.yml"), rulebase("hipaa", "3")).unwrap();
        fs::write(dir.path().join("a.yml"), rulebase("gdpr", "1")).unwrap();
        fs::write(dir.path().join(".swp"), "garbage").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();

        let reasoner = MockReasoner::default();
        let cache = TheoryCache::new(Arc::new(reasoner.clone()));
        let catalog = Catalog::initialize(dir.path(), &cache).unwrap();

        let ids: Vec<_> = catalog.descriptions().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["gdpr", "hipaa"]);
        assert_eq!(catalog.get("hipaa").unwrap().filename, "b.yml");
        assert_eq!(reasoner.compile_count(), 2);
        assert_eq!(cache.current("gdpr").unwrap().revision, "1");
    }

    #[test]
    fn test_initialize_is_fail_closed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yml"), rulebase("gdpr", "1")).unwrap();
        fs::write(
            dir.path().join("b.yml"),
            rulebase("broken", "1") + "notes: syntax error\n",
        )
        .unwrap();

        let reasoner = MockReasoner::default().fail_compile_on("syntax error");
        let cache = TheoryCache::new(Arc::new(reasoner));
        let result = Catalog::initialize(dir.path(), &cache);

        assert!(matches!(result, Err(ComplianceError::Compile { .. })));
        assert!(cache.current("gdpr").is_none());
    }

    #[test]
    fn test_initialize_rejects_bad_metadata() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yml"), "meta:\n  title: no id\n").unwrap();
        let cache = TheoryCache::new(Arc::new(MockReasoner::default()));
        assert!(matches!(
            Catalog::initialize(dir.path(), &cache),
            Err(ComplianceError::Metadata { .. })
        ));

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yml"), rulebase("gdpr", "1")).unwrap();
        fs::write(dir.path().join("b.yml"), rulebase("gdpr", "2")).unwrap();
        assert!(matches!(
            Catalog::initialize(dir.path(), &cache),
            Err(ComplianceError::DuplicateRuleBase(_))
        ));
    }

    #[test]
    fn test_initialize_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        let cache = TheoryCache::new(Arc::new(MockReasoner::default()));

        assert!(matches!(
            Catalog::initialize(&file, &cache),
            Err(ComplianceError::NotADirectory(_))
        ));
        assert!(matches!(
            Catalog::initialize(dir.path().join("missing"), &cache),
            Err(ComplianceError::Io(_))
        ));
    }

    #[test]
    fn test_directory_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.yml"), rulebase("gdpr", "1")).unwrap();
        let cache = TheoryCache::new(Arc::new(MockReasoner::default()));
        let catalog = Catalog::initialize(dir.path(), &cache).unwrap();

        let source = catalog.source();
        assert!(source.fetch_source("gdpr", "any").unwrap().contains("id: gdpr"));
        assert!(source.fetch_source("other", "any").is_err());
    }
}
