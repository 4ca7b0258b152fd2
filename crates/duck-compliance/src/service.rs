//! Compliance service: catalog, cache, normalization and explanation wired together

use crate::cache::{CompiledTheory, TheoryCache};
use crate::catalog::{Catalog, DirectorySource, RuleBaseDescription};
use crate::checker::ComplianceChecker;
use crate::config::ComplianceConfig;
use crate::error::ComplianceError;
use crate::search::{Canceller, StatementRemovalSearch, VariantSearch, VariantStream};
use duck_domain::{Dictionary, Document, Explanation, NormalizedDocument, Verdict};
use duck_engine::{ArgumentGraph, Reasoner, COMPLIANT};
use duck_explainer::{fold_explanation, Explainer};
use duck_normalizer::{normalize, unfold, TaxonomyStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Verdict plus explanation for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    /// `COMPLIANT` or `NON_COMPLIANT`
    pub compliant: Verdict,
    /// Per-statement explanation, keyed by the document's tracking ids
    pub explanation: Explanation,
}

/// One page of compliant variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompliantPage {
    /// True if the document itself was compliant
    pub compliant: bool,
    /// Variants on this page, in discovery order
    pub documents: Vec<NormalizedDocument>,
}

/// Entry point for compliance checks against the rulebase catalog
///
/// # Examples
///
/// ```no_run
/// use duck_compliance::{ComplianceConfig, ComplianceService};
/// use duck_domain::{Dictionary, Document};
/// use duck_engine::MockReasoner;
///
/// let config = ComplianceConfig::default().apply_env();
/// let service = ComplianceService::initialize(config, MockReasoner::default())?;
///
/// let document: Document = serde_json::from_str(r#"{"locale": "en", "statements": []}"#)?;
/// let report = service.check("gdpr", &document, &Dictionary::new())?;
/// println!("{}", report.compliant);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ComplianceService<R: Reasoner> {
    config: ComplianceConfig,
    catalog: Catalog,
    source: DirectorySource,
    cache: TheoryCache<R>,
    checker: ComplianceChecker<R>,
    taxonomies: TaxonomyStore,
    explainer: Explainer,
    search: Arc<dyn VariantSearch>,
}

impl<R: Reasoner + 'static> ComplianceService<R> {
    /// Validate the configuration and load the rulebase catalog
    ///
    /// Fails if any rulebase cannot be compiled.
    pub fn initialize(config: ComplianceConfig, reasoner: R) -> Result<Self, ComplianceError> {
        config.validate().map_err(ComplianceError::Config)?;

        let reasoner = Arc::new(reasoner);
        let cache = TheoryCache::new(Arc::clone(&reasoner));
        let catalog = Catalog::initialize(config.rulebase_dir.clone(), &cache)?;
        let source = catalog.source();
        let search: Arc<dyn VariantSearch> =
            Arc::new(StatementRemovalSearch::new(config.max_search_variants));

        info!(rulebases = catalog.len(), "compliance service ready");

        Ok(Self {
            taxonomies: TaxonomyStore::new(config.web_dir.clone()),
            checker: ComplianceChecker::new(reasoner),
            explainer: Explainer::new(),
            config,
            catalog,
            source,
            cache,
            search,
        })
    }

    /// Replace the variant search strategy
    pub fn with_search(mut self, search: Arc<dyn VariantSearch>) -> Self {
        self.search = search;
        self
    }

    /// Service configuration
    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Catalog metadata, sorted by rulebase id
    pub fn rulebases(&self) -> Vec<RuleBaseDescription> {
        self.catalog.descriptions().cloned().collect()
    }

    /// Locale taxonomies
    pub fn taxonomies(&self) -> &TaxonomyStore {
        &self.taxonomies
    }

    /// Theory for a rulebase at its catalog revision
    pub fn theory(
        &self,
        rulebase_id: &str,
    ) -> Result<Arc<CompiledTheory<R::Theory>>, ComplianceError> {
        let desc = self
            .catalog
            .get(rulebase_id)
            .ok_or_else(|| ComplianceError::UnknownRuleBase(rulebase_id.to_string()))?;
        self.theory_at(rulebase_id, &desc.version)
    }

    /// Theory for a rulebase at a specific revision, recompiling on mismatch
    pub fn theory_at(
        &self,
        rulebase_id: &str,
        revision: &str,
    ) -> Result<Arc<CompiledTheory<R::Theory>>, ComplianceError> {
        if self.catalog.get(rulebase_id).is_none() {
            return Err(ComplianceError::UnknownRuleBase(rulebase_id.to_string()));
        }
        self.cache.get_theory(rulebase_id, revision, &self.source)
    }

    /// Normalize and unfold a document for evaluation
    pub fn prepare(
        &self,
        document: &Document,
        global_dict: &Dictionary,
    ) -> Result<NormalizedDocument, ComplianceError> {
        let taxonomy = self.taxonomies.get(&document.locale)?;
        let normalized = normalize(document, &document.dictionary, global_dict, &taxonomy)?;
        Ok(unfold(&normalized, &taxonomy))
    }

    /// Check a document and explain the verdict
    pub fn check(
        &self,
        rulebase_id: &str,
        document: &Document,
        global_dict: &Dictionary,
    ) -> Result<ComplianceReport, ComplianceError> {
        let theory = self.theory(rulebase_id)?;
        let prepared = self.prepare(document, global_dict)?;
        let graph = self.checker.evaluate(&theory, &prepared)?;

        let compliant = graph.is_in(COMPLIANT);
        let explanation = fold_explanation(
            &self.explainer.explain(&graph),
            document.statements.iter().map(|s| s.tracking_id.as_str()),
        );

        info!(
            rulebase = rulebase_id,
            document = %document.id,
            compliant,
            "checked document"
        );
        Ok(ComplianceReport {
            compliant: Verdict::from_compliant(compliant),
            explanation,
        })
    }

    /// Start a variant search for a document
    ///
    /// Variants are normalized and unfolded: a statement with data-category
    /// refinements appears as its derived statements `<id>-0`, `<id>-1`, ...
    /// and those are removed independently. Strip the `-<n>` suffix to map a
    /// derived statement back to the submitted one.
    pub fn compliant_documents(
        &self,
        rulebase_id: &str,
        document: &Document,
        global_dict: &Dictionary,
        canceller: &Canceller,
    ) -> Result<VariantStream, ComplianceError> {
        let theory = self.theory(rulebase_id)?;
        let prepared = self.prepare(document, global_dict)?;
        self.checker
            .compliant_documents(theory, &prepared, Arc::clone(&self.search), canceller)
    }

    /// One page of compliant variants
    ///
    /// Every call restarts the search: the first `offset` results are
    /// skipped and at most `max_results` (default from the configuration)
    /// are returned, then the search is cancelled. Documents carry unfolded
    /// statement ids as described on
    /// [`compliant_documents`](Self::compliant_documents).
    pub async fn compliant_documents_page(
        &self,
        rulebase_id: &str,
        document: &Document,
        global_dict: &Dictionary,
        max_results: Option<usize>,
        offset: usize,
    ) -> Result<CompliantPage, ComplianceError> {
        let max_results = max_results.unwrap_or(self.config.default_max_results);
        let canceller = Canceller::new();
        let mut stream = self.compliant_documents(rulebase_id, document, global_dict, &canceller)?;

        let mut documents = Vec::new();
        let mut skipped = 0;
        while documents.len() < max_results {
            let Some(found) = stream.next().await else {
                break;
            };
            if skipped < offset {
                skipped += 1;
                continue;
            }
            documents.push(found);
        }
        canceller.cancel();

        Ok(CompliantPage {
            compliant: stream.input_compliant(),
            documents,
        })
    }
}
