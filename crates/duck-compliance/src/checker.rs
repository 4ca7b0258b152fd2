//! Compliance evaluation against a compiled theory

use crate::assumptions::assumptions;
use crate::cache::CompiledTheory;
use crate::error::ComplianceError;
use crate::search::{CancelSignal, Canceller, VariantSearch, VariantStream};
use duck_domain::NormalizedDocument;
use duck_engine::{ArgumentGraph, Reasoner, COMPLIANT};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Evaluates normalized documents with a reasoner
pub struct ComplianceChecker<R: Reasoner> {
    reasoner: Arc<R>,
}

impl<R: Reasoner> Clone for ComplianceChecker<R> {
    fn clone(&self) -> Self {
        Self {
            reasoner: Arc::clone(&self.reasoner),
        }
    }
}

impl<R: Reasoner> ComplianceChecker<R> {
    /// Create a checker
    pub fn new(reasoner: Arc<R>) -> Self {
        Self { reasoner }
    }

    /// Build and label the argument graph for `document`
    pub fn evaluate(
        &self,
        theory: &CompiledTheory<R::Theory>,
        document: &NormalizedDocument,
    ) -> Result<R::Graph, ComplianceError> {
        let assumptions = assumptions(document)?;
        debug!(
            rulebase = %theory.rulebase_id,
            assumptions = assumptions.len(),
            "evaluating document"
        );
        Ok(self.reasoner.evaluate(&theory.theory, &assumptions)?)
    }

    /// True iff the graph labels `compliant` In
    pub fn is_compliant(
        &self,
        theory: &CompiledTheory<R::Theory>,
        document: &NormalizedDocument,
    ) -> Result<bool, ComplianceError> {
        Ok(self.evaluate(theory, document)?.is_in(COMPLIANT))
    }
}

impl<R: Reasoner + 'static> ComplianceChecker<R> {
    /// Stream compliant variants of `document`
    ///
    /// A compliant document is streamed back as is and no search starts.
    /// Otherwise a search thread is spawned that sends each compliant,
    /// minimal variant it finds; failures after that point end the stream
    /// early. Use one `canceller` per call.
    pub fn compliant_documents(
        &self,
        theory: Arc<CompiledTheory<R::Theory>>,
        document: &NormalizedDocument,
        search: Arc<dyn VariantSearch>,
        canceller: &Canceller,
    ) -> Result<VariantStream, ComplianceError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let signal = canceller.signal();

        if self.is_compliant(&theory, document)? {
            // the receiver is still alive, so this cannot fail
            let _ = tx.send(document.clone());
            return Ok(VariantStream::new(rx, signal, true));
        }

        let task = SearchTask {
            checker: self.clone(),
            theory,
            document: document.clone(),
            search,
            signal: signal.clone(),
            tx,
        };
        thread::Builder::new()
            .name("duck-variant-search".to_string())
            .spawn(move || task.run())
            .map_err(|e| ComplianceError::Search(e.to_string()))?;

        Ok(VariantStream::new(rx, signal, false))
    }
}

struct SearchTask<R: Reasoner> {
    checker: ComplianceChecker<R>,
    theory: Arc<CompiledTheory<R::Theory>>,
    document: NormalizedDocument,
    search: Arc<dyn VariantSearch>,
    signal: CancelSignal,
    tx: mpsc::UnboundedSender<NormalizedDocument>,
}

impl<R: Reasoner> SearchTask<R> {
    fn run(self) {
        info!(
            rulebase = %self.theory.rulebase_id,
            document = %self.document.document.id,
            "variant search started"
        );
        let mut emitted: Vec<Vec<usize>> = Vec::new();
        let mut explored = 0usize;

        for variant in self.search.variants(&self.document) {
            if self.signal.is_cancelled() || self.tx.is_closed() {
                debug!(explored, "variant search stopped");
                return;
            }
            explored += 1;

            // supersets of an emitted change are not minimal
            if emitted.iter().any(|e| is_subset(e, &variant.removed)) {
                continue;
            }

            match self.checker.is_compliant(&self.theory, &variant.document) {
                Ok(true) => {
                    if self.tx.send(variant.document).is_err() {
                        return;
                    }
                    emitted.push(variant.removed);
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "variant search aborted");
                    return;
                }
            }
        }

        info!(explored, found = emitted.len(), "variant search exhausted");
    }
}

/// Both slices ascending
fn is_subset(small: &[usize], large: &[usize]) -> bool {
    small.iter().all(|x| large.binary_search(x).is_ok())
}
