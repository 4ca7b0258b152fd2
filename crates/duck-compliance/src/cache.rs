//! Per-rulebase cache of compiled theories
//!
//! One slot per rulebase id. Each slot holds the last good theory and a
//! refresh lock: recompiles of the same rulebase are serialized, while
//! readers keep using the current theory until the new one is swapped in.

use crate::error::ComplianceError;
use duck_domain::traits::RuleBaseSource;
use duck_engine::Reasoner;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

/// A theory together with the rulebase revision it was compiled from
#[derive(Debug)]
pub struct CompiledTheory<T> {
    /// Rulebase id
    pub rulebase_id: String,
    /// Revision the theory was compiled at
    pub revision: String,
    /// Engine-specific compiled form
    pub theory: T,
}

struct Slot<T> {
    current: RwLock<Option<Arc<CompiledTheory<T>>>>,
    refresh: Mutex<()>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    fn load(&self) -> Option<Arc<CompiledTheory<T>>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, theory: Arc<CompiledTheory<T>>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(theory);
    }

    fn load_at(&self, revision: &str) -> Option<Arc<CompiledTheory<T>>> {
        self.load().filter(|t| t.revision == revision)
    }
}

/// Cache of compiled theories, one per rulebase id
pub struct TheoryCache<R: Reasoner> {
    reasoner: Arc<R>,
    slots: RwLock<HashMap<String, Arc<Slot<R::Theory>>>>,
}

impl<R: Reasoner> TheoryCache<R> {
    /// Create an empty cache compiling with `reasoner`
    pub fn new(reasoner: Arc<R>) -> Self {
        Self {
            reasoner,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// The reasoner used for compilation
    pub fn reasoner(&self) -> &Arc<R> {
        &self.reasoner
    }

    /// Compile a rulebase without caching the result
    pub fn compile(
        &self,
        rulebase_id: &str,
        revision: &str,
        source: &str,
    ) -> Result<CompiledTheory<R::Theory>, ComplianceError> {
        let theory = self
            .reasoner
            .compile(rulebase_id, source)
            .map_err(|source| ComplianceError::Compile {
                rulebase: rulebase_id.to_string(),
                source,
            })?;
        info!(rulebase = rulebase_id, revision, "compiled rulebase");
        Ok(CompiledTheory {
            rulebase_id: rulebase_id.to_string(),
            revision: revision.to_string(),
            theory,
        })
    }

    /// Install a compiled theory, replacing whatever the slot held
    pub fn insert(&self, compiled: CompiledTheory<R::Theory>) -> Arc<CompiledTheory<R::Theory>> {
        let compiled = Arc::new(compiled);
        self.slot(&compiled.rulebase_id).store(Arc::clone(&compiled));
        compiled
    }

    /// Last good theory for a rulebase, whatever its revision
    ///
    /// Never waits for an in-flight refresh.
    pub fn current(&self, rulebase_id: &str) -> Option<Arc<CompiledTheory<R::Theory>>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(rulebase_id)
            .and_then(|slot| slot.load())
    }

    /// Theory for a rulebase at `revision`, recompiling on mismatch
    ///
    /// Concurrent callers asking for the same stale revision compile it once;
    /// the others wait for that compile and reuse its result.
    pub fn get_theory<S>(
        &self,
        rulebase_id: &str,
        revision: &str,
        source: &S,
    ) -> Result<Arc<CompiledTheory<R::Theory>>, ComplianceError>
    where
        S: RuleBaseSource + ?Sized,
        S::Error: Display,
    {
        // ids without a slot only get one once their source is fetched
        let (slot, mut fetched) = match self.existing_slot(rulebase_id) {
            Some(slot) => (slot, None),
            None => {
                let text = Self::fetch(rulebase_id, revision, source)?;
                (self.slot(rulebase_id), Some(text))
            }
        };
        if let Some(theory) = slot.load_at(revision) {
            return Ok(theory);
        }

        let _refresh = slot.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        // another caller may have refreshed while we waited
        if let Some(theory) = slot.load_at(revision) {
            debug!(rulebase = rulebase_id, revision, "theory refreshed concurrently");
            return Ok(theory);
        }

        let text = match fetched.take() {
            Some(text) => text,
            None => Self::fetch(rulebase_id, revision, source)?,
        };
        let compiled = Arc::new(self.compile(rulebase_id, revision, &text)?);
        slot.store(Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Number of rulebases with a slot
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fetch<S>(rulebase_id: &str, revision: &str, source: &S) -> Result<String, ComplianceError>
    where
        S: RuleBaseSource + ?Sized,
        S::Error: Display,
    {
        source
            .fetch_source(rulebase_id, revision)
            .map_err(|e| ComplianceError::Source(format!("{}: {}", rulebase_id, e)))
    }

    fn existing_slot(&self, rulebase_id: &str) -> Option<Arc<Slot<R::Theory>>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(rulebase_id)
            .cloned()
    }

    fn slot(&self, rulebase_id: &str) -> Arc<Slot<R::Theory>> {
        if let Some(slot) = self.existing_slot(rulebase_id) {
            return slot;
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            slots
                .entry(rulebase_id.to_string())
                .or_insert_with(|| Arc::new(Slot::new())),
        )
    }
}
