//! Search for compliant document variants
//!
//! A search runs on its own thread and streams compliant variants over an
//! unbounded channel. It is stopped cooperatively through a [`Canceller`].

use duck_domain::NormalizedDocument;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Single-use cancellation token for one search
///
/// Cancelling consumes the token. Dropping it also cancels, so a search
/// never outlives the caller that started it.
#[derive(Debug, Default)]
pub struct Canceller {
    flag: Arc<AtomicBool>,
}

impl Canceller {
    /// Create a fresh token
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer handle for the task being controlled
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            flag: Arc::clone(&self.flag),
        }
    }

    /// Stop the search
    pub fn cancel(self) {
        debug!("search cancelled");
        // Drop raises the flag
    }
}

impl Drop for Canceller {
    fn drop(&mut self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Read side of a [`Canceller`]
#[derive(Debug, Clone)]
pub struct CancelSignal {
    flag: Arc<AtomicBool>,
}

impl CancelSignal {
    /// True once the controlling [`Canceller`] was cancelled or dropped
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A candidate document derived from the one being checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// The candidate
    pub document: NormalizedDocument,
    /// Indices of the original statements left out, ascending
    pub removed: Vec<usize>,
}

/// Strategy enumerating candidate variants of a document
///
/// Variants must come in non-decreasing order of modification size so that
/// the first compliant variant found for a change set is a minimal one.
pub trait VariantSearch: Send + Sync {
    /// Lazily enumerate variants of `document`
    fn variants<'a>(
        &'a self,
        document: &'a NormalizedDocument,
    ) -> Box<dyn Iterator<Item = Variant> + 'a>;
}

/// Breadth-first search over statement subsets
///
/// Removes one statement, then every pair, and so on, in lexicographic
/// order within each level.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementRemovalSearch {
    max_variants: usize,
}

impl StatementRemovalSearch {
    /// Explore at most `max_variants` variants (0 = unlimited)
    pub fn new(max_variants: usize) -> Self {
        Self { max_variants }
    }
}

impl VariantSearch for StatementRemovalSearch {
    fn variants<'a>(
        &'a self,
        document: &'a NormalizedDocument,
    ) -> Box<dyn Iterator<Item = Variant> + 'a> {
        let statements = &document.document.statements;
        let variants = RemovalSets::new(statements.len()).map(move |removed| {
            let mut variant = document.clone();
            variant.document.statements = statements
                .iter()
                .enumerate()
                .filter(|(i, _)| removed.binary_search(i).is_err())
                .map(|(_, s)| s.clone())
                .collect();
            Variant {
                document: variant,
                removed,
            }
        });

        if self.max_variants == 0 {
            Box::new(variants)
        } else {
            Box::new(variants.take(self.max_variants))
        }
    }
}

/// Non-empty subsets of `0..n`, by size then lexicographically
struct RemovalSets {
    n: usize,
    current: Vec<usize>,
}

impl RemovalSets {
    fn new(n: usize) -> Self {
        Self {
            n,
            current: Vec::new(),
        }
    }
}

impl Iterator for RemovalSets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let k = self.current.len();
        let n = self.n;

        // rightmost index that can still move right
        let movable = (0..k).rev().find(|&i| self.current[i] < n - k + i);
        match movable {
            Some(i) => {
                self.current[i] += 1;
                for j in i + 1..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
            }
            None if k < n => self.current = (0..=k).collect(),
            None => return None,
        }
        Some(self.current.clone())
    }
}

/// Compliant variants as they are found
///
/// Ends when the search is exhausted, fails, or is cancelled. Nothing is
/// yielded once the controlling [`Canceller`] has been cancelled.
#[derive(Debug)]
pub struct VariantStream {
    rx: mpsc::UnboundedReceiver<NormalizedDocument>,
    signal: CancelSignal,
    input_compliant: bool,
}

impl VariantStream {
    pub(crate) fn new(
        rx: mpsc::UnboundedReceiver<NormalizedDocument>,
        signal: CancelSignal,
        input_compliant: bool,
    ) -> Self {
        Self {
            rx,
            signal,
            input_compliant,
        }
    }

    /// True if the checked document was already compliant
    ///
    /// The stream then yields just that document.
    pub fn input_compliant(&self) -> bool {
        self.input_compliant
    }

    /// Next compliant variant
    pub async fn next(&mut self) -> Option<NormalizedDocument> {
        if self.closed() {
            return None;
        }
        let document = self.rx.recv().await;
        if self.closed() {
            return None;
        }
        document
    }

    /// Next compliant variant, blocking the current thread
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_next(&mut self) -> Option<NormalizedDocument> {
        if self.closed() {
            return None;
        }
        let document = self.rx.blocking_recv();
        if self.closed() {
            return None;
        }
        document
    }

    fn closed(&mut self) -> bool {
        if self.signal.is_cancelled() {
            self.rx.close();
            return true;
        }
        false
    }
}
