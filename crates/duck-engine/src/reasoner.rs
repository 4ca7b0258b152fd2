//! Reasoner capability and a mock for testing

use crate::error::ReasonerError;
use crate::graph::{ArgumentGraph, Label, LabelledGraph, COMPLIANT};
use crate::term::Term;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// An argumentation engine
///
/// Compilation is expensive and done once per rulebase revision; the
/// resulting theory is shared read-only between concurrent evaluations.
pub trait Reasoner: Send + Sync {
    /// A compiled rulebase
    type Theory: Send + Sync + 'static;

    /// The result of evaluating assumptions against a theory
    type Graph: ArgumentGraph;

    /// Compile rulebase source text into a theory
    fn compile(&self, rulebase_id: &str, source: &str) -> Result<Self::Theory, ReasonerError>;

    /// Evaluate a set of assumption terms against a theory
    fn evaluate(
        &self,
        theory: &Self::Theory,
        assumptions: &[Term],
    ) -> Result<Self::Graph, ReasonerError>;
}

/// Theory produced by [`MockReasoner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTheory {
    /// Rulebase the theory was compiled from
    pub rulebase_id: String,
    /// Source text it was compiled from
    pub source: String,
}

type EvaluateFn = dyn Fn(&MockTheory, &[Term]) -> LabelledGraph + Send + Sync;

/// Mock reasoner for deterministic testing
///
/// Evaluation is delegated to a closure. Compilation accepts any non-empty
/// source that contains none of the configured failure markers.
///
/// # Examples
///
/// ```
/// use duck_engine::{ArgumentGraph, MockReasoner, Reasoner, COMPLIANT};
///
/// let reasoner = MockReasoner::always(true);
/// let theory = reasoner.compile("gdpr", "rules").unwrap();
/// let graph = reasoner.evaluate(&theory, &[]).unwrap();
/// assert!(graph.is_in(COMPLIANT));
/// assert_eq!(reasoner.compile_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockReasoner {
    evaluate: Arc<EvaluateFn>,
    compile_failures: Vec<String>,
    compile_delay: Duration,
    compile_count: Arc<AtomicUsize>,
    evaluate_count: Arc<AtomicUsize>,
}

impl MockReasoner {
    /// Create a reasoner that evaluates with `f`
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&MockTheory, &[Term]) -> LabelledGraph + Send + Sync + 'static,
    {
        Self {
            evaluate: Arc::new(f),
            compile_failures: Vec::new(),
            compile_delay: Duration::ZERO,
            compile_count: Arc::new(AtomicUsize::new(0)),
            evaluate_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Accept every assumption; `compliant` is decided by `pred`
    pub fn compliant_when<P>(pred: P) -> Self
    where
        P: Fn(&[Term]) -> bool + Send + Sync + 'static,
    {
        Self::new(move |_, assumptions| {
            let mut graph: LabelledGraph = assumptions
                .iter()
                .map(|t| (t.to_string(), Label::In))
                .collect();
            let label = if pred(assumptions) {
                Label::In
            } else {
                Label::Out
            };
            graph.insert(COMPLIANT, label);
            graph
        })
    }

    /// Accept every assumption with a fixed verdict
    pub fn always(compliant: bool) -> Self {
        Self::compliant_when(move |_| compliant)
    }

    /// Fail compilation of any source containing `marker`
    pub fn fail_compile_on(mut self, marker: impl Into<String>) -> Self {
        self.compile_failures.push(marker.into());
        self
    }

    /// Make every compilation take at least `delay`
    pub fn with_compile_delay(mut self, delay: Duration) -> Self {
        self.compile_delay = delay;
        self
    }

    /// Number of compile calls so far
    pub fn compile_count(&self) -> usize {
        self.compile_count.load(Ordering::SeqCst)
    }

    /// Number of evaluate calls so far
    pub fn evaluate_count(&self) -> usize {
        self.evaluate_count.load(Ordering::SeqCst)
    }
}

impl Default for MockReasoner {
    fn default() -> Self {
        Self::always(true)
    }
}

impl fmt::Debug for MockReasoner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockReasoner")
            .field("compile_failures", &self.compile_failures)
            .field("compile_delay", &self.compile_delay)
            .field("compile_count", &self.compile_count())
            .field("evaluate_count", &self.evaluate_count())
            .finish()
    }
}

impl Reasoner for MockReasoner {
    type Theory = MockTheory;
    type Graph = LabelledGraph;

    fn compile(&self, rulebase_id: &str, source: &str) -> Result<Self::Theory, ReasonerError> {
        self.compile_count.fetch_add(1, Ordering::SeqCst);

        if !self.compile_delay.is_zero() {
            std::thread::sleep(self.compile_delay);
        }

        if source.trim().is_empty() {
            return Err(ReasonerError::Compile(format!(
                "rulebase {} is empty",
                rulebase_id
            )));
        }
        if let Some(marker) = self.compile_failures.iter().find(|m| source.contains(m.as_str())) {
            return Err(ReasonerError::Compile(format!(
                "rulebase {} rejected at '{}'",
                rulebase_id, marker
            )));
        }

        Ok(MockTheory {
            rulebase_id: rulebase_id.to_string(),
            source: source.to_string(),
        })
    }

    fn evaluate(
        &self,
        theory: &Self::Theory,
        assumptions: &[Term],
    ) -> Result<Self::Graph, ReasonerError> {
        self.evaluate_count.fetch_add(1, Ordering::SeqCst);
        Ok((self.evaluate)(theory, assumptions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_compile_counts() {
        let reasoner = MockReasoner::default();
        reasoner.compile("a", "rules").unwrap();
        reasoner.compile("a", "rules").unwrap();
        assert_eq!(reasoner.compile_count(), 2);
        assert_eq!(reasoner.evaluate_count(), 0);
    }

    #[test]
    fn test_mock_compile_failures() {
        let reasoner = MockReasoner::default().fail_compile_on("syntax error");
        assert!(matches!(
            reasoner.compile("a", "   "),
            Err(ReasonerError::Compile(_))
        ));
        assert!(matches!(
            reasoner.compile("a", "x :- syntax error"),
            Err(ReasonerError::Compile(_))
        ));
        assert!(reasoner.compile("a", "x :- y").is_ok());
    }

    #[test]
    fn test_mock_labels_assumptions() {
        let reasoner = MockReasoner::compliant_when(|a| a.len() < 2);
        let theory = reasoner.compile("a", "rules").unwrap();

        let one = [Term::compound("pii", vec![Term::atom("x")])];
        let graph = reasoner.evaluate(&theory, &one).unwrap();
        assert!(graph.is_in("pii(x)"));
        assert!(graph.is_in(COMPLIANT));

        let two = [Term::atom("a"), Term::atom("b")];
        let graph = reasoner.evaluate(&theory, &two).unwrap();
        assert_eq!(graph.label_of(COMPLIANT), Some(Label::Out));
        assert_eq!(reasoner.evaluate_count(), 2);
    }
}
