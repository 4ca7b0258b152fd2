//! Argument graphs and statement labels

use std::collections::HashMap;
use std::fmt;

/// Formula whose label decides compliance
pub const COMPLIANT: &str = "compliant";

/// Acceptability label of a statement in an argument graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Accepted
    In,
    /// Rejected
    Out,
    /// Neither accepted nor rejected
    Undecided,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Label::In => "in",
            Label::Out => "out",
            Label::Undecided => "undecided",
        };
        f.write_str(s)
    }
}

/// Read-only view of an evaluated argument graph
pub trait ArgumentGraph: Send + Sync {
    /// Every statement formula in the graph
    fn statements(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Label of a statement, if present
    fn label_of(&self, formula: &str) -> Option<Label>;

    /// True if `formula` is labelled In
    fn is_in(&self, formula: &str) -> bool {
        self.label_of(formula) == Some(Label::In)
    }
}

/// An argument graph held as a formula → label map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelledGraph {
    labels: HashMap<String, Label>,
}

impl LabelledGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or relabel a statement
    pub fn insert(&mut self, formula: impl Into<String>, label: Label) {
        self.labels.insert(formula.into(), label);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, formula: impl Into<String>, label: Label) -> Self {
        self.insert(formula, label);
        self
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the graph has no statements
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(String, Label)> for LabelledGraph {
    fn from_iter<I: IntoIterator<Item = (String, Label)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl ArgumentGraph for LabelledGraph {
    fn statements(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.labels.keys().map(String::as_str))
    }

    fn label_of(&self, formula: &str) -> Option<Label> {
        self.labels.get(formula).copied()
    }
}
