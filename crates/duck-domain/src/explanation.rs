//! Explanation module - why a document is (not) compliant

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A boolean finding about a statement
///
/// `assumed` is true when the value is a default rather than something the
/// reasoning engine established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolValue {
    /// The finding
    pub value: bool,

    /// True if assumed, false if established
    pub assumed: bool,
}

impl BoolValue {
    /// A value established by the reasoning engine
    pub fn proven(value: bool) -> Self {
        Self { value, assumed: false }
    }

    /// A default value
    pub fn assumed(value: bool) -> Self {
        Self { value, assumed: true }
    }
}

/// Explanation for a single statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StmtExplanation {
    /// Informed consent is required
    pub consent_required: BoolValue,

    /// Personally identifiable information is involved
    pub pii: BoolValue,

    /// There is a legitimate interest in the data
    pub li: BoolValue,

    /// Identification of the data subject is not required
    pub id_not_required: BoolValue,

    /// Tracking ids of statements with a proven compatible purpose
    pub compatible_purpose: Vec<String>,
}

/// Explanations keyed by statement tracking id
pub type Explanation = BTreeMap<String, StmtExplanation>;

/// Compliance verdict as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The document complies with the rulebase
    Compliant,

    /// The document does not comply
    NonCompliant,
}

impl Verdict {
    /// Verdict for a boolean compliance result
    pub fn from_compliant(compliant: bool) -> Self {
        if compliant {
            Verdict::Compliant
        } else {
            Verdict::NonCompliant
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Compliant => "COMPLIANT",
            Verdict::NonCompliant => "NON_COMPLIANT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
