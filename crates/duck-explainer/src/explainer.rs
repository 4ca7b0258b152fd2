//! Explanation extraction from argument graphs

use crate::dus;
use duck_domain::{BoolValue, Explanation, StmtExplanation};
use duck_engine::{ArgumentGraph, Label, SyntacticEngine, Term, TermEngine};
use tracing::debug;

/// Default when no formula matches: consent is required
const CONSENT_REQUIRED_DEFAULT: bool = true;
/// Default when no formula matches: data is personally identifiable
const PII_DEFAULT: bool = true;
/// Default when no formula matches: no legitimate interest
const LI_DEFAULT: bool = false;
/// Default when no formula matches: identification is required
const ID_NOT_REQUIRED_DEFAULT: bool = false;

/// Extracts per-statement explanations from an argument graph
///
/// # Examples
///
/// ```
/// use duck_engine::{Label, LabelledGraph};
/// use duck_explainer::Explainer;
///
/// let graph = LabelledGraph::new()
///     .with("dataUseStatement(dus(a,unqualified,c,a,collect,a,s1,false))", Label::In)
///     .with("li(dus(a,unqualified,c,a,collect,a,s1,false))", Label::In);
///
/// let explanation = Explainer::new().explain(&graph);
/// let s1 = &explanation["s1"];
/// assert!(s1.li.value && !s1.li.assumed);
/// assert!(s1.pii.value && s1.pii.assumed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Explainer<E = SyntacticEngine> {
    engine: E,
}

impl Explainer<SyntacticEngine> {
    /// Explainer using syntactic unification
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: TermEngine> Explainer<E> {
    /// Explainer using a specific term engine
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Explain every data-use statement known to `graph`
    ///
    /// Formulas that do not parse, and statements that are not data-use
    /// statements, are skipped.
    pub fn explain<G: ArgumentGraph + ?Sized>(&self, graph: &G) -> Explanation {
        let formulas: Vec<(Term, Label)> = graph
            .statements()
            .filter_map(|wff| {
                let term = self.engine.parse_term(wff).ok()?;
                let label = graph.label_of(wff).unwrap_or(Label::Undecided);
                Some((term, label))
            })
            .collect();

        let mut explanation = Explanation::new();
        for (term, _) in &formulas {
            let Some(stmt) = dus::statement_term(term) else {
                continue;
            };
            let Some(id) = dus::tracking_id(stmt) else {
                continue;
            };
            explanation.insert(id.to_string(), self.explain_statement(stmt, &formulas));
        }

        debug!(
            formulas = formulas.len(),
            statements = explanation.len(),
            "extracted explanation"
        );
        explanation
    }

    fn explain_statement(&self, stmt: &Term, formulas: &[(Term, Label)]) -> StmtExplanation {
        StmtExplanation {
            consent_required: self.is_true(
                "consentRequired",
                stmt,
                formulas,
                CONSENT_REQUIRED_DEFAULT,
            ),
            pii: self.is_true("pii", stmt, formulas, PII_DEFAULT),
            li: self.is_true("li", stmt, formulas, LI_DEFAULT),
            id_not_required: self.is_true("idNotRequired", stmt, formulas, ID_NOT_REQUIRED_DEFAULT),
            compatible_purpose: self.compatible_purposes(stmt, formulas),
        }
    }

    /// Label of the first formula matching `predicate(stmt)`, or the default
    /// marked as assumed
    fn is_true(
        &self,
        predicate: &str,
        stmt: &Term,
        formulas: &[(Term, Label)],
        default: bool,
    ) -> BoolValue {
        let goal = Term::compound(predicate, vec![stmt.clone()]);
        formulas
            .iter()
            .find(|(candidate, _)| self.engine.unify(&goal, candidate).is_some())
            .map(|(_, label)| BoolValue::proven(*label == Label::In))
            .unwrap_or(BoolValue::assumed(default))
    }

    fn compatible_purposes(&self, stmt: &Term, formulas: &[(Term, Label)]) -> Vec<String> {
        let goal = Term::compound("compatiblePurpose", vec![stmt.clone(), Term::var("Other")]);
        formulas
            .iter()
            .filter(|(_, label)| *label == Label::In)
            .filter_map(|(candidate, _)| {
                let bindings = self.engine.unify(&goal, candidate)?;
                let other = bindings.get("Other")?;
                dus::tracking_id(&other).map(str::to_string)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_engine::LabelledGraph;

    fn dus(id: &str) -> String {
        format!("dus(cloud,unqualified,contact_data,cloud,collect,cloud,'{}',false)", id)
    }

    fn statement(id: &str) -> String {
        format!("dataUseStatement({})", dus(id))
    }

    #[test]
    fn test_defaults_are_assumed() {
        let graph = LabelledGraph::new().with(statement("s1"), Label::In);
        let explanation = Explainer::new().explain(&graph);

        let s1 = &explanation["s1"];
        assert_eq!(s1.consent_required, BoolValue::assumed(true));
        assert_eq!(s1.pii, BoolValue::assumed(true));
        assert_eq!(s1.li, BoolValue::assumed(false));
        assert_eq!(s1.id_not_required, BoolValue::assumed(false));
        assert!(s1.compatible_purpose.is_empty());
    }

    #[test]
    fn test_any_matching_label_is_proven() {
        let graph = LabelledGraph::new()
            .with(statement("s1"), Label::In)
            .with(format!("consentRequired({})", dus("s1")), Label::Out)
            .with(format!("pii({})", dus("s1")), Label::Undecided)
            .with(format!("li({})", dus("s1")), Label::In)
            .with(format!("idNotRequired({})", dus("s1")), Label::In);
        let s1 = &Explainer::new().explain(&graph)["s1"];

        assert_eq!(s1.consent_required, BoolValue::proven(false));
        assert_eq!(s1.pii, BoolValue::proven(false));
        assert_eq!(s1.li, BoolValue::proven(true));
        assert_eq!(s1.id_not_required, BoolValue::proven(true));
    }

    #[test]
    fn test_predicates_of_other_statements_do_not_match() {
        let graph = LabelledGraph::new()
            .with(statement("s1"), Label::In)
            .with(statement("s2"), Label::In)
            .with(format!("li({})", dus("s2")), Label::In);
        let explanation = Explainer::new().explain(&graph);

        assert_eq!(explanation["s1"].li, BoolValue::assumed(false));
        assert_eq!(explanation["s2"].li, BoolValue::proven(true));
    }

    #[test]
    fn test_compatible_purpose_requires_in() {
        let graph = LabelledGraph::new()
            .with(statement("s1"), Label::In)
            .with(statement("s2"), Label::In)
            .with(statement("s3"), Label::In)
            .with(
                format!("compatiblePurpose({},{})", dus("s1"), dus("s2")),
                Label::In,
            )
            .with(
                format!("compatiblePurpose({},{})", dus("s1"), dus("s3")),
                Label::Out,
            );
        let explanation = Explainer::new().explain(&graph);

        assert_eq!(explanation["s1"].compatible_purpose, vec!["s2"]);
        assert!(explanation["s2"].compatible_purpose.is_empty());
    }

    #[test]
    fn test_skips_unparseable_and_foreign_formulas() {
        let graph = LabelledGraph::new()
            .with("¬compliant", Label::Out)
            .with("compliant", Label::In)
            .with("isA(microsoft_azure,cloud_provider)", Label::In)
            .with(statement("s1"), Label::In);
        let explanation = Explainer::new().explain(&graph);

        assert_eq!(explanation.len(), 1);
        assert!(explanation.contains_key("s1"));
    }

    #[test]
    fn test_explanation_json_shape() {
        let graph = LabelledGraph::new().with(statement("s1"), Label::In);
        let json = serde_json::to_value(Explainer::new().explain(&graph)).unwrap();

        assert_eq!(json["s1"]["consentRequired"]["value"], true);
        assert_eq!(json["s1"]["consentRequired"]["assumed"], true);
        assert_eq!(json["s1"]["idNotRequired"]["value"], false);
        assert!(json["s1"]["compatiblePurpose"].as_array().unwrap().is_empty());
    }
}
