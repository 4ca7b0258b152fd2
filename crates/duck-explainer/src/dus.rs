//! Data-use statement terms
//!
//! A statement enters the reasoner as
//! `dataUseStatement(dus(Use,Qualifier,Category,Source,Action,Result,TrackingId,Passive))`.

use duck_engine::Term;

/// Predicate wrapping a data-use statement
pub const DATA_USE_STATEMENT: &str = "dataUseStatement";

/// Functor of the statement tuple
pub const DUS: &str = "dus";

/// Number of arguments of a `dus` term
pub const DUS_ARITY: usize = 8;

/// Position of the tracking id within `dus`
pub const TRACKING_ID_ARG: usize = 6;

/// The `dus(...)` term inside `dataUseStatement(...)`, if `term` is one
pub fn statement_term(term: &Term) -> Option<&Term> {
    if term.functor() != Some(DATA_USE_STATEMENT) || term.args().len() != 1 {
        return None;
    }
    term.arg(0).filter(|inner| is_dus(inner))
}

/// True if `term` is a `dus` tuple of the expected arity
pub fn is_dus(term: &Term) -> bool {
    term.functor() == Some(DUS) && term.args().len() == DUS_ARITY
}

/// Tracking id of a `dus` tuple
pub fn tracking_id(dus: &Term) -> Option<&str> {
    if !is_dus(dus) {
        return None;
    }
    dus.arg(TRACKING_ID_ARG).and_then(Term::as_atom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_engine::parse_term;

    #[test]
    fn test_statement_term() {
        let t = parse_term("dataUseStatement(dus(a,unqualified,c,a,collect,a,'s-1',false))").unwrap();
        let dus = statement_term(&t).unwrap();
        assert_eq!(tracking_id(dus), Some("s-1"));

        assert!(statement_term(&parse_term("pii(dus(a,b))").unwrap()).is_none());
        assert!(statement_term(&parse_term("dataUseStatement(dus(a,b))").unwrap()).is_none());
        assert!(statement_term(&parse_term("compliant").unwrap()).is_none());
    }
}
