//! Syntactic unification with occurs check

use crate::term::Term;
use std::collections::HashMap;

/// Variable bindings produced by a successful unification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(HashMap<String, Term>);

impl Bindings {
    /// Empty substitution
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully resolved value of a variable, if bound
    pub fn get(&self, var: &str) -> Option<Term> {
        self.0.get(var).map(|t| self.resolve(t))
    }

    /// Apply the substitution to `term`
    pub fn resolve(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Compound { functor, args } => Term::Compound {
                functor,
                args: args.iter().map(|a| self.resolve(a)).collect(),
            },
            other => other,
        }
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn walk(&self, term: &Term) -> Term {
        let mut current = term;
        while let Term::Var(name) = current {
            match self.0.get(name) {
                Some(next) => current = next,
                None => break,
            }
        }
        current.clone()
    }

    fn occurs(&self, var: &str, term: &Term) -> bool {
        match self.walk(term) {
            Term::Var(name) => name == var,
            Term::Atom(_) => false,
            Term::Compound { args, .. } => args.iter().any(|a| self.occurs(var, a)),
        }
    }

    fn unify_into(&mut self, a: &Term, b: &Term) -> bool {
        let a = self.walk(a);
        let b = self.walk(b);
        match (a, b) {
            // `_` matches anything and binds nothing
            (Term::Var(v), _) | (_, Term::Var(v)) if v == "_" => true,
            (Term::Var(x), Term::Var(y)) if x == y => true,
            (Term::Var(v), other) | (other, Term::Var(v)) => {
                if self.occurs(&v, &other) {
                    return false;
                }
                self.0.insert(v, other);
                true
            }
            (Term::Atom(x), Term::Atom(y)) => x == y,
            (
                Term::Compound {
                    functor: f1,
                    args: a1,
                },
                Term::Compound {
                    functor: f2,
                    args: a2,
                },
            ) => {
                f1 == f2
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(x, y)| self.unify_into(x, y))
            }
            _ => false,
        }
    }
}

/// Most general unifier of `a` and `b`, or `None` if they do not unify
pub fn unify(a: &Term, b: &Term) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    if bindings.unify_into(a, b) {
        Some(bindings)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_term;

    fn t(s: &str) -> Term {
        parse_term(s).unwrap()
    }

    #[test]
    fn test_unify_binds_variables() {
        let b = unify(&t("pii(dus(a,X,c))"), &t("pii(dus(a,b,c))")).unwrap();
        assert_eq!(b.get("X"), Some(t("b")));
    }

    #[test]
    fn test_unify_mismatch() {
        assert!(unify(&t("pii(a)"), &t("li(a)")).is_none());
        assert!(unify(&t("pii(a)"), &t("pii(a,b)")).is_none());
        assert!(unify(&t("pii(a)"), &t("pii(b)")).is_none());
    }

    #[test]
    fn test_unify_chains_resolve() {
        let b = unify(&t("f(X,Y,Y)"), &t("f(Y,Z,g(k))")).unwrap();
        assert_eq!(b.get("X"), Some(t("g(k)")));
        assert_eq!(b.resolve(&t("h(X,Z)")), t("h(g(k),g(k))"));
    }

    #[test]
    fn test_occurs_check() {
        assert!(unify(&t("X"), &t("f(X)")).is_none());
    }

    #[test]
    fn test_anonymous_variable() {
        let b = unify(&t("f(_,_)"), &t("f(a,b)")).unwrap();
        assert!(b.is_empty());
    }
}
