//! First-order terms as exchanged with the reasoning engine

use std::fmt;

/// A first-order term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A constant (`collect`, `'s-1'`, `42`)
    Atom(String),

    /// A logic variable (`X`, `_Rest`)
    Var(String),

    /// A functor applied to arguments (`pii(dus(...))`)
    Compound {
        /// Predicate or function symbol
        functor: String,
        /// Arguments, in order
        args: Vec<Term>,
    },
}

impl Term {
    /// Create an atom
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Create a variable
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// Create a compound term
    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    /// Predicate symbol of a compound term
    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Compound { functor, .. } => Some(functor),
            _ => None,
        }
    }

    /// Arguments of a compound term (empty otherwise)
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound { args, .. } => args,
            _ => &[],
        }
    }

    /// Argument at `index` of a compound term
    pub fn arg(&self, index: usize) -> Option<&Term> {
        self.args().get(index)
    }

    /// Name of an atom
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// True if the term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Atom(_) => true,
            Term::Var(_) => false,
            Term::Compound { args, .. } => args.iter().all(Term::is_ground),
        }
    }
}

/// An atom prints bare if it reads back as the same atom.
pub(crate) fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        Some(c) if c.is_ascii_digit() => {
            let mut seen_dot = false;
            let mut prev_dot = false;
            for c in chars {
                if c == '.' && !seen_dot {
                    seen_dot = true;
                    prev_dot = true;
                } else if c.is_ascii_digit() {
                    prev_dot = false;
                } else {
                    return false;
                }
            }
            !prev_dot
        }
        _ => false,
    }
}

fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_atom(name) {
        return f.write_str(name);
    }
    f.write_str("'")?;
    for c in name.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write_atom(f, name),
            Term::Var(name) => f.write_str(name),
            Term::Compound { functor, args } => {
                write_atom(f, functor)?;
                f.write_str("(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
