//! Formula reader
//!
//! Accepts the subset of Prolog term syntax that argument graphs print:
//! atoms (plain, numeric or single-quoted), variables, and compound terms.

use crate::error::TermError;
use crate::term::Term;

/// Deepest compound nesting accepted
pub const MAX_TERM_DEPTH: usize = 256;

/// Parse a single term from `text`
pub fn parse_term(text: &str) -> Result<Term, TermError> {
    let mut parser = Parser::new(text);
    parser.skip_ws();
    if parser.peek().is_none() {
        return Err(TermError::Empty);
    }
    let term = parser.term(0)?;
    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(TermError::TrailingInput(parser.pos));
    }
    Ok(term)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> TermError {
        match self.peek() {
            Some(ch) => TermError::UnexpectedChar { ch, pos: self.pos },
            None => TermError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, want: char) -> Result<(), TermError> {
        self.skip_ws();
        if self.peek() == Some(want) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn term(&mut self, depth: usize) -> Result<Term, TermError> {
        if depth > MAX_TERM_DEPTH {
            return Err(TermError::TooDeep(MAX_TERM_DEPTH));
        }
        self.skip_ws();
        let c = self.peek().ok_or(TermError::UnexpectedEnd)?;

        if c.is_ascii_uppercase() || c == '_' {
            return Ok(Term::Var(self.word()));
        }

        let name = if c.is_ascii_lowercase() {
            self.word()
        } else if c.is_ascii_digit() {
            self.number()
        } else if c == '\'' {
            self.quoted()?
        } else {
            return Err(self.unexpected());
        };

        if self.peek() != Some('(') {
            return Ok(Term::Atom(name));
        }
        self.pos += 1;

        let mut args = vec![self.term(depth + 1)?];
        loop {
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    args.push(self.term(depth + 1)?);
                }
                Some(')') => break,
                _ => return Err(self.unexpected()),
            }
        }
        self.expect(')')?;

        Ok(Term::Compound {
            functor: name,
            args,
        })
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn number(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.')
            && matches!(self.chars.get(self.pos + 1), Some(c) if c.is_ascii_digit())
        {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn quoted(&mut self) -> Result<String, TermError> {
        // opening quote
        self.pos += 1;
        let mut name = String::new();
        loop {
            match self.bump() {
                None => return Err(TermError::UnexpectedEnd),
                Some('\'') => {
                    // '' is an escaped quote
                    if self.peek() == Some('\'') {
                        self.pos += 1;
                        name.push('\'');
                    } else {
                        return Ok(name);
                    }
                }
                Some('\\') => match self.bump() {
                    None => return Err(TermError::UnexpectedEnd),
                    Some('n') => name.push('\n'),
                    Some('t') => name.push('\t'),
                    Some(c) => name.push(c),
                },
                Some(c) => name.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_atom_and_var() {
        assert_eq!(parse_term("collect").unwrap(), Term::atom("collect"));
        assert_eq!(parse_term("X").unwrap(), Term::var("X"));
        assert_eq!(parse_term("_").unwrap(), Term::var("_"));
        assert_eq!(parse_term(" 12.5 ").unwrap(), Term::atom("12.5"));
    }

    #[test]
    fn test_parse_compound() {
        let t = parse_term("pii(dus(cloud, unqualified, X, 's-1'))").unwrap();
        assert_eq!(t.functor(), Some("pii"));
        let dus = t.arg(0).unwrap();
        assert_eq!(dus.args().len(), 4);
        assert_eq!(dus.arg(3), Some(&Term::atom("s-1")));
        assert_eq!(dus.arg(2), Some(&Term::var("X")));
    }

    #[test]
    fn test_parse_quoted_escapes() {
        assert_eq!(parse_term("'it\\'s'").unwrap(), Term::atom("it's"));
        assert_eq!(parse_term("'it''s'").unwrap(), Term::atom("it's"));
        assert_eq!(parse_term("''").unwrap(), Term::atom(""));
    }

    #[test]
    fn test_display_round_trip() {
        let text = "dataUseStatement(dus(cloud,'Azure',true,'7f3a-01'))";
        assert_eq!(parse_term(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_term("   "), Err(TermError::Empty));
        assert_eq!(parse_term("pii(a"), Err(TermError::UnexpectedEnd));
        assert_eq!(parse_term("a b"), Err(TermError::TrailingInput(2)));
        assert!(matches!(
            parse_term("¬compliant"),
            Err(TermError::UnexpectedChar { ch: '¬', pos: 0 })
        ));
        assert!(parse_term("pii()").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}a{}", "f(".repeat(depth), ")".repeat(depth));

        assert!(parse_term(&nested(MAX_TERM_DEPTH)).is_ok());
        assert_eq!(
            parse_term(&nested(MAX_TERM_DEPTH + 1)),
            Err(TermError::TooDeep(MAX_TERM_DEPTH))
        );
        // far past the limit: an error, not a stack overflow
        assert_eq!(
            parse_term(&nested(100_000)),
            Err(TermError::TooDeep(MAX_TERM_DEPTH))
        );
    }
}
