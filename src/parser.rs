//! Recursive-descent parser for the concrete term syntax.
//!
//! ```text
//! expr := atom+                      application, left-associative
//! atom := '(' expr ')'
//!       | '<' ident '>' expr         lambda, greedy body
//!       | '{' expr '}' expr          declare, greedy body
//!       | '[' expr ']' expr          constrain, greedy body
//!       | '*'                        wildcard
//!       | '?'                        arbitrary
//!       | ident                      symbol or reference
//! ```
//!
//! An identifier parses as a `Ref` when its first letter is
//! uppercase, or when an enclosing lambda binds it; otherwise it is
//! a ground `Sym`. The grammar is LL(1) at the atom level, so no
//! backtracking is needed.

use crate::symbol::SymbolStore;
use crate::term::{TermId, TermStore};
use std::fmt;

/// Parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected end of input.
    UnexpectedEof,
    /// Unexpected character.
    UnexpectedChar(char),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::UnexpectedChar(c) => write!(f, "Unexpected character: '{}'", c),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a complete term from `input`, interning names and
/// constructing nodes as it goes. Trailing input is an error.
pub fn parse(
    input: &str,
    terms: &TermStore,
    symbols: &SymbolStore,
) -> Result<TermId, ParseError> {
    let mut parser = Parser::new(input, terms, symbols);
    let term = parser.parse_expr()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(term),
        Some(c) => Err(ParseError::UnexpectedChar(c)),
    }
}

struct Parser<'a> {
    input: Vec<char>,
    pos: usize,
    terms: &'a TermStore,
    symbols: &'a SymbolStore,
    /// Lexical stack of lambda argument names currently in scope;
    /// occurrences of these parse as references.
    bound: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(input: &str, terms: &'a TermStore, symbols: &'a SymbolStore) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            terms,
            symbols,
            bound: Vec::new(),
        }
    }

    fn parse_expr(&mut self) -> Result<TermId, ParseError> {
        self.skip_whitespace();
        let mut term = self.parse_atom()?;
        loop {
            self.skip_whitespace();
            if !self.at_atom_start() {
                return Ok(term);
            }
            let arg = self.parse_atom()?;
            term = self.terms.apply(term, arg);
        }
    }

    fn parse_atom(&mut self) -> Result<TermId, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => {
                self.advance();
                let term = self.parse_expr()?;
                self.expect(')')?;
                Ok(term)
            }
            Some('<') => {
                self.advance();
                self.skip_whitespace();
                let name = self.parse_ident()?;
                self.skip_whitespace();
                self.expect('>')?;
                let arg = self.symbols.intern(&name);
                self.bound.push(name);
                let body = self.parse_expr();
                self.bound.pop();
                Ok(self.terms.lambda(arg, body?))
            }
            Some('{') => {
                self.advance();
                let with = self.parse_expr()?;
                self.expect('}')?;
                let body = self.parse_expr()?;
                Ok(self.terms.declare(with, body))
            }
            Some('[') => {
                self.advance();
                let constraint = self.parse_expr()?;
                self.expect(']')?;
                let body = self.parse_expr()?;
                Ok(self.terms.constrain(constraint, body))
            }
            Some('*') => {
                self.advance();
                Ok(self.terms.wildcard())
            }
            Some('?') => {
                self.advance();
                Ok(self.terms.arbitrary())
            }
            Some(c) if is_ident_start(c) => {
                let name = self.parse_ident()?;
                let id = self.symbols.intern(&name);
                if self.is_reference(&name) {
                    Ok(self.terms.reference(id))
                } else {
                    Ok(self.terms.sym(id))
                }
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
        }
    }

    fn is_reference(&self, name: &str) -> bool {
        name.chars().next().is_some_and(|c| c.is_uppercase())
            || self.bound.iter().any(|b| b.as_str() == name)
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some(c) if is_ident_start(c) => {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    name.push(c);
                    self.advance();
                }
                Ok(name)
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
        }
    }

    fn at_atom_start(&self) -> bool {
        matches!(
            self.peek(),
            Some('(') | Some('<') | Some('{') | Some('[') | Some('*') | Some('?')
        ) || self.peek().is_some_and(is_ident_start)
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}


#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
