//! REPL (Read-Eval-Print Loop) for interactive evaluation.
//!
//! Reads a line at a time, parses it, evaluates against the
//! session's persistent top-level scope and world, and prints every
//! result term on its own line. `:q` exits; a parse failure prints
//! `Syntax error`.

use std::io::{self, BufRead, Write};

use crate::eval::{eval, EvalError};
use crate::parser;
use crate::scope::Scope;
use crate::symbol::SymbolStore;
use crate::term::{format_term, TermStore};
use crate::world::World;

/// What [`Repl::process_line`] asks the loop to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Nothing to print; keep looping.
    Continue,
    /// Exit the loop.
    Quit,
    /// Print this (possibly multi-line) output, then keep looping.
    Print(String),
}

/// The REPL state: the stores plus the persistent top-level scope
/// and fact world every line evaluates against.
pub struct Repl {
    symbols: SymbolStore,
    terms: TermStore,
    scope: Scope<'static>,
    world: World<'static>,
    prompt: String,
}

impl Repl {
    /// Create a new REPL with default settings.
    pub fn new() -> Self {
        Self {
            symbols: SymbolStore::new(),
            terms: TermStore::new(),
            scope: Scope::root(),
            world: World::root(),
            prompt: "> ".to_string(),
        }
    }

    /// Set the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run the loop over the given input and output streams until
    /// `:q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            match self.process_line(line.trim_end_matches(|c| c == '\n' || c == '\r')) {
                ReplAction::Continue => {}
                ReplAction::Quit => break,
                ReplAction::Print(msg) => writeln!(output, "{}", msg)?,
            }
        }
        Ok(())
    }

    /// Process a single input line.
    pub fn process_line(&mut self, line: &str) -> ReplAction {
        if line == ":q" {
            return ReplAction::Quit;
        }

        let term = match parser::parse(line, &self.terms, &self.symbols) {
            Ok(term) => term,
            Err(_) => return ReplAction::Print("Syntax error".to_string()),
        };

        match eval(term, &self.scope, &self.world, &self.terms) {
            Ok(results) => {
                let mut lines = Vec::new();
                for result in results {
                    match format_term(result, &self.terms, &self.symbols) {
                        Ok(text) => lines.push(text),
                        Err(msg) => lines.push(format!("Error: {}", msg)),
                    }
                }
                if lines.is_empty() {
                    ReplAction::Continue
                } else {
                    ReplAction::Print(lines.join("\n"))
                }
            }
            Err(err) => ReplAction::Print(self.describe_error(err)),
        }
    }

    fn describe_error(&self, err: EvalError) -> String {
        match err {
            EvalError::UnboundRef(r) => {
                let name = self.symbols.resolve(r).unwrap_or("<unknown>");
                format!("Error: no binding for reference {}", name)
            }
            other => format!("Error: {}", other),
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[path = "tests/repl.rs"]
mod tests;
