//! ValTree - the trie a world frame stores its facts in.
//!
//! Each inserted fact is keyed by its flattened term sequence: inner
//! sequence positions descend through `branches`, the final position
//! lands in `leaves` mapping the last token to the original fact.
//! With the present single-element `flatten`, every fact sits in
//! `leaves` of the root at depth 1; the structure still walks
//! arbitrary-length keys so composite flattening can be introduced
//! without touching it.

use crate::matching::match_term;
use crate::scope::{FlatBindings, Scope};
use crate::term::{flatten, TermId, TermStore};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A prefix tree of facts keyed by flattened term sequences.
#[derive(Debug, Default)]
pub struct ValTree {
    branches: FxHashMap<TermId, ValTree>,
    leaves: FxHashMap<TermId, TermId>,
}

impl ValTree {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the trie holds no facts.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.leaves.is_empty()
    }

    /// Insert a fact, keyed by its flattened sequence.
    /// Re-inserting a fact with an identical key overwrites in place.
    pub fn add(&mut self, fact: TermId, terms: &TermStore) {
        let mut seq: SmallVec<[TermId; 4]> = SmallVec::new();
        flatten(fact, terms, &mut seq);
        self.add_seq(&seq, fact);
    }

    fn add_seq(&mut self, seq: &[TermId], fact: TermId) {
        match seq {
            [] => {}
            [last] => {
                self.leaves.insert(*last, fact);
            }
            [head, rest @ ..] => {
                self.branches.entry(*head).or_default().add_seq(rest, fact);
            }
        }
    }

    /// Match a flattened query against the trie, appending every
    /// `(fact, squashed bindings)` pair to `out`.
    ///
    /// Each edge gets a fresh child scope forked from `base`, so a
    /// failed match discards its partial bindings with the fork.
    pub fn get_matches(
        &self,
        seq: &[TermId],
        base: &Scope<'_>,
        terms: &TermStore,
        out: &mut Vec<(TermId, FlatBindings)>,
    ) {
        match seq {
            [] => {}
            [last] => {
                for (&edge, &fact) in &self.leaves {
                    let mut attempt = Scope::child(base);
                    if match_term(edge, *last, &mut attempt, terms) {
                        out.push((fact, attempt.squash()));
                    }
                }
            }
            [head, rest @ ..] => {
                for (&edge, child) in &self.branches {
                    let mut attempt = Scope::child(base);
                    if match_term(edge, *head, &mut attempt, terms) {
                        child.get_matches(rest, &attempt, terms, out);
                    }
                }
            }
        }
    }
}


#[cfg(test)]
#[path = "tests/facts.rs"]
mod tests;
