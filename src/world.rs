//! World - a stack-linked chain of fact tries.
//!
//! `Declare` evaluation pushes a child world; adding facts only ever
//! mutates the innermost frame, while parents are observed as
//! immutable. Queries union match results across the whole chain,
//! outermost frame first.

use crate::facts::ValTree;
use crate::scope::{FlatBindings, Scope};
use crate::term::{flatten, TermId, TermStore};
use smallvec::SmallVec;

/// One frame of the fact-world chain.
#[derive(Debug, Default)]
pub struct World<'a> {
    data: ValTree,
    base: Option<&'a World<'a>>,
}

impl<'a> World<'a> {
    /// Create a root world with no parent.
    pub fn root() -> World<'static> {
        World {
            data: ValTree::new(),
            base: None,
        }
    }

    /// Create a child world over `base`.
    pub fn child(base: &'a World<'a>) -> World<'a> {
        World {
            data: ValTree::new(),
            base: Some(base),
        }
    }

    /// Add a fact to the innermost frame.
    pub fn add(&mut self, fact: TermId, terms: &TermStore) {
        self.data.add(fact, terms);
    }

    /// Collect every `(fact, bindings)` pair the chain yields for
    /// `query`, outermost frame first. Each bindings map is already
    /// squashed and independent of the frame stack.
    pub fn get_matches(&self, query: TermId, terms: &TermStore) -> Vec<(TermId, FlatBindings)> {
        let mut seq: SmallVec<[TermId; 4]> = SmallVec::new();
        flatten(query, terms, &mut seq);
        let mut out = Vec::new();
        self.get_matches_seq(&seq, terms, &mut out);
        out
    }

    fn get_matches_seq(
        &self,
        seq: &[TermId],
        terms: &TermStore,
        out: &mut Vec<(TermId, FlatBindings)>,
    ) {
        if let Some(base) = self.base {
            base.get_matches_seq(seq, terms, out);
        }
        // Bindings never leak across frames: every frame starts its
        // matches from an empty scope.
        let empty = Scope::root();
        self.data.get_matches(seq, &empty, terms, out);
    }
}
