//! Scope - lexically chained name bindings with shadowing.
//!
//! A scope frame maps reference ids to value sets and defers misses
//! to its parent. A shadowing frame additionally hides a set of
//! names from the whole parent chain; a local entry still wins over
//! shadowing. Frames are stack-allocated per recursive evaluation
//! call, so parent links are plain references and the borrow checker
//! enforces that parents outlive their children.

use crate::symbol::SymId;
use crate::term::TermId;
use crate::valset::ValSet;
use rustc_hash::{FxHashMap, FxHashSet};

/// A fully resolved, parentless mapping produced by [`Scope::squash`].
pub type FlatBindings = FxHashMap<SymId, ValSet>;

/// One frame in a scope chain.
///
/// Plain frames have an empty `shadowed` set; shadowing frames are
/// built with [`Scope::shadowing`] and hide names via [`Scope::shadow`].
#[derive(Debug, Default)]
pub struct Scope<'a> {
    data: FxHashMap<SymId, ValSet>,
    base: Option<&'a Scope<'a>>,
    shadowed: FxHashSet<SymId>,
}

impl<'a> Scope<'a> {
    /// Create a root frame with no parent.
    pub fn root() -> Scope<'static> {
        Scope {
            data: FxHashMap::default(),
            base: None,
            shadowed: FxHashSet::default(),
        }
    }

    /// Create a plain child frame over `base`.
    pub fn child(base: &'a Scope<'a>) -> Scope<'a> {
        Scope {
            data: FxHashMap::default(),
            base: Some(base),
            shadowed: FxHashSet::default(),
        }
    }

    /// Create a shadowing child frame over `base`.
    /// Names are hidden one at a time with [`Scope::shadow`].
    pub fn shadowing(base: &'a Scope<'a>) -> Scope<'a> {
        Scope::child(base)
    }

    /// Hide `k` from the parent chain.
    /// A local binding added afterwards still wins.
    pub fn shadow(&mut self, k: SymId) {
        self.shadowed.insert(k);
    }

    /// Set the local mapping for `k`, overwriting any local entry.
    pub fn add(&mut self, k: SymId, vs: ValSet) {
        self.data.insert(k, vs);
    }

    /// Union a single value into the local entry for `k`,
    /// creating the entry if absent.
    pub fn insert_value(&mut self, k: SymId, v: TermId) {
        self.data.entry(k).or_default().insert(v);
    }

    /// Look up `k`: local first, then the parent chain, honoring
    /// shadowed names.
    pub fn get(&self, k: SymId) -> Option<&ValSet> {
        if let Some(vs) = self.data.get(&k) {
            return Some(vs);
        }
        if self.shadowed.contains(&k) {
            return None;
        }
        self.base.and_then(|b| b.get(k))
    }

    /// Whether any visible frame defines `k`.
    pub fn has(&self, k: SymId) -> bool {
        self.get(k).is_some()
    }

    /// Materialize the chain as a single flat mapping: parent first,
    /// shadowed names erased, locals overlaid last.
    pub fn squash(&self) -> FlatBindings {
        let mut out = FlatBindings::default();
        self.squash_into(&mut out);
        out
    }

    fn squash_into(&self, out: &mut FlatBindings) {
        if let Some(base) = self.base {
            base.squash_into(out);
        }
        for k in &self.shadowed {
            out.remove(k);
        }
        for (k, vs) in &self.data {
            out.insert(*k, vs.clone());
        }
    }
}


#[cfg(test)]
#[path = "tests/scope.rs"]
mod tests;
