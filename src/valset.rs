//! ValSet - the set-of-terms carrier every operation returns.
//!
//! Substitution and evaluation are non-deterministic: each reduces a
//! term to a set of candidate terms. Because the term store
//! hash-conses, structural de-duplication falls out of TermId
//! equality and a plain hash set of ids suffices.

use crate::term::TermId;
use rustc_hash::FxHashSet;

/// Unordered, structurally de-duplicated set of terms.
/// Iteration order is unspecified.
pub type ValSet = FxHashSet<TermId>;

/// The singleton set `{t}`.
pub fn singleton(t: TermId) -> ValSet {
    let mut vs = ValSet::default();
    vs.insert(t);
    vs
}
