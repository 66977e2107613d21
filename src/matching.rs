//! One-way structural matching of stored patterns against queries.
//!
//! The fact trie invokes the stored edge term's match against the
//! query element. A reference or wildcard captures on whichever side
//! it appears (pattern side winning when both could); composite
//! variants recurse component-wise; everything else is structural
//! equality, which hash-consing reduces to TermId equality.
//!
//! Matching may extend the scope with new bindings. On failure,
//! partial bindings may remain; callers always fork a fresh child
//! scope before matching and discard it on failure.

use crate::scope::Scope;
use crate::symbol::SymId;
use crate::term::{Term, TermId, TermStore};
use crate::valset::singleton;

#[cfg(feature = "tracing")]
use crate::trace::trace;

/// Match `pattern` (the stored term) against `subject` (the query
/// term), extending `scope` with captured bindings.
pub fn match_term(
    pattern: TermId,
    subject: TermId,
    scope: &mut Scope<'_>,
    terms: &TermStore,
) -> bool {
    let pat = match terms.resolve(pattern) {
        Some(t) => t,
        None => return false,
    };
    match pat {
        Term::Wildcard => return true,
        Term::Ref(r) | Term::WildcardTrace(r) => return bind_or_check(r, subject, scope),
        _ => {}
    }

    let subj = match terms.resolve(subject) {
        Some(t) => t,
        None => return false,
    };
    match subj {
        Term::Wildcard => return true,
        Term::Ref(r) | Term::WildcardTrace(r) => return bind_or_check(r, pattern, scope),
        _ => {}
    }

    match (pat, subj) {
        (
            Term::Apply { pred: p1, arg: a1 },
            Term::Apply { pred: p2, arg: a2 },
        ) => match_term(p1, p2, scope, terms) && match_term(a1, a2, scope, terms),
        (
            Term::Declare { with: w1, body: b1 },
            Term::Declare { with: w2, body: b2 },
        ) => match_term(w1, w2, scope, terms) && match_term(b1, b2, scope, terms),
        (
            Term::Constrain { constraint: c1, body: b1 },
            Term::Constrain { constraint: c2, body: b2 },
        ) => match_term(c1, c2, scope, terms) && match_term(b1, b2, scope, terms),
        // Sym, ArbitraryInstance, and the nominal Lambda compare by
        // identity; under hash-consing that is id equality.
        _ => pattern == subject,
    }
}

/// Capture `other` under `r` if `r` is unbound; otherwise require the
/// existing binding set to contain `other`.
fn bind_or_check(r: SymId, other: TermId, scope: &mut Scope<'_>) -> bool {
    if let Some(vs) = scope.get(r) {
        let hit = vs.contains(&other);
        #[cfg(feature = "tracing")]
        trace!(bound = hit, "match_ref_check");
        return hit;
    }
    scope.add(r, singleton(other));
    #[cfg(feature = "tracing")]
    trace!("match_ref_capture");
    true
}


#[cfg(test)]
#[path = "tests/matching.rs"]
mod tests;
