//! Substitution of free references according to a scope.
//!
//! Every variant substitutes to a *set* of candidate terms; composite
//! variants take the Cartesian product of their children's sets, so
//! nested non-determinism stays associative.

use crate::eval::EvalError;
use crate::scope::Scope;
use crate::symbol::SymId;
use crate::term::{Term, TermId, TermStore};
use crate::valset::{singleton, ValSet};

/// Substitute free references in `term` according to `scope`.
///
/// Ground variants return themselves. A bound `Ref` returns its
/// binding set, with the wildcard singleton replaced by a
/// `WildcardTrace` carrying the reference id so later occurrences
/// must agree. A lambda shadows its argument before descending and
/// keeps its identity when the body comes back unchanged.
pub fn subst(term: TermId, scope: &Scope<'_>, terms: &TermStore) -> Result<ValSet, EvalError> {
    let t = terms.resolve(term).ok_or(EvalError::UnknownTerm(term))?;
    match t {
        Term::Sym(_) | Term::Wildcard | Term::Arbitrary | Term::ArbitraryInstance(_) => {
            Ok(singleton(term))
        }
        Term::WildcardTrace(r) => {
            if scope.has(r) {
                Ok(lookup(scope, r)?.clone())
            } else {
                Ok(singleton(term))
            }
        }
        Term::Ref(r) => {
            if !scope.has(r) {
                return Ok(singleton(term));
            }
            let vs = lookup(scope, r)?;
            let wildcard = terms.wildcard();
            if vs.contains(&wildcard) {
                let mut out = vs.clone();
                out.remove(&wildcard);
                out.insert(terms.wildcard_trace(r));
                Ok(out)
            } else {
                Ok(vs.clone())
            }
        }
        Term::Lambda { arg, body, .. } => {
            let mut hidden = Scope::shadowing(scope);
            hidden.shadow(arg);
            let bodies = subst(body, &hidden, terms)?;
            let mut out = ValSet::default();
            for substituted in bodies {
                if substituted == body {
                    // Unchanged body: the lambda substitutes to itself
                    // rather than re-minting its nominal id.
                    out.insert(term);
                } else {
                    out.insert(terms.lambda(arg, substituted));
                }
            }
            Ok(out)
        }
        Term::Apply { pred, arg } => {
            let preds = subst(pred, scope, terms)?;
            let args = subst(arg, scope, terms)?;
            let mut out = ValSet::default();
            for &p in &preds {
                for &a in &args {
                    out.insert(terms.apply(p, a));
                }
            }
            Ok(out)
        }
        Term::Declare { with, body } => {
            let withs = subst(with, scope, terms)?;
            let bodies = subst(body, scope, terms)?;
            let mut out = ValSet::default();
            for &w in &withs {
                for &b in &bodies {
                    out.insert(terms.declare(w, b));
                }
            }
            Ok(out)
        }
        Term::Constrain { constraint, body } => {
            let constraints = subst(constraint, scope, terms)?;
            let bodies = subst(body, scope, terms)?;
            let mut out = ValSet::default();
            for &c in &constraints {
                for &b in &bodies {
                    out.insert(terms.constrain(c, b));
                }
            }
            Ok(out)
        }
    }
}

/// Scope lookup that surfaces a miss as [`EvalError::UnboundRef`].
/// Callers check `has` first; a miss here is a programmer bug.
fn lookup<'s>(scope: &'s Scope<'_>, r: SymId) -> Result<&'s ValSet, EvalError> {
    scope.get(r).ok_or(EvalError::UnboundRef(r))
}


#[cfg(test)]
#[path = "tests/subst.rs"]
mod tests;
