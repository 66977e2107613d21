//! Full evaluation of terms against a fact world.
//!
//! `eval` is the sole entry point the driver needs: it reduces a term
//! to the set of result terms under a scope and a world. For most
//! variants evaluation is substitution; `Arbitrary`, `Apply`,
//! `Declare`, and `Constrain` override it.

use crate::scope::Scope;
use crate::subst::subst;
use crate::symbol::SymId;
use crate::term::{collect_ref_ids, Term, TermId, TermStore};
use crate::valset::{singleton, ValSet};
use crate::world::World;
use rustc_hash::FxHashSet;
use std::fmt;

#[cfg(feature = "tracing")]
use crate::trace::debug_span;

/// Failures the evaluator recognizes.
///
/// Everything else - an unmatched constraint, an application of a
/// non-lambda, a substitution that changes nothing - is an ordinary
/// (possibly empty) result set, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// A scope lookup found no frame defining the reference.
    /// Programmer bug; aborts the current evaluation.
    UnboundRef(SymId),
    /// A term id that does not resolve in the store.
    UnknownTerm(TermId),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundRef(r) => write!(f, "no binding for reference {:?}", r),
            EvalError::UnknownTerm(t) => write!(f, "unknown term id {:?}", t),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluate `term` under `scope` against `world`, producing the set
/// of result terms.
pub fn eval(
    term: TermId,
    scope: &Scope<'_>,
    world: &World<'_>,
    terms: &TermStore,
) -> Result<ValSet, EvalError> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("eval", term = term.raw()).entered();

    let t = terms.resolve(term).ok_or(EvalError::UnknownTerm(term))?;
    match t {
        // Evaluation defaults to substitution.
        Term::Sym(_)
        | Term::Wildcard
        | Term::WildcardTrace(_)
        | Term::Ref(_)
        | Term::ArbitraryInstance(_)
        | Term::Lambda { .. } => subst(term, scope, terms),

        // Each evaluation of the generator mints a distinct instance.
        Term::Arbitrary => Ok(singleton(terms.arbitrary_instance())),

        Term::Apply { pred, arg } => {
            let preds = eval(pred, scope, world, terms)?;
            let args = eval(arg, scope, world, terms)?;
            let mut out = ValSet::default();
            for &p in &preds {
                match terms.resolve(p) {
                    Some(Term::Lambda { arg: arg_id, body, .. }) => {
                        // Beta step: bind the whole argument set at
                        // once and evaluate the body under it.
                        let mut inner = Scope::child(scope);
                        inner.add(arg_id, args.clone());
                        out.extend(eval(body, &inner, world, terms)?);
                    }
                    _ => {
                        for &a in &args {
                            out.insert(terms.apply(p, a));
                        }
                    }
                }
            }
            Ok(out)
        }

        Term::Declare { with, body } => {
            let facts = eval(with, scope, world, terms)?;
            let mut inner = World::child(world);
            for fact in facts {
                inner.add(fact, terms);
            }
            eval(body, scope, &inner, terms)
        }

        Term::Constrain { constraint, body } => {
            let candidates = eval(constraint, scope, world, terms)?;

            // Seed every reference the (unevaluated) constraint
            // mentions, so unmatched references read as empty rather
            // than deferring to outer bindings.
            let mut ref_ids = FxHashSet::default();
            collect_ref_ids(constraint, terms, &mut ref_ids);
            let mut inner = Scope::child(scope);
            for &r in &ref_ids {
                inner.add(r, ValSet::default());
            }

            let mut matched = false;
            for &candidate in &candidates {
                for (_fact, bindings) in world.get_matches(candidate, terms) {
                    matched = true;
                    for (k, vs) in bindings {
                        if ref_ids.contains(&k) {
                            for v in vs {
                                inner.insert_value(k, v);
                            }
                        }
                    }
                }
            }

            if matched {
                eval(body, &inner, world, terms)
            } else {
                Ok(ValSet::default())
            }
        }
    }
}


#[cfg(test)]
#[path = "tests/eval.rs"]
mod tests;
