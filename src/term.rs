use crate::symbol::{SymId, SymbolStore};
use hashbrown::HashMap;
use parking_lot::RwLock;
use rustc_hash::{FxHashSet, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Unique identifier for a term in the term store.
/// TermIds are stable; because the store hash-conses, structural
/// equality of terms coincides with TermId equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    /// Get the raw u32 value (for debugging/display).
    pub fn raw(self) -> u32 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        TermId(raw)
    }
}

/// The closed set of term variants.
///
/// Children are TermIds into the owning store, so a single child may
/// have many parents without duplicated storage. `Lambda` and
/// `ArbitraryInstance` carry an explicit nominal id: two lambdas are
/// equal only when their ids match, regardless of argument and body.
/// Since ids are minted from a monotonic counter and never reused,
/// the derived field-wise equality below realizes exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Ground atom.
    Sym(SymId),
    /// Matches anything once.
    Wildcard,
    /// A wildcard that, once captured under a reference id, must keep
    /// equalling its first binding.
    WildcardTrace(SymId),
    /// Named variable: binds on match, substitutes on lookup.
    Ref(SymId),
    /// Reduces to a fresh ArbitraryInstance under eval.
    Arbitrary,
    /// Unique opaque atom; equal only to itself.
    ArbitraryInstance(u64),
    /// Abstraction with nominal identity.
    Lambda { arg: SymId, body: TermId, id: u64 },
    /// Application.
    Apply { pred: TermId, arg: TermId },
    /// Adds `with` as a fact while evaluating `body`.
    Declare { with: TermId, body: TermId },
    /// Evaluates `body` only where `constraint` matches the world.
    Constrain { constraint: TermId, body: TermId },
}

/// Number of shards for hashcons maps (power of 2 for fast modulo).
const NUM_SHARDS: usize = 16;

/// Thread-safe term arena with hashconsing.
///
/// Guarantees:
/// - Structurally equal terms get the same TermId
/// - TermId can be resolved back to the term
/// - `Wildcard` and `Arbitrary` are singletons: every construction
///   returns the same TermId
/// - Lambda and ArbitraryInstance ids are strictly monotonic and
///   never reused within the store's lifetime
pub struct TermStore {
    /// Central storage of all terms, indexed by TermId.
    nodes: RwLock<Vec<Term>>,
    /// Sharded hashcons maps for reducing contention.
    shards: [RwLock<HashMap<Term, TermId>>; NUM_SHARDS],
    /// Counter for generating unique TermIds.
    next_id: AtomicU32,
    /// Monotonic nominal-id counter for Lambda.
    next_lambda_id: AtomicU64,
    /// Monotonic nominal-id counter for ArbitraryInstance.
    next_arbitrary_id: AtomicU64,
}

impl TermStore {
    /// Create a new empty term store.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(HashMap::new()));
        Self {
            nodes: RwLock::new(Vec::new()),
            shards,
            next_id: AtomicU32::new(0),
            next_lambda_id: AtomicU64::new(0),
            next_arbitrary_id: AtomicU64::new(0),
        }
    }

    /// Intern a term, returning its TermId.
    /// If the term already exists, returns the existing TermId.
    fn intern(&self, term: Term) -> TermId {
        let shard_idx = Self::shard_index(&term);
        let shard = &self.shards[shard_idx];

        // Fast path: check if term exists (read lock)
        {
            let map = shard.read();
            if let Some(&id) = map.get(&term) {
                return id;
            }
        }

        // Slow path: need to insert (write lock)
        let mut map = shard.write();

        // Double-check after acquiring write lock
        if let Some(&id) = map.get(&term) {
            return id;
        }

        let id = TermId(self.next_id.fetch_add(1, Ordering::Relaxed));
        {
            let mut nodes = self.nodes.write();
            let idx = id.0 as usize;
            if nodes.len() <= idx {
                nodes.resize(idx + 1, Term::Wildcard); // placeholder
            }
            nodes[idx] = term;
        }
        map.insert(term, id);
        id
    }

    /// Create a ground symbol term.
    pub fn sym(&self, sym_id: SymId) -> TermId {
        self.intern(Term::Sym(sym_id))
    }

    /// The wildcard singleton.
    pub fn wildcard(&self) -> TermId {
        self.intern(Term::Wildcard)
    }

    /// Create a wildcard trace tagged with a reference id.
    pub fn wildcard_trace(&self, ref_id: SymId) -> TermId {
        self.intern(Term::WildcardTrace(ref_id))
    }

    /// Create a named reference term.
    pub fn reference(&self, ref_id: SymId) -> TermId {
        self.intern(Term::Ref(ref_id))
    }

    /// The arbitrary-generator singleton.
    pub fn arbitrary(&self) -> TermId {
        self.intern(Term::Arbitrary)
    }

    /// Mint a fresh arbitrary instance.
    /// Every call produces a distinct term; instances are equal only
    /// to themselves.
    pub fn arbitrary_instance(&self) -> TermId {
        let id = self.next_arbitrary_id.fetch_add(1, Ordering::Relaxed);
        self.intern(Term::ArbitraryInstance(id))
    }

    /// Create a lambda abstraction with a fresh nominal id.
    /// Every call produces a distinct term, even for identical
    /// argument and body.
    pub fn lambda(&self, arg: SymId, body: TermId) -> TermId {
        let id = self.next_lambda_id.fetch_add(1, Ordering::Relaxed);
        self.intern(Term::Lambda { arg, body, id })
    }

    /// Create an application term.
    pub fn apply(&self, pred: TermId, arg: TermId) -> TermId {
        self.intern(Term::Apply { pred, arg })
    }

    /// Create a fact declaration term.
    pub fn declare(&self, with: TermId, body: TermId) -> TermId {
        self.intern(Term::Declare { with, body })
    }

    /// Create a constraint term.
    pub fn constrain(&self, constraint: TermId, body: TermId) -> TermId {
        self.intern(Term::Constrain { constraint, body })
    }

    /// Resolve a TermId to its term.
    /// Returns None if the TermId is invalid.
    pub fn resolve(&self, id: TermId) -> Option<Term> {
        let nodes = self.nodes.read();
        nodes.get(id.0 as usize).copied()
    }

    /// Get the shard index for a term (for hashconsing distribution).
    fn shard_index(term: &Term) -> usize {
        let mut hasher = FxHasher::default();
        term.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }
}

impl Default for TermStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce a term to the key sequence the fact trie indexes by.
///
/// The default for every variant is the single-element sequence of
/// the term itself; the hook exists so composite variants can spread
/// into multi-element keys later without touching the trie.
pub fn flatten(term: TermId, _terms: &TermStore, out: &mut SmallVec<[TermId; 4]>) {
    out.push(term);
}

/// Collect every reference id mentioned by a term into `out`.
///
/// `Ref` and `WildcardTrace` contribute their id; composites recurse.
/// A lambda does not subtract its own argument from the collection,
/// so a constraint wrapping a lambda seeds the bound name too.
pub fn collect_ref_ids(term: TermId, terms: &TermStore, out: &mut FxHashSet<SymId>) {
    let mut stack: SmallVec<[TermId; 16]> = SmallVec::new();
    stack.push(term);
    while let Some(t) = stack.pop() {
        match terms.resolve(t) {
            Some(Term::Ref(r)) | Some(Term::WildcardTrace(r)) => {
                out.insert(r);
            }
            Some(Term::Lambda { body, .. }) => stack.push(body),
            Some(Term::Apply { pred, arg }) => {
                stack.push(pred);
                stack.push(arg);
            }
            Some(Term::Declare { with, body }) | Some(Term::Constrain { constraint: with, body }) => {
                stack.push(with);
                stack.push(body);
            }
            _ => {}
        }
    }
}

/// Print a term's concrete syntax into `out`.
///
/// Forms: `s`, `*`, `r`, `?`, `?n`, `<arg> body`, `pred arg`,
/// `{with} body`, `[constraint] body`.
pub fn repr(
    term: TermId,
    terms: &TermStore,
    symbols: &SymbolStore,
    out: &mut String,
) -> Result<(), String> {
    match resolve_for_repr(term, terms)? {
        Term::Sym(s) => {
            out.push_str(resolve_name(s, symbols)?);
            Ok(())
        }
        Term::Wildcard | Term::WildcardTrace(_) => {
            out.push('*');
            Ok(())
        }
        Term::Ref(r) => {
            out.push_str(resolve_name(r, symbols)?);
            Ok(())
        }
        Term::Arbitrary => {
            out.push('?');
            Ok(())
        }
        Term::ArbitraryInstance(id) => {
            out.push('?');
            out.push_str(&id.to_string());
            Ok(())
        }
        Term::Lambda { arg, body, .. } => {
            out.push('<');
            out.push_str(resolve_name(arg, symbols)?);
            out.push_str("> ");
            repr(body, terms, symbols, out)
        }
        Term::Apply { pred, arg } => {
            // A chain of applications prints without inner parens on
            // the left: `f a b`, not `(f a) b`.
            if matches!(terms.resolve(pred), Some(Term::Apply { .. })) {
                repr(pred, terms, symbols, out)?;
            } else {
                repr_closed(pred, terms, symbols, out)?;
            }
            out.push(' ');
            repr_closed(arg, terms, symbols, out)
        }
        Term::Declare { with, body } => {
            out.push('{');
            repr(with, terms, symbols, out)?;
            out.push_str("} ");
            repr(body, terms, symbols, out)
        }
        Term::Constrain { constraint, body } => {
            out.push('[');
            repr(constraint, terms, symbols, out)?;
            out.push_str("] ");
            repr(body, terms, symbols, out)
        }
    }
}

/// Like [`repr`], but parenthesizes any form that is not already a
/// single token.
pub fn repr_closed(
    term: TermId,
    terms: &TermStore,
    symbols: &SymbolStore,
    out: &mut String,
) -> Result<(), String> {
    match resolve_for_repr(term, terms)? {
        Term::Lambda { .. }
        | Term::Apply { .. }
        | Term::Declare { .. }
        | Term::Constrain { .. } => {
            out.push('(');
            repr(term, terms, symbols, out)?;
            out.push(')');
            Ok(())
        }
        _ => repr(term, terms, symbols, out),
    }
}

/// Render a term to a fresh string.
pub fn format_term(
    term: TermId,
    terms: &TermStore,
    symbols: &SymbolStore,
) -> Result<String, String> {
    let mut out = String::new();
    repr(term, terms, symbols, &mut out)?;
    Ok(out)
}

fn resolve_for_repr(term: TermId, terms: &TermStore) -> Result<Term, String> {
    terms
        .resolve(term)
        .ok_or_else(|| format!("Unknown term id {:?}", term))
}

fn resolve_name(id: SymId, symbols: &SymbolStore) -> Result<&str, String> {
    symbols
        .resolve(id)
        .ok_or_else(|| format!("Unknown symbol for id {:?}", id))
}


#[cfg(test)]
#[path = "tests/term.rs"]
mod tests;
