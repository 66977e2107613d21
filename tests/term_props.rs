use proptest::prelude::*;
use symlog::parser::parse;
use symlog::scope::Scope;
use symlog::subst::subst;
use symlog::symbol::SymbolStore;
use symlog::term::{format_term, TermId, TermStore};
use symlog::valset::singleton;

const SYM_NAMES: [&str; 4] = ["a", "b", "f", "g"];
const REF_NAMES: [&str; 3] = ["X", "Y", "Z"];

#[derive(Clone, Debug)]
enum RawTerm {
    Sym(usize),
    Ref(usize),
    Wildcard,
    Arbitrary,
    Lambda(usize, Box<RawTerm>),
    Apply(Box<RawTerm>, Box<RawTerm>),
    Declare(Box<RawTerm>, Box<RawTerm>),
    Constrain(Box<RawTerm>, Box<RawTerm>),
}

fn closed_leaf() -> impl Strategy<Value = RawTerm> {
    prop_oneof![
        (0..SYM_NAMES.len()).prop_map(RawTerm::Sym),
        Just(RawTerm::Wildcard),
        Just(RawTerm::Arbitrary),
    ]
}

fn open_leaf() -> impl Strategy<Value = RawTerm> {
    prop_oneof![
        (0..SYM_NAMES.len()).prop_map(RawTerm::Sym),
        (0..REF_NAMES.len()).prop_map(RawTerm::Ref),
        Just(RawTerm::Wildcard),
        Just(RawTerm::Arbitrary),
    ]
}

fn composites(
    inner: impl Strategy<Value = RawTerm> + Clone + 'static,
    with_lambda: bool,
) -> BoxedStrategy<RawTerm> {
    let pairs = prop_oneof![
        (inner.clone(), inner.clone())
            .prop_map(|(p, a)| RawTerm::Apply(Box::new(p), Box::new(a))),
        (inner.clone(), inner.clone())
            .prop_map(|(w, b)| RawTerm::Declare(Box::new(w), Box::new(b))),
        (inner.clone(), inner.clone())
            .prop_map(|(c, b)| RawTerm::Constrain(Box::new(c), Box::new(b))),
    ];
    if with_lambda {
        prop_oneof![
            pairs,
            (0..REF_NAMES.len(), inner).prop_map(|(i, b)| RawTerm::Lambda(i, Box::new(b))),
        ]
        .boxed()
    } else {
        pairs.boxed()
    }
}

/// Terms with no Ref/WildcardTrace anywhere.
fn closed_term_strategy() -> impl Strategy<Value = RawTerm> {
    closed_leaf().prop_recursive(3, 24, 2, |inner| composites(inner, true))
}

/// The full variant set reachable from source text.
fn any_term_strategy() -> impl Strategy<Value = RawTerm> {
    open_leaf().prop_recursive(3, 24, 2, |inner| composites(inner, true))
}

/// Lambda-free terms: construction is deterministic and repr is
/// re-parseable (a reparsed lambda would mint a fresh identity).
fn printable_term_strategy() -> impl Strategy<Value = RawTerm> {
    open_leaf().prop_recursive(3, 24, 2, |inner| composites(inner, false))
}

fn build(raw: &RawTerm, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    match raw {
        RawTerm::Sym(i) => terms.sym(symbols.intern(SYM_NAMES[*i])),
        RawTerm::Ref(i) => terms.reference(symbols.intern(REF_NAMES[*i])),
        RawTerm::Wildcard => terms.wildcard(),
        RawTerm::Arbitrary => terms.arbitrary(),
        RawTerm::Lambda(i, body) => {
            let body = build(body, symbols, terms);
            terms.lambda(symbols.intern(REF_NAMES[*i]), body)
        }
        RawTerm::Apply(p, a) => {
            let p = build(p, symbols, terms);
            let a = build(a, symbols, terms);
            terms.apply(p, a)
        }
        RawTerm::Declare(w, b) => {
            let w = build(w, symbols, terms);
            let b = build(b, symbols, terms);
            terms.declare(w, b)
        }
        RawTerm::Constrain(c, b) => {
            let c = build(c, symbols, terms);
            let b = build(b, symbols, terms);
            terms.constrain(c, b)
        }
    }
}

proptest! {
    /// Substitution under the empty scope is identity for every term.
    #[test]
    fn subst_under_empty_scope_is_identity(raw in any_term_strategy()) {
        let symbols = SymbolStore::new();
        let terms = TermStore::new();
        let t = build(&raw, &symbols, &terms);

        let out = subst(t, &Scope::root(), &terms).unwrap();
        prop_assert_eq!(out, singleton(t));
    }

    /// A term with no references is fixed under any scope.
    #[test]
    fn closed_terms_are_fixed_under_any_scope(
        raw in closed_term_strategy(),
        bound in prop::collection::hash_map(0..REF_NAMES.len(), 0..SYM_NAMES.len(), 0..3),
    ) {
        let symbols = SymbolStore::new();
        let terms = TermStore::new();
        let t = build(&raw, &symbols, &terms);

        let mut scope = Scope::root();
        for (r, s) in bound {
            let value = terms.sym(symbols.intern(SYM_NAMES[s]));
            scope.add(symbols.intern(REF_NAMES[r]), singleton(value));
        }

        let out = subst(t, &scope, &terms).unwrap();
        prop_assert_eq!(out, singleton(t));
    }

    /// Hash-consing: building the same lambda-free structure twice
    /// yields the same TermId (and therefore equal terms and hashes).
    #[test]
    fn construction_is_deterministic_without_lambdas(raw in printable_term_strategy()) {
        let symbols = SymbolStore::new();
        let terms = TermStore::new();
        let first = build(&raw, &symbols, &terms);
        let second = build(&raw, &symbols, &terms);
        prop_assert_eq!(first, second);
    }

    /// repr output parses back to the identical term.
    #[test]
    fn repr_round_trips_through_the_parser(raw in printable_term_strategy()) {
        let symbols = SymbolStore::new();
        let terms = TermStore::new();
        let t = build(&raw, &symbols, &terms);

        let printed = format_term(t, &terms, &symbols).unwrap();
        let reparsed = parse(&printed, &terms, &symbols).unwrap();
        prop_assert_eq!(reparsed, t, "printed form: {}", printed);
    }

    /// Chained lookup and squash agree on every name.
    #[test]
    fn squash_agrees_with_chained_lookup(
        parent_entries in prop::collection::hash_map(0..REF_NAMES.len(), 0..SYM_NAMES.len(), 0..3),
        child_entries in prop::collection::hash_map(0..REF_NAMES.len(), 0..SYM_NAMES.len(), 0..3),
        shadowed in prop::collection::hash_set(0..REF_NAMES.len(), 0..3),
    ) {
        let symbols = SymbolStore::new();
        let terms = TermStore::new();
        let value = |s: usize| terms.sym(symbols.intern(SYM_NAMES[s]));

        let mut parent = Scope::root();
        for (r, s) in parent_entries {
            parent.add(symbols.intern(REF_NAMES[r]), singleton(value(s)));
        }
        let mut child = Scope::shadowing(&parent);
        for r in shadowed {
            child.shadow(symbols.intern(REF_NAMES[r]));
        }
        for (r, s) in child_entries {
            child.add(symbols.intern(REF_NAMES[r]), singleton(value(s)));
        }

        let flat = child.squash();
        for name in REF_NAMES {
            let k = symbols.intern(name);
            match child.get(k) {
                Some(vs) => prop_assert_eq!(flat.get(&k), Some(vs)),
                None => prop_assert!(!flat.contains_key(&k)),
            }
        }
    }
}
