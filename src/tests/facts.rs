use crate::facts::ValTree;
use crate::scope::Scope;
use crate::term::{flatten, TermId};
use crate::test_utils::{setup, sym};
use crate::valset::singleton;
use crate::world::World;
use smallvec::SmallVec;

fn key_of(term: TermId, terms: &crate::term::TermStore) -> SmallVec<[TermId; 4]> {
    let mut seq = SmallVec::new();
    flatten(term, terms, &mut seq);
    seq
}

#[test]
fn inserted_fact_is_found_by_its_own_key() {
    let (symbols, terms) = setup();
    let fact = sym("a", &symbols, &terms);

    let mut tree = ValTree::new();
    assert!(tree.is_empty());
    tree.add(fact, &terms);
    assert!(!tree.is_empty());

    let mut out = Vec::new();
    tree.get_matches(&key_of(fact, &terms), &Scope::root(), &terms, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0, fact);
    assert!(out[0].1.is_empty(), "A ground match captures nothing");
}

#[test]
fn mismatched_query_finds_nothing() {
    let (symbols, terms) = setup();
    let a = sym("a", &symbols, &terms);
    let c = sym("c", &symbols, &terms);

    let mut tree = ValTree::new();
    tree.add(a, &terms);

    let mut out = Vec::new();
    tree.get_matches(&key_of(c, &terms), &Scope::root(), &terms, &mut out);
    assert!(out.is_empty());
}

#[test]
fn stored_ref_captures_the_query() {
    let (symbols, terms) = setup();
    let p = sym("p", &symbols, &terms);
    let foo = sym("foo", &symbols, &terms);
    let x = symbols.intern("X");

    let fact = terms.apply(p, terms.reference(x));
    let mut tree = ValTree::new();
    tree.add(fact, &terms);

    let query = terms.apply(p, foo);
    let mut out = Vec::new();
    tree.get_matches(&key_of(query, &terms), &Scope::root(), &terms, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0, fact, "The original fact term is returned");
    assert_eq!(out[0].1.get(&x), Some(&singleton(foo)));
}

#[test]
fn query_ref_captures_from_stored_fact() {
    let (symbols, terms) = setup();
    let p = sym("p", &symbols, &terms);
    let foo = sym("foo", &symbols, &terms);
    let x = symbols.intern("X");

    let fact = terms.apply(p, foo);
    let mut tree = ValTree::new();
    tree.add(fact, &terms);

    let query = terms.apply(p, terms.reference(x));
    let mut out = Vec::new();
    tree.get_matches(&key_of(query, &terms), &Scope::root(), &terms, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].1.get(&x), Some(&singleton(foo)));
}

#[test]
fn each_candidate_fact_gets_an_independent_scope() {
    let (symbols, terms) = setup();
    let p = sym("p", &symbols, &terms);
    let a = sym("a", &symbols, &terms);
    let b = sym("b", &symbols, &terms);
    let x = symbols.intern("X");

    let mut tree = ValTree::new();
    tree.add(terms.apply(p, a), &terms);
    tree.add(terms.apply(p, b), &terms);

    let query = terms.apply(p, terms.reference(x));
    let mut out = Vec::new();
    tree.get_matches(&key_of(query, &terms), &Scope::root(), &terms, &mut out);
    assert_eq!(out.len(), 2);
    for (_, bindings) in &out {
        let vs = bindings.get(&x).expect("each match binds X");
        assert_eq!(vs.len(), 1, "Bindings never bleed between candidates");
    }
}

#[test]
fn reinsert_with_same_key_overwrites() {
    let (symbols, terms) = setup();
    let a = sym("a", &symbols, &terms);

    let mut tree = ValTree::new();
    tree.add(a, &terms);
    tree.add(a, &terms);

    let mut out = Vec::new();
    tree.get_matches(&key_of(a, &terms), &Scope::root(), &terms, &mut out);
    assert_eq!(out.len(), 1);
}

// ========== WORLD ==========

#[test]
fn world_add_goes_to_the_innermost_frame() {
    let (symbols, terms) = setup();
    let a = sym("a", &symbols, &terms);

    let parent = World::root();
    let mut child = World::child(&parent);
    child.add(a, &terms);

    assert_eq!(child.get_matches(a, &terms).len(), 1);
    assert!(parent.get_matches(a, &terms).is_empty());
}

#[test]
fn world_unions_matches_across_the_chain() {
    let (symbols, terms) = setup();
    let p = sym("p", &symbols, &terms);
    let a = sym("a", &symbols, &terms);
    let b = sym("b", &symbols, &terms);
    let x = symbols.intern("X");

    let mut parent = World::root();
    parent.add(terms.apply(p, a), &terms);
    let mut child = World::child(&parent);
    child.add(terms.apply(p, b), &terms);

    let query = terms.apply(p, terms.reference(x));
    let matches = child.get_matches(query, &terms);
    assert_eq!(matches.len(), 2, "Parent and child matches union");
    assert_eq!(
        matches[0].0,
        terms.apply(p, a),
        "Outer frames report first"
    );
    assert_eq!(matches[1].0, terms.apply(p, b));
}

#[test]
fn world_match_scopes_are_squashed_and_independent() {
    let (symbols, terms) = setup();
    let p = sym("p", &symbols, &terms);
    let a = sym("a", &symbols, &terms);
    let x = symbols.intern("X");

    let mut world = World::root();
    world.add(terms.apply(p, a), &terms);

    let query = terms.apply(p, terms.reference(x));
    let matches = world.get_matches(query, &terms);
    assert_eq!(matches.len(), 1);
    // The returned bindings are a flat map usable after the world
    // and any scope chain are gone.
    let (_, bindings) = &matches[0];
    assert_eq!(bindings.get(&x), Some(&singleton(a)));
}
