use crate::symbol::SymbolStore;
use crate::term::{TermId, TermStore};

pub(crate) fn setup() -> (SymbolStore, TermStore) {
    (SymbolStore::new(), TermStore::new())
}

pub(crate) fn sym(name: &str, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    terms.sym(symbols.intern(name))
}

pub(crate) fn reference(name: &str, symbols: &SymbolStore, terms: &TermStore) -> TermId {
    terms.reference(symbols.intern(name))
}
