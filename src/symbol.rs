use lasso::{Spur, ThreadedRodeo};

/// A unique identifier for a name appearing in a term.
/// Both ground symbols (`Sym`) and reference names (`Ref`,
/// `WildcardTrace`, lambda arguments) draw from the same interned
/// id space, so a lambda argument and the references it binds
/// compare by id equality.
pub type SymId = Spur;

/// Thread-safe store for interning symbol and reference names.
///
/// Guarantees:
/// - Same string always produces the same SymId
/// - Different strings always produce different SymIds
/// - A SymId can be resolved back to the original string
pub struct SymbolStore {
    rodeo: ThreadedRodeo,
}

impl SymbolStore {
    /// Create a new empty symbol store.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Intern a name, returning its unique SymId.
    /// If the name was already interned, returns the existing SymId.
    pub fn intern(&self, name: &str) -> SymId {
        self.rodeo.get_or_intern(name)
    }

    /// Resolve a SymId back to its string representation.
    /// Returns None if the SymId was not created by this store.
    pub fn resolve(&self, id: SymId) -> Option<&str> {
        self.rodeo.try_resolve(&id)
    }

    /// Get the SymId for a name if it exists, without interning.
    pub fn get(&self, name: &str) -> Option<SymId> {
        self.rodeo.get(name)
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}
