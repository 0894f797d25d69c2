//! Flat binding names and their flattened primitive-leaf locals.
//!
//! TinyWhale has one lexical scope per compilation, so this is a flat map
//! rather than the teacher's rib-chained [`crate::scope`] (kept on disk,
//! unwired, as the nested-scope reference it was grounded on). Binding a
//! record or list allocates no local of its own: [`SymbolTable::declare`]
//! recurses through the bound type and allocates one local per primitive
//! leaf, named by its dotted/bracketed path (`p.x`, `arr[0]`), matching how
//! field and index access later look leaves back up by reconstructing the
//! same path.

use crate::type_store::{TypeKind, TypeStore};
use twc_util::{define_idx, FxHashMap, IndexVec, Symbol};

define_idx!(SymbolId);

#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub name: Symbol,
    pub type_id: crate::type_store::TypeId,
    pub local_index: u32,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: IndexVec<SymbolId, Slot>,
    /// Every declared binding name (aggregate or leaf) to its declared type.
    bindings: FxHashMap<Symbol, crate::type_store::TypeId>,
    /// Full dotted/bracketed leaf path to its local.
    locals: FxHashMap<Symbol, SymbolId>,
    next_local: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_defined(&self, name: Symbol) -> bool {
        self.bindings.contains_key(&name)
    }

    pub fn type_of(&self, name: Symbol) -> Option<crate::type_store::TypeId> {
        self.bindings.get(&name).copied()
    }

    pub fn local_of(&self, full_path: Symbol) -> Option<SymbolId> {
        self.locals.get(&full_path).copied()
    }

    pub fn slot(&self, id: SymbolId) -> &Slot {
        &self.slots[id]
    }

    pub fn local_count(&self) -> u32 {
        self.next_local
    }

    /// Declares `name : type_id`, flattening through records and lists.
    pub fn declare(&mut self, name: Symbol, type_id: crate::type_store::TypeId, types: &TypeStore) {
        self.bindings.insert(name, type_id);
        self.flatten(name.as_str().to_string(), type_id, types);
    }

    fn flatten(&mut self, path: String, type_id: crate::type_store::TypeId, types: &TypeStore) {
        match types.get(type_id) {
            TypeKind::Record { fields, .. } => {
                for (field_name, field_type) in fields.clone() {
                    self.flatten(format!("{path}.{}", field_name.as_str()), field_type, types);
                }
            },
            TypeKind::List { elem, size } => {
                for i in 0..*size {
                    self.flatten(format!("{path}[{i}]"), *elem, types);
                }
            },
            _ => {
                let full = Symbol::intern(&path);
                let local_index = self.next_local;
                self.next_local += 1;
                let id = self.slots.push(Slot { name: full, type_id, local_index });
                self.locals.insert(full, id);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_store::{self as ts, TypeStore};

    #[test]
    fn a_primitive_binding_allocates_exactly_one_local() {
        let types = TypeStore::new();
        let mut symbols = SymbolTable::new();
        symbols.declare(Symbol::intern("x"), ts::I32, &types);
        assert_eq!(symbols.local_count(), 1);
        assert!(symbols.local_of(Symbol::intern("x")).is_some());
    }

    #[test]
    fn a_record_binding_flattens_to_one_local_per_field() {
        let mut types = TypeStore::new();
        let name = Symbol::intern("Point");
        types.begin_record(name);
        let point =
            types.finish_record(name, vec![(Symbol::intern("x"), ts::I32), (Symbol::intern("y"), ts::I32)]);
        let mut symbols = SymbolTable::new();
        symbols.declare(Symbol::intern("p"), point, &types);
        assert_eq!(symbols.local_count(), 2);
        assert!(symbols.local_of(Symbol::intern("p.x")).is_some());
        assert!(symbols.local_of(Symbol::intern("p.y")).is_some());
        assert!(symbols.local_of(Symbol::intern("p")).is_none());
    }

    #[test]
    fn a_list_binding_flattens_to_n_locals() {
        let mut types = TypeStore::new();
        let list_ty = types.intern_list(ts::I32, 3);
        let mut symbols = SymbolTable::new();
        symbols.declare(Symbol::intern("arr"), list_ty, &types);
        assert_eq!(symbols.local_count(), 3);
        for i in 0..3 {
            assert!(symbols.local_of(Symbol::intern(&format!("arr[{i}]"))).is_some());
        }
    }

    #[test]
    fn local_indices_are_dense_and_in_declaration_order() {
        let types = TypeStore::new();
        let mut symbols = SymbolTable::new();
        symbols.declare(Symbol::intern("a"), ts::I32, &types);
        symbols.declare(Symbol::intern("b"), ts::I64, &types);
        let a = symbols.slot(symbols.local_of(Symbol::intern("a")).unwrap());
        let b = symbols.slot(symbols.local_of(Symbol::intern("b")).unwrap());
        assert_eq!(a.local_index, 0);
        assert_eq!(b.local_index, 1);
    }
}
