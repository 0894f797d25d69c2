//! `TypeId -> TypeKind` store. Builtins live at fixed ids; composite types
//! are interned so that two equivalent annotations (`i32<min=0, max=10>`
//! written twice) resolve to the same `TypeId`.

use twc_util::{define_idx, FxHashMap, IndexVec, Symbol};

define_idx!(TypeId);

pub const I32: TypeId = TypeId(0);
pub const I64: TypeId = TypeId(1);
pub const F32: TypeId = TypeId(2);
pub const F64: TypeId = TypeId(3);
pub const BOOL: TypeId = TypeId(4);
pub const INVALID: TypeId = TypeId(5);

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    I32,
    I64,
    F32,
    F64,
    Bool,
    /// Placeholder for a type that failed to resolve; recovery continues
    /// with this instead of aborting the whole check.
    Invalid,
    /// An integer base type narrowed by an optional inclusive `min`/`max`.
    Refined { base: TypeId, min: Option<i64>, max: Option<i64> },
    /// A fixed-size homogeneous list.
    List { elem: TypeId, size: u32 },
    /// A nominal record type; `fields` is declaration order.
    Record { name: Symbol, fields: Vec<(Symbol, TypeId)> },
}

#[derive(Debug, Default)]
pub struct TypeStore {
    kinds: IndexVec<TypeId, TypeKind>,
    by_name: FxHashMap<Symbol, TypeId>,
    refined_cache: FxHashMap<(TypeId, Option<i64>, Option<i64>), TypeId>,
    list_cache: FxHashMap<(TypeId, u32), TypeId>,
}

impl TypeStore {
    pub fn new() -> Self {
        let mut kinds = IndexVec::new();
        kinds.push(TypeKind::I32);
        kinds.push(TypeKind::I64);
        kinds.push(TypeKind::F32);
        kinds.push(TypeKind::F64);
        kinds.push(TypeKind::Bool);
        kinds.push(TypeKind::Invalid);
        Self {
            kinds,
            by_name: FxHashMap::default(),
            refined_cache: FxHashMap::default(),
            list_cache: FxHashMap::default(),
        }
    }

    pub fn get(&self, id: TypeId) -> &TypeKind {
        &self.kinds[id]
    }

    pub fn lookup_name(&self, name: Symbol) -> Option<TypeId> {
        self.by_name.get(&name).copied()
    }

    /// Reserves a name before its fields are resolved, so a field type
    /// naming this record (direct recursion) can be recognized while the
    /// declaration is still in progress. Call [`TypeStore::finish_record`]
    /// once the field list is known.
    pub fn begin_record(&mut self, name: Symbol) -> bool {
        if self.by_name.contains_key(&name) {
            return false;
        }
        let id = self.kinds.push(TypeKind::Record { name, fields: Vec::new() });
        self.by_name.insert(name, id);
        true
    }

    pub fn finish_record(&mut self, name: Symbol, fields: Vec<(Symbol, TypeId)>) -> TypeId {
        let id = self.by_name[&name];
        self.kinds[id] = TypeKind::Record { name, fields };
        id
    }

    pub fn intern_refined(&mut self, base: TypeId, min: Option<i64>, max: Option<i64>) -> TypeId {
        if min.is_none() && max.is_none() {
            return base;
        }
        let key = (base, min, max);
        if let Some(&id) = self.refined_cache.get(&key) {
            return id;
        }
        let id = self.kinds.push(TypeKind::Refined { base, min, max });
        self.refined_cache.insert(key, id);
        id
    }

    pub fn intern_list(&mut self, elem: TypeId, size: u32) -> TypeId {
        let key = (elem, size);
        if let Some(&id) = self.list_cache.get(&key) {
            return id;
        }
        let id = self.kinds.push(TypeKind::List { elem, size });
        self.list_cache.insert(key, id);
        id
    }

    /// The base primitive a refined type narrows, or the type itself.
    pub fn base_of(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeKind::Refined { base, .. } => *base,
            _ => id,
        }
    }

    pub fn is_integer(&self, id: TypeId) -> bool {
        matches!(self.get(self.base_of(id)), TypeKind::I32 | TypeKind::I64)
    }

    pub fn is_float(&self, id: TypeId) -> bool {
        matches!(self.get(self.base_of(id)), TypeKind::F32 | TypeKind::F64)
    }

    /// Structural equality after erasing refinement, the shape rules used to
    /// operands of a binary operator against each other.
    pub fn same_erased(&self, a: TypeId, b: TypeId) -> bool {
        self.base_of(a) == self.base_of(b)
    }
}
