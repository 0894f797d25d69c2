//! Interned float constants (`FloatId -> f64`).
//!
//! `f64` isn't `Eq`/`Hash`, so interning keys on the bit pattern rather than
//! the value directly; `-0.0` and `0.0` therefore intern to distinct ids,
//! matching their distinct bit patterns in the eventual wasm constant.

use twc_util::{define_idx, FxHashMap, IndexVec};

define_idx!(FloatId);

#[derive(Debug, Default)]
pub struct FloatStore {
    values: IndexVec<FloatId, f64>,
    by_bits: FxHashMap<u64, FloatId>,
}

impl FloatStore {
    pub fn new() -> Self {
        Self { values: IndexVec::new(), by_bits: FxHashMap::default() }
    }

    pub fn intern(&mut self, value: f64) -> FloatId {
        let bits = value.to_bits();
        if let Some(&id) = self.by_bits.get(&bits) {
            return id;
        }
        let id = self.values.push(value);
        self.by_bits.insert(bits, id);
        id
    }

    pub fn get(&self, id: FloatId) -> f64 {
        self.values[id]
    }
}
