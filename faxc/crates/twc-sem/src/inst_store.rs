//! The SemIR: a flat, append-only instruction stream the checker emits and
//! the code generator walks in order.
//!
//! `Inst` is deliberately one fixed shape reused by every kind rather than a
//! tagged union of differently-shaped payloads, matching the arena-of-fixed-
//! records style every other store in this compiler uses. `arg0`/`arg1` mean
//! different things per `kind`; see the doc comment on each variant.

use crate::type_store::TypeId;
use twc_par::NodeId;
use twc_util::{define_idx, IndexVec};

define_idx!(InstId);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstKind {
    /// `arg0` = value as `u32` bits for I32, or the low 32 bits for I64;
    /// `arg1` = the high 32 bits for I64, unused (0) for I32.
    IntConst,
    /// `arg0` = `FloatId` index into the checker's `FloatStore`.
    FloatConst,
    /// `arg0` = `SymbolId` index of the local being read.
    VarRef,
    /// `arg0` = `SymbolId` index of the target local; `arg1` = `InstId`
    /// index of the value expression.
    Bind,
    /// `arg0` = `InstId` index of the operand.
    Negate,
    /// `arg0` = `InstId` index of the operand.
    BitwiseNot,
    /// `arg0`/`arg1` = `InstId` indices of the left/right operands. The
    /// operator itself isn't stored here: `parse_node_id` points at the
    /// `Binary` parse node, whose token carries the operator.
    BinaryOp,
    /// `arg0`/`arg1` = `InstId` indices of the left/right operands.
    LogicalAnd,
    /// `arg0`/`arg1` = `InstId` indices of the left/right operands.
    LogicalOr,
    /// `arg0` = `InstId` index of the scrutinee; `arg1` = arm count. The
    /// `arg1` arms immediately preceding this instruction are its `MatchArm`s.
    Match,
    /// `parse_node_id` points at the arm's pattern node; `arg0` = `InstId`
    /// index of the arm's body expression.
    MatchArm,
    /// Reserved: flattened record access always resolves to `VarRef` during
    /// checking, so nothing in this implementation emits this kind.
    FieldAccess,
    /// Emitted for a `panic` statement; takes no operands.
    Unreachable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inst {
    pub kind: InstKind,
    pub type_id: TypeId,
    pub parse_node_id: NodeId,
    pub arg0: u32,
    pub arg1: u32,
}

#[derive(Debug, Default)]
pub struct InstStore {
    insts: IndexVec<InstId, Inst>,
}

impl InstStore {
    pub fn new() -> Self {
        Self { insts: IndexVec::new() }
    }

    pub fn push(&mut self, kind: InstKind, type_id: TypeId, parse_node_id: NodeId, arg0: u32, arg1: u32) -> InstId {
        self.insts.push(Inst { kind, type_id, parse_node_id, arg0, arg1 })
    }

    pub fn get(&self, id: InstId) -> &Inst {
        &self.insts[id]
    }

    /// Rewrites an already-pushed instruction's type and operands in place.
    /// Used to retarget a literal's `IntConst`/`FloatConst` encoding once the
    /// checker learns the type it's actually bound to (a binding's
    /// annotation, a field's declared type, a list's element type).
    pub fn set_args(&mut self, id: InstId, type_id: TypeId, arg0: u32, arg1: u32) {
        let inst = &mut self.insts[id];
        inst.type_id = type_id;
        inst.arg0 = arg0;
        inst.arg1 = arg1;
    }

    /// Rewrites only an already-pushed instruction's type, keeping its
    /// operands (used to narrow a `FloatConst` from its default `f64` to
    /// `f32` without touching the `FloatId` it points at).
    pub fn retype(&mut self, id: InstId, type_id: TypeId) {
        self.insts[id].type_id = type_id;
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (InstId, &Inst)> {
        self.insts.iter_enumerated()
    }
}
