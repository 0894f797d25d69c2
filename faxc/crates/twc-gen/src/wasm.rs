//! WebAssembly code generator.
//!
//! Walks the checker's `InstStore` in instruction order, emitting one
//! `_start` function body with `wasm-encoder`. Grounded on the teacher's
//! `llvm.rs` (one backend struct owning the target module/builder, one
//! `generate_*` method per lowered construct) with the LLVM/inkwell
//! machinery — register allocation, ABI, target triple — dropped: this
//! target needs none of it, `wasm-encoder` owns the encoding directly.
//!
//! Only `Bind` and `Unreachable` are emitted as top-level body statements;
//! every other `InstKind` only ever appears as an operand of one of those
//! (or of another expression reachable from one), so it's lowered
//! recursively at the point of use instead of being walked in isolation.

use crate::error::{CodeGenError, Result};
use twc_lex::Token;
use twc_par::{NodeId, NodeKind, NodeStore, TokenStore};
use twc_sem::{CheckResult, Inst, InstId, InstKind, TypeId};
use twc_util::{FxHashMap, Idx};
use wasm_encoder::{
    BlockType, CodeSection, ExportKind, ExportSection, Function, FunctionSection, Instruction,
    Module, StartSection, TypeSection, ValType,
};

pub struct GenResult {
    pub binary: Vec<u8>,
    pub text: String,
    pub valid: bool,
}

/// Lowers a succeeded [`CheckResult`] into a wasm module. `nodes`/`tokens`
/// are the parse tree and token stream the check ran over: codegen still
/// needs them to read a match arm's pattern shape, since the SemIR only
/// points back at the pattern's parse node rather than re-encoding it.
pub fn generate(check: &CheckResult, nodes: &NodeStore, tokens: &TokenStore) -> Result<GenResult> {
    if check.insts.is_empty() {
        return Err(CodeGenError::EmptyProgram);
    }

    let mut gen = Generator::new(check, nodes, tokens);
    gen.prepare_locals();
    for (_, inst) in check.insts.iter_enumerated() {
        match inst.kind {
            InstKind::Bind => gen.lower_bind(inst)?,
            InstKind::Unreachable => {
                gen.func.instruction(&Instruction::Unreachable);
            },
            _ => {},
        }
    }
    gen.func.instruction(&Instruction::End);
    gen.assemble()
}

struct Generator<'c> {
    check: &'c CheckResult,
    nodes: &'c NodeStore,
    tokens: &'c TokenStore,
    func: Function,
    /// First local index after every declared `Symbol`'s own local; scratch
    /// locals (Euclidean `%%`, match scrutinee staging) are allocated here.
    scratch_base: u32,
    /// `%%` and `Match` insts each need a fixed block of scratch locals;
    /// keyed by the inst's own id rather than assigned by visitation order,
    /// so lowering's recursive (non-linear) traversal can't desync from the
    /// pre-scan that sized the locals declaration.
    scratch_slots: FxHashMap<InstId, u32>,
}

impl<'c> Generator<'c> {
    fn new(check: &'c CheckResult, nodes: &'c NodeStore, tokens: &'c TokenStore) -> Self {
        Self {
            check,
            nodes,
            tokens,
            func: Function::new([]),
            scratch_base: check.symbols.local_count(),
            scratch_slots: FxHashMap::default(),
        }
    }

    fn val_type(&self, type_id: TypeId) -> ValType {
        match self.check.types.get(self.check.types.base_of(type_id)) {
            twc_sem::TypeKind::I64 => ValType::I64,
            twc_sem::TypeKind::F32 => ValType::F32,
            twc_sem::TypeKind::F64 => ValType::F64,
            _ => ValType::I32,
        }
    }

    /// Declares one local per `Symbol` (in `localIndex` order) plus one
    /// scratch block per `%%`/`Match` instruction found by a single
    /// forward scan, then rebuilds `self.func` with the full locals list —
    /// wasm declares a function's locals up front, before any instruction
    /// reads or writes them.
    fn prepare_locals(&mut self) {
        let mut locals: Vec<(u32, ValType)> = Vec::with_capacity(self.scratch_base as usize);
        for local_index in 0..self.scratch_base {
            let slot = self.check.symbols.slot(twc_sem::SymbolId::from_usize(local_index as usize));
            locals.push((1, self.val_type(slot.type_id)));
        }
        let mut next_scratch = self.scratch_base;
        for (id, inst) in self.check.insts.iter_enumerated() {
            match inst.kind {
                InstKind::BinaryOp if self.operator(inst) == Token::PercentPercent => {
                    let ty = self.val_type(inst.type_id);
                    self.scratch_slots.insert(id, next_scratch);
                    locals.push((1, ty));
                    locals.push((1, ty));
                    locals.push((1, ty));
                    next_scratch += 3;
                },
                InstKind::Match => {
                    let scrutinee = InstId::from_usize(inst.arg0 as usize);
                    let ty = self.val_type(self.check.insts.get(scrutinee).type_id);
                    self.scratch_slots.insert(id, next_scratch);
                    locals.push((1, ty));
                    next_scratch += 1;
                },
                _ => {},
            }
        }
        self.func = Function::new(locals);
    }

    fn operator(&self, inst: &Inst) -> Token {
        self.tokens.token(self.nodes.get(inst.parse_node_id).token_id).clone()
    }

    // -- statements -----------------------------------------------------

    fn lower_bind(&mut self, inst: &Inst) -> Result<()> {
        let value = InstId::from_usize(inst.arg1 as usize);
        self.lower_expr(value)?;
        self.func.instruction(&Instruction::LocalSet(inst.arg0));
        Ok(())
    }

    // -- expressions ------------------------------------------------------

    fn lower_expr(&mut self, id: InstId) -> Result<()> {
        let inst = *self.check.insts.get(id);
        match inst.kind {
            InstKind::IntConst => self.lower_int_const(&inst),
            InstKind::FloatConst => self.lower_float_const(&inst),
            InstKind::VarRef => {
                self.func.instruction(&Instruction::LocalGet(inst.arg0));
                Ok(())
            },
            InstKind::Negate => self.lower_negate(&inst),
            InstKind::BitwiseNot => self.lower_bitwise_not(&inst),
            InstKind::BinaryOp => self.lower_binary_op(id, &inst),
            InstKind::LogicalAnd => self.lower_logical(&inst, true),
            InstKind::LogicalOr => self.lower_logical(&inst, false),
            InstKind::Match => self.lower_match(id, &inst),
            InstKind::Bind | InstKind::Unreachable | InstKind::MatchArm | InstKind::FieldAccess => {
                Err(CodeGenError::UnsupportedOperator(format!("{:?} used as a value", inst.kind)))
            },
        }
    }

    fn lower_int_const(&mut self, inst: &Inst) -> Result<()> {
        match self.val_type(inst.type_id) {
            ValType::I64 => {
                let bits = (inst.arg0 as u64) | ((inst.arg1 as u64) << 32);
                self.func.instruction(&Instruction::I64Const(bits as i64));
            },
            _ => {
                self.func.instruction(&Instruction::I32Const(inst.arg0 as i32));
            },
        }
        Ok(())
    }

    fn lower_float_const(&mut self, inst: &Inst) -> Result<()> {
        let value = self.check.floats.get(twc_sem::FloatId::from_usize(inst.arg0 as usize));
        match self.val_type(inst.type_id) {
            ValType::F32 => {
                self.func.instruction(&Instruction::F32Const(value as f32));
            },
            _ => {
                self.func.instruction(&Instruction::F64Const(value));
            },
        }
        Ok(())
    }

    fn lower_negate(&mut self, inst: &Inst) -> Result<()> {
        let operand = InstId::from_usize(inst.arg0 as usize);
        match self.val_type(inst.type_id) {
            ValType::I32 => {
                self.func.instruction(&Instruction::I32Const(0));
                self.lower_expr(operand)?;
                self.func.instruction(&Instruction::I32Sub);
            },
            ValType::I64 => {
                self.func.instruction(&Instruction::I64Const(0));
                self.lower_expr(operand)?;
                self.func.instruction(&Instruction::I64Sub);
            },
            ValType::F32 => {
                self.lower_expr(operand)?;
                self.func.instruction(&Instruction::F32Neg);
            },
            _ => {
                self.lower_expr(operand)?;
                self.func.instruction(&Instruction::F64Neg);
            },
        }
        Ok(())
    }

    fn lower_bitwise_not(&mut self, inst: &Inst) -> Result<()> {
        let operand = InstId::from_usize(inst.arg0 as usize);
        self.lower_expr(operand)?;
        match self.val_type(inst.type_id) {
            ValType::I64 => {
                self.func.instruction(&Instruction::I64Const(-1));
                self.func.instruction(&Instruction::I64Xor);
            },
            _ => {
                self.func.instruction(&Instruction::I32Const(-1));
                self.func.instruction(&Instruction::I32Xor);
            },
        }
        Ok(())
    }

    fn lower_binary_op(&mut self, id: InstId, inst: &Inst) -> Result<()> {
        let left = InstId::from_usize(inst.arg0 as usize);
        let right = InstId::from_usize(inst.arg1 as usize);
        let op = self.operator(inst);
        if matches!(op, Token::PercentPercent) {
            return self.lower_euclid_mod(id, left, right);
        }
        let operand_ty = self.val_type(self.check.insts.get(left).type_id);
        self.lower_expr(left)?;
        self.lower_expr(right)?;
        self.func.instruction(&binary_instruction(operand_ty, &op)?);
        Ok(())
    }

    /// `%%`: Euclidean modulo, `((a rem b) + |b|) rem |b|`. `|b|` is
    /// computed via the branchless `(b ^ (b >> N)) - (b >> N)` identity at
    /// the operand's integer width; three scratch locals (`b`, the signed
    /// remainder, and `|b|`) avoid re-evaluating `left`/`right` and let the
    /// stack-machine encoding read the intermediate values back in any
    /// order it needs them.
    fn lower_euclid_mod(&mut self, id: InstId, left: InstId, right: InstId) -> Result<()> {
        let ty = self.val_type(self.check.insts.get(left).type_id);
        let base = self.scratch_slots[&id];
        let (b_local, r_local, absb_local) = (base, base + 1, base + 2);
        let (width_minus_one, rem_s, xor, sub, shr_s, add, const_zero) = match ty {
            ValType::I64 => (
                63i64,
                Instruction::I64RemS,
                Instruction::I64Xor,
                Instruction::I64Sub,
                Instruction::I64ShrS,
                Instruction::I64Add,
                Instruction::I64Const(0),
            ),
            _ => (
                31i64,
                Instruction::I32RemS,
                Instruction::I32Xor,
                Instruction::I32Sub,
                Instruction::I32ShrS,
                Instruction::I32Add,
                Instruction::I32Const(0),
            ),
        };
        let shift_amount = || if matches!(ty, ValType::I64) {
            Instruction::I64Const(width_minus_one)
        } else {
            Instruction::I32Const(width_minus_one as i32)
        };
        let local_get = |i: u32| Instruction::LocalGet(i);
        let local_set = |i: u32| Instruction::LocalSet(i);

        self.lower_expr(left)?;
        self.lower_expr(right)?;
        self.func.instruction(&local_set(b_local));
        self.func.instruction(&local_get(b_local));
        self.func.instruction(&rem_s);
        self.func.instruction(&local_set(r_local));

        self.func.instruction(&local_get(b_local));
        self.func.instruction(&local_get(b_local));
        self.func.instruction(&shift_amount());
        self.func.instruction(&shr_s);
        self.func.instruction(&xor);
        self.func.instruction(&local_get(b_local));
        self.func.instruction(&shift_amount());
        self.func.instruction(&shr_s);
        self.func.instruction(&sub);
        self.func.instruction(&local_set(absb_local));

        let _ = const_zero; // no branch needed: the identity above is already sign-correct.
        self.func.instruction(&local_get(r_local));
        self.func.instruction(&local_get(absb_local));
        self.func.instruction(&add);
        self.func.instruction(&local_get(absb_local));
        self.func.instruction(&rem_s);
        Ok(())
    }

    fn lower_logical(&mut self, inst: &Inst, is_and: bool) -> Result<()> {
        let left = InstId::from_usize(inst.arg0 as usize);
        let right = InstId::from_usize(inst.arg1 as usize);
        self.lower_expr(left)?;
        self.func.instruction(&Instruction::If(BlockType::Result(ValType::I32)));
        if is_and {
            self.lower_expr(right)?;
            self.func.instruction(&Instruction::Else);
            self.func.instruction(&Instruction::I32Const(0));
        } else {
            self.func.instruction(&Instruction::I32Const(1));
            self.func.instruction(&Instruction::Else);
            self.lower_expr(right)?;
        }
        self.func.instruction(&Instruction::End);
        Ok(())
    }

    // -- match ------------------------------------------------------------

    fn lower_match(&mut self, id: InstId, inst: &Inst) -> Result<()> {
        let scrutinee = InstId::from_usize(inst.arg0 as usize);
        let arm_count = inst.arg1 as usize;
        let scrut_ty = self.val_type(self.check.insts.get(scrutinee).type_id);
        let result_ty = self.val_type(inst.type_id);
        let scrut_local = self.scratch_slots[&id];

        self.lower_expr(scrutinee)?;
        self.func.instruction(&Instruction::LocalSet(scrut_local));

        let first_arm = id.index() - arm_count;
        let arms: Vec<InstId> = (0..arm_count).map(|i| InstId::from_usize(first_arm + i)).collect();
        self.lower_match_arms(&arms, 0, scrut_local, scrut_ty, result_ty)
    }

    fn lower_match_arms(
        &mut self,
        arms: &[InstId],
        idx: usize,
        scrut_local: u32,
        scrut_ty: ValType,
        result_ty: ValType,
    ) -> Result<()> {
        if idx == arms.len() {
            self.func.instruction(&Instruction::Unreachable);
            return Ok(());
        }
        let arm = *self.check.insts.get(arms[idx]);
        let pattern_node = arm.parse_node_id;
        let body = InstId::from_usize(arm.arg0 as usize);
        if is_catch_all(self.nodes, pattern_node) {
            return self.lower_expr(body);
        }
        self.lower_pattern_cmp(pattern_node, scrut_local, scrut_ty);
        self.func.instruction(&Instruction::If(BlockType::Result(result_ty)));
        self.lower_expr(body)?;
        self.func.instruction(&Instruction::Else);
        self.lower_match_arms(arms, idx + 1, scrut_local, scrut_ty, result_ty)?;
        self.func.instruction(&Instruction::End);
        Ok(())
    }

    fn lower_pattern_cmp(&mut self, pattern_node: NodeId, scrut_local: u32, scrut_ty: ValType) {
        match self.nodes.get(pattern_node).kind {
            NodeKind::LiteralPattern => {
                let value_node = self.nodes.children(pattern_node)[0];
                let value = signed_int_literal(self.nodes, self.tokens, value_node);
                self.func.instruction(&Instruction::LocalGet(scrut_local));
                if matches!(scrut_ty, ValType::I64) {
                    self.func.instruction(&Instruction::I64Const(value));
                    self.func.instruction(&Instruction::I64Eq);
                } else {
                    self.func.instruction(&Instruction::I32Const(value as i32));
                    self.func.instruction(&Instruction::I32Eq);
                }
            },
            NodeKind::OrPattern => {
                let alts = self.nodes.children(pattern_node);
                self.lower_pattern_cmp(alts[0], scrut_local, scrut_ty);
                for alt in &alts[1..] {
                    self.lower_pattern_cmp(*alt, scrut_local, scrut_ty);
                    self.func.instruction(&Instruction::I32Or);
                }
            },
            _ => {
                self.func.instruction(&Instruction::I32Const(1));
            },
        }
    }

    // -- assembly -----------------------------------------------------------

    fn assemble(self) -> Result<GenResult> {
        let mut types = TypeSection::new();
        types.ty().function([], []);
        let mut functions = FunctionSection::new();
        functions.function(0);
        let mut exports = ExportSection::new();
        exports.export("_start", ExportKind::Func, 0);
        let start = StartSection { function_index: 0 };
        let mut code = CodeSection::new();
        code.function(&self.func);

        let mut module = Module::new();
        module.section(&types);
        module.section(&functions);
        module.section(&exports);
        module.section(&start);
        module.section(&code);
        let binary = module.finish();

        let valid = wasmparser::Validator::new().validate_all(&binary).is_ok();
        let text = wasmprinter::print_bytes(&binary).map_err(|e| CodeGenError::Print(e.to_string()))?;
        Ok(GenResult { binary, text, valid })
    }
}

fn is_catch_all(nodes: &NodeStore, pattern_node: NodeId) -> bool {
    match nodes.get(pattern_node).kind {
        NodeKind::WildcardPattern | NodeKind::BindingPattern => true,
        NodeKind::OrPattern => nodes.children(pattern_node).iter().any(|n| is_catch_all(nodes, *n)),
        _ => false,
    }
}

/// Walks a (possibly `Unary`-negated) integer literal pattern down to its
/// signed value; mirrors the checker's own `signed_int_literal`, since the
/// SemIR doesn't re-encode a match arm's literal value, only its node.
fn signed_int_literal(nodes: &NodeStore, tokens: &TokenStore, node_id: NodeId) -> i64 {
    match nodes.get(node_id).kind {
        NodeKind::Unary => -signed_int_literal(nodes, tokens, nodes.children(node_id)[0]),
        NodeKind::IntLiteral => match tokens.token(nodes.get(node_id).token_id) {
            Token::Int(v) => *v,
            _ => 0,
        },
        _ => 0,
    }
}

fn binary_instruction(ty: ValType, op: &Token) -> Result<Instruction<'static>> {
    use Instruction::*;
    use Token::*;
    Ok(match (ty, op) {
        (ValType::I32, Plus) => I32Add,
        (ValType::I32, Minus) => I32Sub,
        (ValType::I32, Star) => I32Mul,
        (ValType::I32, Slash) => I32DivS,
        (ValType::I32, Percent) => I32RemS,
        (ValType::I32, Amp) => I32And,
        (ValType::I32, Pipe) => I32Or,
        (ValType::I32, Caret) => I32Xor,
        (ValType::I32, Shl) => I32Shl,
        (ValType::I32, Shr) => I32ShrS,
        (ValType::I32, Shr3) => I32ShrU,
        (ValType::I32, Lt) => I32LtS,
        (ValType::I32, Le) => I32LeS,
        (ValType::I32, Gt) => I32GtS,
        (ValType::I32, Ge) => I32GeS,
        (ValType::I32, EqEq) => I32Eq,
        (ValType::I32, Ne) => I32Ne,
        (ValType::I64, Plus) => I64Add,
        (ValType::I64, Minus) => I64Sub,
        (ValType::I64, Star) => I64Mul,
        (ValType::I64, Slash) => I64DivS,
        (ValType::I64, Percent) => I64RemS,
        (ValType::I64, Amp) => I64And,
        (ValType::I64, Pipe) => I64Or,
        (ValType::I64, Caret) => I64Xor,
        (ValType::I64, Shl) => I64Shl,
        (ValType::I64, Shr) => I64ShrS,
        (ValType::I64, Shr3) => I64ShrU,
        (ValType::I64, Lt) => I64LtS,
        (ValType::I64, Le) => I64LeS,
        (ValType::I64, Gt) => I64GtS,
        (ValType::I64, Ge) => I64GeS,
        (ValType::I64, EqEq) => I64Eq,
        (ValType::I64, Ne) => I64Ne,
        (ValType::F32, Plus) => F32Add,
        (ValType::F32, Minus) => F32Sub,
        (ValType::F32, Star) => F32Mul,
        (ValType::F32, Slash) => F32Div,
        (ValType::F32, Lt) => F32Lt,
        (ValType::F32, Le) => F32Le,
        (ValType::F32, Gt) => F32Gt,
        (ValType::F32, Ge) => F32Ge,
        (ValType::F32, EqEq) => F32Eq,
        (ValType::F32, Ne) => F32Ne,
        (ValType::F64, Plus) => F64Add,
        (ValType::F64, Minus) => F64Sub,
        (ValType::F64, Star) => F64Mul,
        (ValType::F64, Slash) => F64Div,
        (ValType::F64, Lt) => F64Lt,
        (ValType::F64, Le) => F64Le,
        (ValType::F64, Gt) => F64Gt,
        (ValType::F64, Ge) => F64Ge,
        (ValType::F64, EqEq) => F64Eq,
        (ValType::F64, Ne) => F64Ne,
        (ty, op) => return Err(CodeGenError::UnsupportedOperator(format!("{op:?} on {ty:?}"))),
    })
}
