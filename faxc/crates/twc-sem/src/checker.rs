//! The checker: one controlled walk over the parse tree that builds the
//! [`TypeStore`], [`SymbolTable`], [`InstStore`] (the SemIR), and the
//! [`FloatStore`], emitting diagnostics for every rule violated along the
//! way. Grounded on the teacher's `analysis.rs` `SemanticAnalyzer` shape (one
//! struct owning every output, one method per syntactic construct) with its
//! Rust-specific borrow/trait/generic machinery dropped — this language has
//! none of that.

use crate::float_store::{FloatId, FloatStore};
use crate::inst_store::{InstId, InstKind, InstStore};
use crate::symbol_table::SymbolTable;
use crate::type_store::{self, TypeId, TypeKind, TypeStore};
use twc_lex::Token;
use twc_par::{NodeId, NodeKind, NodeStore, TokenStore};
use twc_util::{DiagnosticBuilder, DiagnosticCode, FxHashSet, Handler, Idx, Span, Symbol};

pub struct CheckResult {
    pub types: TypeStore,
    pub symbols: SymbolTable,
    pub insts: InstStore,
    pub floats: FloatStore,
    pub succeeded: bool,
}

pub fn check(nodes: &NodeStore, tokens: &TokenStore, handler: &mut Handler) -> CheckResult {
    let mut checker = Checker {
        nodes,
        tokens,
        handler,
        types: TypeStore::new(),
        symbols: SymbolTable::new(),
        insts: InstStore::new(),
        floats: FloatStore::new(),
        declaring: Vec::new(),
        succeeded: true,
    };
    let Some(root) = nodes.root() else {
        return checker.finish();
    };
    let mut unreachable_seen = false;
    for stmt in nodes.children(root) {
        if unreachable_seen {
            checker.warn(DiagnosticCode::TWCHECK050, stmt);
        }
        match nodes.get(stmt).kind {
            NodeKind::TypeDecl => checker.check_type_decl(stmt),
            NodeKind::Binding => checker.check_binding(stmt),
            NodeKind::PanicStmt => {
                checker.insts.push(InstKind::Unreachable, type_store::INVALID, stmt, 0, 0);
                unreachable_seen = true;
            },
            _ => {},
        }
    }
    checker.finish()
}

struct Checker<'c> {
    nodes: &'c NodeStore,
    tokens: &'c TokenStore,
    handler: &'c mut Handler,
    types: TypeStore,
    symbols: SymbolTable,
    insts: InstStore,
    floats: FloatStore,
    /// Names of record types whose field list is currently being resolved,
    /// so a field typed with the declaration's own name is recognized as
    /// direct recursion instead of an ordinary (impossible) forward lookup.
    declaring: Vec<Symbol>,
    succeeded: bool,
}

impl<'c> Checker<'c> {
    fn finish(self) -> CheckResult {
        CheckResult {
            types: self.types,
            symbols: self.symbols,
            insts: self.insts,
            floats: self.floats,
            succeeded: self.succeeded,
        }
    }

    fn diag(&mut self, code: DiagnosticCode, node_id: NodeId) {
        self.diag_with(code, node_id, message_for(code).to_string());
    }

    /// Like [`Checker::diag`], but with a caller-supplied message carrying
    /// the concrete value/bound/field name the generic catalog text can't.
    fn diag_with(&mut self, code: DiagnosticCode, node_id: NodeId, message: String) {
        let token = self.nodes.get(node_id).token_id;
        let stored = self.tokens.get(token);
        let span = Span::point(stored.line, stored.column);
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
        self.succeeded = false;
    }

    fn warn(&mut self, code: DiagnosticCode, node_id: NodeId) {
        let token = self.nodes.get(node_id).token_id;
        let stored = self.tokens.get(token);
        let span = Span::point(stored.line, stored.column);
        DiagnosticBuilder::warning(message_for(code)).code(code).span(span).emit(self.handler);
    }

    fn ident_symbol(&self, token_id: twc_par::TokenId) -> Symbol {
        match self.tokens.token(token_id) {
            Token::Ident(sym) => *sym,
            _ => Symbol::intern(""),
        }
    }

    fn int_literal_value(&self, node_id: NodeId) -> i64 {
        match self.tokens.token(self.nodes.get(node_id).token_id) {
            Token::Int(v) => *v,
            _ => 0,
        }
    }

    fn float_literal_value(&self, node_id: NodeId) -> f64 {
        match self.tokens.token(self.nodes.get(node_id).token_id) {
            Token::Float(v) => *v,
            _ => 0.0,
        }
    }

    fn signed_int_literal(&self, node_id: NodeId) -> i64 {
        match self.nodes.get(node_id).kind {
            NodeKind::Unary => -self.signed_int_literal(self.nodes.children(node_id)[0]),
            NodeKind::IntLiteral => self.int_literal_value(node_id),
            _ => 0,
        }
    }

    fn invalid_inst(&mut self, node_id: NodeId) -> InstId {
        self.insts.push(InstKind::IntConst, type_store::INVALID, node_id, 0, 0)
    }

    // -- type annotations ----------------------------------------------

    fn read_hint(&self, hint_node: NodeId) -> (Symbol, i64) {
        let key = self.ident_symbol(self.nodes.get(hint_node).token_id);
        let value_node = self.nodes.children(hint_node)[0];
        (key, self.signed_int_literal(value_node))
    }

    fn resolve_type_node(&mut self, node_id: NodeId) -> TypeId {
        match self.nodes.get(node_id).kind {
            NodeKind::TypeName => match self.tokens.token(self.nodes.get(node_id).token_id).clone() {
                Token::KwI32 => type_store::I32,
                Token::KwI64 => type_store::I64,
                Token::KwF32 => type_store::F32,
                Token::KwF64 => type_store::F64,
                Token::Ident(sym) => {
                    if self.declaring.contains(&sym) {
                        self.diag(DiagnosticCode::TWCHECK032, node_id);
                        return type_store::INVALID;
                    }
                    match self.types.lookup_name(sym) {
                        Some(id) => id,
                        None => {
                            self.diag(DiagnosticCode::TWCHECK010, node_id);
                            type_store::INVALID
                        },
                    }
                },
                _ => type_store::INVALID,
            },
            NodeKind::HintedType => {
                let kids = self.nodes.children(node_id);
                let base = self.resolve_type_node(kids[0]);
                if !self.types.is_integer(base) {
                    self.diag(DiagnosticCode::TWCHECK040, node_id);
                    return type_store::INVALID;
                }
                let mut min = None;
                let mut max = None;
                for hint_node in &kids[1..] {
                    let (key, value) = self.read_hint(*hint_node);
                    if key == twc_util::symbol::ID_MIN {
                        min = Some(value);
                    } else if key == twc_util::symbol::ID_MAX {
                        max = Some(value);
                    }
                }
                self.types.intern_refined(base, min, max)
            },
            NodeKind::ListType => {
                let kids = self.nodes.children(node_id);
                let elem = self.resolve_type_node(kids[0]);
                let (_, size) = self.read_hint(kids[1]);
                if size <= 0 {
                    self.diag(DiagnosticCode::TWCHECK036, node_id);
                    return type_store::INVALID;
                }
                self.types.intern_list(elem, size as u32)
            },
            _ => type_store::INVALID,
        }
    }

    // -- type declarations ----------------------------------------------

    fn check_type_decl(&mut self, node_id: NodeId) {
        let name = self.ident_symbol(self.nodes.get(node_id).token_id);
        let field_decls = self.nodes.children(node_id);
        // A redeclaration of the same name isn't in the diagnostic catalog;
        // `begin_record` returning false just means `finish_record` below
        // overwrites the existing entry's fields instead of registering a
        // new one (no dedicated duplicate-type-name code exists to emit).
        self.types.begin_record(name);
        self.declaring.push(name);
        let mut fields = Vec::new();
        let mut seen = FxHashSet::default();
        for field_node in field_decls {
            let field_name = self.ident_symbol(self.nodes.get(field_node).token_id);
            let type_node = self.nodes.children(field_node)[0];
            let field_type = self.resolve_type_node(type_node);
            if !seen.insert(field_name) {
                self.diag(DiagnosticCode::TWCHECK026, field_node);
                continue;
            }
            fields.push((field_name, field_type));
        }
        self.declaring.pop();
        self.types.finish_record(name, fields);
    }

    // -- bindings ---------------------------------------------------------

    fn check_binding(&mut self, node_id: NodeId) {
        let name = self.ident_symbol(self.nodes.get(node_id).token_id);
        let children = self.nodes.children(node_id);
        let declared_type = self.resolve_type_node(children[0]);
        let mut leaf_values: Vec<(String, InstId)> = Vec::new();

        match self.types.get(declared_type).clone() {
            TypeKind::Record { .. } => {
                let field_nodes: Vec<NodeId> = match children.get(1) {
                    Some(&n) if matches!(self.nodes.get(n).kind, NodeKind::FieldAssign) => children[1..].to_vec(),
                    Some(&n) if matches!(self.nodes.get(n).kind, NodeKind::RecordLiteral) => self.nodes.children(n),
                    Some(&n) => {
                        self.check_expr(n);
                        Vec::new()
                    },
                    None => Vec::new(),
                };
                self.collect_record_fields(node_id, String::new(), declared_type, &field_nodes, &mut leaf_values);
            },
            TypeKind::List { elem, size } => {
                if let Some(&list_node) = children.get(1) {
                    if matches!(self.nodes.get(list_node).kind, NodeKind::ListLiteral) {
                        let elems = self.nodes.children(list_node);
                        if elems.len() as u32 != size {
                            self.diag_with(
                                DiagnosticCode::TWCHECK037,
                                list_node,
                                format!(
                                    "list literal length does not match its declared size (expected={size}, actual={})",
                                    elems.len()
                                ),
                            );
                        }
                        for (i, elem_node) in elems.iter().enumerate() {
                            let (inst, _) = self.check_expr(*elem_node);
                            self.check_literal_target(elem, *elem_node, inst);
                            leaf_values.push((format!("[{i}]"), inst));
                        }
                    } else {
                        self.check_expr(list_node);
                    }
                }
            },
            _ => {
                if let Some(&expr_node) = children.get(1) {
                    let (inst, _) = self.check_expr(expr_node);
                    self.check_literal_target(declared_type, expr_node, inst);
                    leaf_values.push((String::new(), inst));
                }
            },
        }

        self.symbols.declare(name, declared_type, &self.types);
        for (suffix, inst) in leaf_values {
            let path = Symbol::intern(&format!("{}{}", name.as_str(), suffix));
            if let Some(local_id) = self.symbols.local_of(path) {
                let slot = self.symbols.slot(local_id);
                self.insts.push(InstKind::Bind, slot.type_id, node_id, local_id.index() as u32, inst.index() as u32);
            }
        }
    }

    /// Matches `field_nodes` (either `FieldInit` children of a parenthesized
    /// `RecordLiteral`, or `FieldAssign` lines of a binding's indented
    /// record-field block — both shapes are `name` + one value-expression
    /// child) against `record_type`'s declared fields, recursing through
    /// nested records and accumulating `(leaf_suffix, value_inst)` pairs for
    /// the caller to bind once the root name's locals exist.
    fn collect_record_fields(
        &mut self,
        anchor: NodeId,
        prefix: String,
        record_type: TypeId,
        field_nodes: &[NodeId],
        out: &mut Vec<(String, InstId)>,
    ) {
        let fields = match self.types.get(record_type).clone() {
            TypeKind::Record { fields, .. } => fields,
            _ => return,
        };
        let mut seen = FxHashSet::default();
        for &field_node in field_nodes {
            let field_name = self.ident_symbol(self.nodes.get(field_node).token_id);
            let Some(field_type) = fields.iter().find(|(n, _)| *n == field_name).map(|(_, t)| *t) else {
                self.diag_with(
                    DiagnosticCode::TWCHECK028,
                    field_node,
                    format!("record initializer names an unknown field `{}`", field_name.as_str()),
                );
                continue;
            };
            if !seen.insert(field_name) {
                self.diag(DiagnosticCode::TWCHECK029, field_node);
                continue;
            }
            let value_node = self.nodes.children(field_node)[0];
            let suffix = format!("{prefix}.{}", field_name.as_str());
            match self.types.get(field_type).clone() {
                TypeKind::Record { name: nested_name, .. } => {
                    if !matches!(self.nodes.get(value_node).kind, NodeKind::RecordLiteral)
                        || self.ident_symbol(self.nodes.get(value_node).token_id) != nested_name
                    {
                        self.diag(DiagnosticCode::TWCHECK033, value_node);
                        continue;
                    }
                    let nested_fields = self.nodes.children(value_node);
                    self.collect_record_fields(value_node, suffix, field_type, &nested_fields, out);
                },
                _ => {
                    let (inst, _) = self.check_expr(value_node);
                    self.check_literal_target(field_type, value_node, inst);
                    out.push((suffix, inst));
                },
            }
        }
        for (field_name, _) in &fields {
            if !seen.contains(field_name) {
                self.diag(DiagnosticCode::TWCHECK027, anchor);
            }
        }
    }

    /// Re-resolves a literal's representation against the type it's bound
    /// or assigned to: widens/validates `IntConst`/`FloatConst` encoding in
    /// place and checks refinement bounds. Non-literal initializers aren't
    /// re-checked here — no assignability code beyond this exists in the
    /// catalog for them.
    fn check_literal_target(&mut self, expected_type: TypeId, value_node: NodeId, value_inst: InstId) {
        let base = self.types.base_of(expected_type);
        match self.insts.get(value_inst).kind {
            InstKind::IntConst => {
                let raw = self.inst_int_value(value_inst);
                match self.types.get(base) {
                    TypeKind::I32 => {
                        if raw < i32::MIN as i64 || raw > i32::MAX as i64 {
                            self.diag_with(
                                DiagnosticCode::TWCHECK014,
                                value_node,
                                format!("integer literal out of range for i32 (value={raw})"),
                            );
                            return;
                        }
                        self.insts.set_args(value_inst, base, raw as u32, 0);
                    },
                    TypeKind::I64 => {
                        let bits = raw as u64;
                        self.insts.set_args(value_inst, base, (bits & 0xFFFF_FFFF) as u32, (bits >> 32) as u32);
                    },
                    _ => {},
                }
                if let TypeKind::Refined { min, max, .. } = self.types.get(expected_type).clone() {
                    if let Some(min) = min {
                        if raw < min {
                            self.diag_with(
                                DiagnosticCode::TWCHECK041,
                                value_node,
                                format!("value violates a refined type's bound (constraint=min={min}, value={raw})"),
                            );
                        }
                    }
                    if let Some(max) = max {
                        if raw > max {
                            self.diag_with(
                                DiagnosticCode::TWCHECK041,
                                value_node,
                                format!("value violates a refined type's bound (constraint=max={max}, value={raw})"),
                            );
                        }
                    }
                }
            },
            InstKind::FloatConst if matches!(self.types.get(base), TypeKind::F32) => {
                let bits_idx = self.insts.get(value_inst).arg0 as usize;
                let v = self.floats.get(FloatId::from_usize(bits_idx));
                if v.is_finite() && (v as f32).is_infinite() {
                    self.diag_with(
                        DiagnosticCode::TWCHECK017,
                        value_node,
                        format!("float literal out of range for f32 (value={v})"),
                    );
                }
                self.insts.retype(value_inst, base);
            },
            _ => {},
        }
    }

    fn inst_int_value(&self, id: InstId) -> i64 {
        let inst = self.insts.get(id);
        match self.types.get(inst.type_id) {
            TypeKind::I64 => (((inst.arg1 as u64) << 32) | inst.arg0 as u64) as i64,
            _ => inst.arg0 as i32 as i64,
        }
    }

    // -- name resolution for field/index access chains --------------------

    /// Walks a `VarRef`/`FieldAccess`/`IndexAccess` chain down to a known
    /// binding, reconstructing the flattened leaf path (`p.x`, `arr[0]`) and
    /// its type, validating each hop. Only constant indices are supported.
    fn resolve_path(&mut self, node_id: NodeId) -> Option<(String, TypeId)> {
        match self.nodes.get(node_id).kind {
            NodeKind::VarRef => {
                let name = self.ident_symbol(self.nodes.get(node_id).token_id);
                if !self.symbols.is_defined(name) {
                    self.diag(DiagnosticCode::TWCHECK013, node_id);
                    return None;
                }
                Some((name.as_str().to_string(), self.symbols.type_of(name).unwrap()))
            },
            NodeKind::FieldAccess => {
                let base = self.nodes.children(node_id)[0];
                let (base_path, base_type) = self.resolve_path(base)?;
                let field_name = self.ident_symbol(self.nodes.get(node_id).token_id);
                match self.types.get(base_type).clone() {
                    TypeKind::Record { fields, .. } => match fields.iter().find(|(n, _)| *n == field_name) {
                        Some((_, field_type)) => Some((format!("{base_path}.{}", field_name.as_str()), *field_type)),
                        None => {
                            self.diag_with(
                                DiagnosticCode::TWCHECK030,
                                node_id,
                                format!("field access names an unknown field `{}`", field_name.as_str()),
                            );
                            None
                        },
                    },
                    _ => {
                        self.diag(DiagnosticCode::TWCHECK031, node_id);
                        None
                    },
                }
            },
            NodeKind::IndexAccess => {
                let kids = self.nodes.children(node_id);
                let (base_path, base_type) = self.resolve_path(kids[0])?;
                match self.types.get(base_type).clone() {
                    TypeKind::List { elem, size } => {
                        let index_node = kids[1];
                        if !matches!(self.nodes.get(index_node).kind, NodeKind::IntLiteral) {
                            self.diag(DiagnosticCode::TWCHECK035, index_node);
                            return None;
                        }
                        let idx = self.signed_int_literal(index_node);
                        if idx < 0 || idx as u32 >= size {
                            self.diag(DiagnosticCode::TWCHECK034, index_node);
                            return None;
                        }
                        Some((format!("{base_path}[{idx}]"), elem))
                    },
                    _ => {
                        self.diag(DiagnosticCode::TWCHECK031, node_id);
                        None
                    },
                }
            },
            _ => None,
        }
    }

    // -- expressions --------------------------------------------------------

    fn check_expr(&mut self, node_id: NodeId) -> (InstId, TypeId) {
        match self.nodes.get(node_id).kind {
            NodeKind::IntLiteral => {
                let v = self.int_literal_value(node_id);
                self.emit_int_const(v, node_id)
            },
            NodeKind::FloatLiteral => {
                let v = self.float_literal_value(node_id);
                self.emit_float_const(v, node_id)
            },
            NodeKind::VarRef | NodeKind::FieldAccess | NodeKind::IndexAccess => {
                match self.resolve_path(node_id) {
                    Some((path, ty)) => match self.symbols.local_of(Symbol::intern(&path)) {
                        Some(local_id) => {
                            let inst =
                                self.insts.push(InstKind::VarRef, ty, node_id, local_id.index() as u32, 0);
                            (inst, ty)
                        },
                        None => (self.invalid_inst(node_id), ty),
                    },
                    None => (self.invalid_inst(node_id), type_store::INVALID),
                }
            },
            NodeKind::Unary => self.check_unary(node_id),
            NodeKind::Binary => {
                let token = self.tokens.token(self.nodes.get(node_id).token_id).clone();
                if is_comparison(&token) {
                    self.check_comparison_chain(node_id)
                } else {
                    self.check_plain_binary(node_id, token)
                }
            },
            NodeKind::MatchExpr => self.check_match(node_id),
            NodeKind::RecordLiteral | NodeKind::ListLiteral => {
                self.diag(DiagnosticCode::TWCHECK012, node_id);
                (self.invalid_inst(node_id), type_store::INVALID)
            },
            _ => (self.invalid_inst(node_id), type_store::INVALID),
        }
    }

    fn emit_int_const(&mut self, value: i64, node_id: NodeId) -> (InstId, TypeId) {
        if (i32::MIN as i64..=i32::MAX as i64).contains(&value) {
            let inst = self.insts.push(InstKind::IntConst, type_store::I32, node_id, value as u32, 0);
            (inst, type_store::I32)
        } else {
            let bits = value as u64;
            let inst = self.insts.push(
                InstKind::IntConst,
                type_store::I64,
                node_id,
                (bits & 0xFFFF_FFFF) as u32,
                (bits >> 32) as u32,
            );
            (inst, type_store::I64)
        }
    }

    fn emit_float_const(&mut self, value: f64, node_id: NodeId) -> (InstId, TypeId) {
        let id = self.floats.intern(value);
        let inst = self.insts.push(InstKind::FloatConst, type_store::F64, node_id, id.index() as u32, 0);
        (inst, type_store::F64)
    }

    fn check_unary(&mut self, node_id: NodeId) -> (InstId, TypeId) {
        let token = self.tokens.token(self.nodes.get(node_id).token_id).clone();
        let operand_node = self.nodes.children(node_id)[0];
        match token {
            Token::Minus => match self.nodes.get(operand_node).kind {
                NodeKind::IntLiteral => {
                    let v = self.int_literal_value(operand_node);
                    self.emit_int_const(-v, node_id)
                },
                NodeKind::FloatLiteral => {
                    let v = self.float_literal_value(operand_node);
                    self.emit_float_const(-v, node_id)
                },
                _ => {
                    self.diag(DiagnosticCode::TWCHECK015, node_id);
                    (self.invalid_inst(node_id), type_store::INVALID)
                },
            },
            Token::Tilde | Token::Bang => {
                let (operand_inst, operand_type) = self.check_expr(operand_node);
                if !self.types.is_integer(operand_type) {
                    self.diag(DiagnosticCode::TWCHECK021, node_id);
                }
                let inst =
                    self.insts.push(InstKind::BitwiseNot, operand_type, node_id, operand_inst.index() as u32, 0);
                (inst, operand_type)
            },
            _ => (self.invalid_inst(node_id), type_store::INVALID),
        }
    }

    fn is_literal_zero(&self, node_id: NodeId) -> bool {
        match self.nodes.get(node_id).kind {
            NodeKind::IntLiteral => self.int_literal_value(node_id) == 0,
            NodeKind::FloatLiteral => self.float_literal_value(node_id) == 0.0,
            NodeKind::Unary => self.is_literal_zero(self.nodes.children(node_id)[0]),
            _ => false,
        }
    }

    fn check_plain_binary(&mut self, node_id: NodeId, token: Token) -> (InstId, TypeId) {
        let kids = self.nodes.children(node_id);
        let (linst, ltype) = self.check_expr(kids[0]);
        let (rinst, rtype) = self.check_expr(kids[1]);
        if !self.types.same_erased(ltype, rtype) {
            self.diag(DiagnosticCode::TWCHECK022, node_id);
        }
        let result_type = self.types.base_of(ltype);
        match token {
            Token::AmpAmp | Token::PipePipe => {
                if !self.types.is_integer(ltype) || !self.types.is_integer(rtype) {
                    self.diag(DiagnosticCode::TWCHECK024, node_id);
                }
                let kind = if matches!(token, Token::AmpAmp) { InstKind::LogicalAnd } else { InstKind::LogicalOr };
                let inst = self.insts.push(kind, type_store::I32, node_id, linst.index() as u32, rinst.index() as u32);
                (inst, type_store::I32)
            },
            Token::Percent | Token::PercentPercent | Token::Amp | Token::Pipe | Token::Caret | Token::Shl
            | Token::Shr | Token::Shr3 => {
                if !self.types.is_integer(ltype) || !self.types.is_integer(rtype) {
                    self.diag(DiagnosticCode::TWCHECK021, node_id);
                }
                let inst = self.insts.push(
                    InstKind::BinaryOp,
                    result_type,
                    node_id,
                    linst.index() as u32,
                    rinst.index() as u32,
                );
                (inst, result_type)
            },
            Token::Slash => {
                if self.is_literal_zero(kids[1]) {
                    self.diag(DiagnosticCode::TWCHECK025, node_id);
                }
                let inst = self.insts.push(
                    InstKind::BinaryOp,
                    result_type,
                    node_id,
                    linst.index() as u32,
                    rinst.index() as u32,
                );
                (inst, result_type)
            },
            _ => {
                let inst = self.insts.push(
                    InstKind::BinaryOp,
                    result_type,
                    node_id,
                    linst.index() as u32,
                    rinst.index() as u32,
                );
                (inst, result_type)
            },
        }
    }

    /// `a < b < c` parses as a left-leaning run of comparison `Binary`
    /// nodes (same binding power folds left); this reads that run back out
    /// as the flat operand/operator sequence it actually means — pairwise
    /// `AND` of adjacent comparisons — rather than re-comparing one
    /// comparison's result against the next operand.
    fn flatten_comparison_chain(&self, node_id: NodeId) -> (Vec<NodeId>, Vec<(Token, NodeId)>) {
        let kids = self.nodes.children(node_id);
        let left = kids[0];
        let right = kids[1];
        let op_tok = self.tokens.token(self.nodes.get(node_id).token_id).clone();
        if matches!(self.nodes.get(left).kind, NodeKind::Binary)
            && is_comparison(self.tokens.token(self.nodes.get(left).token_id))
        {
            let (mut operands, mut ops) = self.flatten_comparison_chain(left);
            operands.push(right);
            ops.push((op_tok, node_id));
            (operands, ops)
        } else {
            (vec![left, right], vec![(op_tok, node_id)])
        }
    }

    fn check_comparison_chain(&mut self, node_id: NodeId) -> (InstId, TypeId) {
        let (operands, ops) = self.flatten_comparison_chain(node_id);
        if ops.len() > 1 {
            for (op, op_node) in &ops {
                if matches!(op, Token::Ne) {
                    self.diag(DiagnosticCode::TWCHECK023, *op_node);
                }
            }
        }
        let checked: Vec<(InstId, TypeId)> = operands.iter().map(|n| self.check_expr(*n)).collect();
        let mut pairwise = Vec::with_capacity(ops.len());
        for (i, (_, op_node)) in ops.iter().enumerate() {
            let (linst, ltype) = checked[i];
            let (rinst, rtype) = checked[i + 1];
            if !self.types.same_erased(ltype, rtype) {
                self.diag(DiagnosticCode::TWCHECK022, *op_node);
            }
            let inst =
                self.insts.push(InstKind::BinaryOp, type_store::I32, *op_node, linst.index() as u32, rinst.index() as u32);
            pairwise.push(inst);
        }
        let mut result = pairwise[0];
        for next in &pairwise[1..] {
            result = self.insts.push(InstKind::LogicalAnd, type_store::I32, node_id, result.index() as u32, next.index() as u32);
        }
        (result, type_store::I32)
    }

    // -- match --------------------------------------------------------------

    fn is_catch_all_pattern(&self, pattern_node: NodeId) -> bool {
        match self.nodes.get(pattern_node).kind {
            NodeKind::WildcardPattern | NodeKind::BindingPattern => true,
            NodeKind::OrPattern => {
                self.nodes.children(pattern_node).iter().any(|n| self.is_catch_all_pattern(*n))
            },
            _ => false,
        }
    }

    fn check_pattern(&mut self, pattern_node: NodeId, scrutinee_type: TypeId) {
        match self.nodes.get(pattern_node).kind {
            NodeKind::WildcardPattern => {},
            NodeKind::LiteralPattern => {
                if !self.types.is_integer(scrutinee_type) {
                    self.diag(DiagnosticCode::TWCHECK018, pattern_node);
                }
            },
            NodeKind::BindingPattern => self.diag(DiagnosticCode::TWCHECK013, pattern_node),
            NodeKind::OrPattern => {
                for alt in self.nodes.children(pattern_node) {
                    self.check_pattern(alt, scrutinee_type);
                }
            },
            _ => {},
        }
    }

    fn check_match(&mut self, node_id: NodeId) -> (InstId, TypeId) {
        let kids = self.nodes.children(node_id);
        let scrutinee_node = kids[0];
        let arm_nodes = &kids[1..];
        let (scrutinee_inst, scrutinee_type) = self.check_expr(scrutinee_node);

        let mut arm_bodies = Vec::with_capacity(arm_nodes.len());
        let mut result_type = type_store::INVALID;
        for (i, &arm_node) in arm_nodes.iter().enumerate() {
            let arm_kids = self.nodes.children(arm_node);
            let pattern_node = arm_kids[0];
            let body_node = arm_kids[1];
            self.check_pattern(pattern_node, scrutinee_type);
            if i + 1 == arm_nodes.len() && !self.is_catch_all_pattern(pattern_node) {
                self.diag(DiagnosticCode::TWCHECK020, node_id);
            }
            let (body_inst, body_type) = self.check_expr(body_node);
            if i == 0 {
                result_type = body_type;
            }
            arm_bodies.push((pattern_node, body_inst, body_type));
        }
        // Pushed as one contiguous block, immediately before `Match`: the
        // arm bodies above may have pushed any number of their own
        // sub-instructions, but none of that interleaves with the
        // `MatchArm` markers themselves.
        for (pattern_node, body_inst, body_type) in arm_bodies {
            self.insts.push(InstKind::MatchArm, body_type, pattern_node, body_inst.index() as u32, 0);
        }
        let match_inst = self.insts.push(
            InstKind::Match,
            result_type,
            node_id,
            scrutinee_inst.index() as u32,
            arm_nodes.len() as u32,
        );
        (match_inst, result_type)
    }
}

fn is_comparison(token: &Token) -> bool {
    matches!(token, Token::Lt | Token::Le | Token::Gt | Token::Ge | Token::EqEq | Token::Ne)
}

fn message_for(code: DiagnosticCode) -> &'static str {
    match code {
        DiagnosticCode::TWCHECK010 => "reference to an undefined user type",
        DiagnosticCode::TWCHECK012 => "unsupported nested aggregate literal",
        DiagnosticCode::TWCHECK013 => "use of an identifier before its binding",
        DiagnosticCode::TWCHECK014 => "integer literal out of range for its target type",
        DiagnosticCode::TWCHECK015 => "unary negation applied to a non-literal operand",
        DiagnosticCode::TWCHECK017 => "float literal out of range for its target type",
        DiagnosticCode::TWCHECK018 => "non-integer pattern matched against an integer scrutinee",
        DiagnosticCode::TWCHECK020 => "match expression missing a trailing catch-all arm",
        DiagnosticCode::TWCHECK021 => "integer-only operator applied to a float operand",
        DiagnosticCode::TWCHECK022 => "binary operator operands have different types",
        DiagnosticCode::TWCHECK023 => "ambiguous `!=` inside a chained comparison",
        DiagnosticCode::TWCHECK024 => "logical operator applied to a non-integer operand",
        DiagnosticCode::TWCHECK025 => "division by a literal zero",
        DiagnosticCode::TWCHECK026 => "duplicate field name in a record type declaration",
        DiagnosticCode::TWCHECK027 => "record initializer missing a declared field",
        DiagnosticCode::TWCHECK028 => "record initializer names an unknown field",
        DiagnosticCode::TWCHECK029 => "record initializer initializes a field twice",
        DiagnosticCode::TWCHECK030 => "field access names an unknown field",
        DiagnosticCode::TWCHECK031 => "field or index access on a non-aggregate value",
        DiagnosticCode::TWCHECK032 => "recursive record type detected",
        DiagnosticCode::TWCHECK033 => "nested record initializer names the wrong record type",
        DiagnosticCode::TWCHECK034 => "constant list index out of bounds",
        DiagnosticCode::TWCHECK035 => "non-constant list index (unsupported)",
        DiagnosticCode::TWCHECK036 => "list `size` hint is not a positive integer",
        DiagnosticCode::TWCHECK037 => "list literal length does not match its declared size",
        DiagnosticCode::TWCHECK040 => "refinement hint applied to a non-integer base type",
        DiagnosticCode::TWCHECK041 => "value violates a refined type's min/max bound",
        DiagnosticCode::TWCHECK050 => "statement is unreachable after a `panic`",
        _ => "semantic error",
    }
}
