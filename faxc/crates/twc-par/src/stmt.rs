//! Top-level statement dispatch - panic, type declarations, bindings.

use crate::ast::NodeKind;
use crate::Parser;
use twc_lex::Token;

impl<'p> Parser<'p> {
    pub(crate) fn parse_statement(&mut self) -> bool {
        match self.current_token() {
            Token::KwPanic => self.parse_panic_stmt(),
            Token::KwType => self.parse_type_decl(),
            Token::Ident(_) => self.parse_binding(),
            _ => {
                self.error("expected `panic`, `type`, or a binding");
                false
            },
        }
    }

    fn parse_panic_stmt(&mut self) -> bool {
        let mark = self.nodes_mark();
        let tok = self.bump(); // "panic"
        self.push_node(NodeKind::PanicStmt, tok, mark);
        true
    }

    /// `ident ":" TypeAnnotation "=" (Expression | RecordFieldBlock)`
    ///
    /// Covers what the surface grammar calls `PrimitiveBinding`,
    /// `ListBinding`, and `MatchBinding` alike: an ordinary expression
    /// initializer on the same line as `=`, one production shared here and
    /// told apart later by the type the initializer resolves to, not by the
    /// parser. `RecordBinding` alone has genuinely distinct concrete syntax
    /// — no expression follows `=` on that line; instead an indented block
    /// of `name ":" Expression` field assignments does, e.g.:
    /// ```text
    /// p: Point =
    ///     x: 5
    ///     y: 10
    /// ```
    /// A record can still be built inline anywhere an expression is
    /// expected via the parenthesized `RecordLiteral` primary, so this
    /// block form is sugar only for the direct-binding position.
    fn parse_binding(&mut self) -> bool {
        let mark = self.nodes_mark();
        let name_tok = self.bump(); // ident
        if self.expect(Token::Colon).is_none() {
            return false;
        }
        if !self.parse_type_annotation() {
            return false;
        }
        if self.expect(Token::Equals).is_none() {
            return false;
        }
        if matches!(self.current_token(), Token::Newline) {
            if !self.parse_record_field_block() {
                return false;
            }
        } else if !self.parse_expr() {
            return false;
        }
        self.push_node(NodeKind::Binding, name_tok, mark);
        true
    }

    /// `Newline Indent (ident ":" Expression)+ Dedent`
    fn parse_record_field_block(&mut self) -> bool {
        self.bump(); // Newline
        if !matches!(self.current_token(), Token::Indent(_)) {
            self.error("expected an indented block of field assignments");
            return false;
        }
        self.bump();
        loop {
            self.skip_newlines();
            if matches!(self.current_token(), Token::Dedent(_)) {
                break;
            }
            if !self.parse_field_assign() {
                return false;
            }
        }
        self.bump(); // Dedent
        true
    }

    /// `ident ":" Expression`
    fn parse_field_assign(&mut self) -> bool {
        let mark = self.nodes_mark();
        let field_tok = match self.current_token() {
            Token::Ident(_) => self.bump(),
            _ => {
                self.error("expected a field name");
                return false;
            },
        };
        if self.expect(Token::Colon).is_none() {
            return false;
        }
        if !self.parse_expr() {
            return false;
        }
        self.push_node(NodeKind::FieldAssign, field_tok, mark);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::Parser;
    use twc_util::Handler;

    fn parse_stmt(source: &str) -> (bool, crate::ast::NodeStore) {
        let mut handler = Handler::new();
        let tokens = crate::TokenStore::lex(source, &mut handler);
        let mut parser = Parser::new(&tokens, &mut handler);
        let ok = parser.parse_statement();
        (ok, parser.nodes)
    }

    #[test]
    fn panic_statement_is_a_bare_leaf() {
        let (ok, nodes) = parse_stmt("panic");
        assert!(ok);
        assert_eq!(nodes.get(nodes.root().unwrap()).kind, NodeKind::PanicStmt);
    }

    #[test]
    fn primitive_binding_wraps_its_type_and_initializer() {
        let (ok, nodes) = parse_stmt("x: i32 = 42");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::Binding);
        let children = nodes.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(nodes.get(children[0]).kind, NodeKind::TypeName);
        assert_eq!(nodes.get(children[1]).kind, NodeKind::IntLiteral);
    }

    #[test]
    fn record_binding_initializer_is_a_record_literal() {
        let (ok, nodes) = parse_stmt("origin: Point = Point(x = 0, y = 0)");
        assert!(ok);
        let root = nodes.root().unwrap();
        let children = nodes.children(root);
        assert_eq!(nodes.get(children[1]).kind, NodeKind::RecordLiteral);
    }

    #[test]
    fn match_binding_initializer_is_a_match_expression() {
        let (ok, nodes) = parse_stmt("result: i32 = match x\n\t0 -> 1\n\t_ -> 2\n");
        assert!(ok);
        let root = nodes.root().unwrap();
        let children = nodes.children(root);
        assert_eq!(nodes.get(children[1]).kind, NodeKind::MatchExpr);
    }

    #[test]
    fn missing_initializer_fails_the_parse() {
        let (ok, _nodes) = parse_stmt("x: i32 =");
        assert!(!ok);
    }

    #[test]
    fn record_field_block_sugar_yields_one_field_assign_per_line() {
        let (ok, nodes) = parse_stmt("p: Point =\n\tx: 5\n\ty: 10\n");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::Binding);
        let children = nodes.children(root);
        assert_eq!(children.len(), 3); // TypeName, then two FieldAssign
        assert_eq!(nodes.get(children[1]).kind, NodeKind::FieldAssign);
        assert_eq!(nodes.get(children[2]).kind, NodeKind::FieldAssign);
    }
}
