//! Type annotation parsing: primitives, refinement hints, list suffixes.

use crate::ast::NodeKind;
use crate::Parser;
use twc_lex::Token;

impl<'p> Parser<'p> {
    /// `TypeAnnotation = TypeRef`, where `TypeRef` is a primitive
    /// (optionally hinted) or a user type name, followed by zero or more
    /// `"[" "]" TypeHints` suffixes.
    pub(crate) fn parse_type_annotation(&mut self) -> bool {
        let mark = self.nodes_mark();

        let is_primitive = matches!(
            self.current_token(),
            Token::KwI32 | Token::KwI64 | Token::KwF32 | Token::KwF64
        );
        let is_name = matches!(self.current_token(), Token::Ident(_));
        if !is_primitive && !is_name {
            self.error("expected a type: a primitive, a user type name, or a list type");
            return false;
        }
        let base_tok = self.bump();
        self.push_node(NodeKind::TypeName, base_tok, mark);

        if is_primitive && matches!(self.current_token(), Token::Lt) {
            if !self.parse_hint_list() {
                return false;
            }
            self.push_node(NodeKind::HintedType, base_tok, mark);
        }

        while matches!(self.current_token(), Token::LBracket) {
            self.bump();
            if self.expect(Token::RBracket).is_none() {
                return false;
            }
            if !self.parse_hint_list() {
                return false;
            }
            self.push_node(NodeKind::ListType, base_tok, mark);
        }

        true
    }

    /// `"<" Hint ("," Hint)* ">"`
    fn parse_hint_list(&mut self) -> bool {
        if self.expect(Token::Lt).is_none() {
            return false;
        }
        loop {
            if !self.parse_hint() {
                return false;
            }
            if matches!(self.current_token(), Token::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.expect(Token::Gt).is_some()
    }

    /// `("min"|"max"|"size") "=" ("-"? intLiteral)`
    fn parse_hint(&mut self) -> bool {
        let mark = self.nodes_mark();
        let key_tok = match self.current_token() {
            Token::Ident(_) => self.bump(),
            _ => {
                self.error("expected `min`, `max`, or `size`");
                return false;
            },
        };
        if self.expect(Token::Equals).is_none() {
            return false;
        }

        let negate = matches!(self.current_token(), Token::Minus);
        let minus_tok = if negate { Some(self.bump()) } else { None };
        let int_tok = match self.current_token() {
            Token::Int(_) => self.bump(),
            _ => {
                self.error("expected an integer literal in a refinement hint");
                return false;
            },
        };
        self.push_node(NodeKind::IntLiteral, int_tok, mark);
        if let Some(minus) = minus_tok {
            self.push_node(NodeKind::Unary, minus, mark);
        }
        self.push_node(NodeKind::Hint, key_tok, mark);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::Parser;
    use twc_util::Handler;

    fn parse_type(source: &str) -> (bool, crate::ast::NodeStore) {
        let mut handler = Handler::new();
        let tokens = crate::TokenStore::lex(source, &mut handler);
        let mut parser = Parser::new(&tokens, &mut handler);
        let ok = parser.parse_type_annotation();
        (ok, parser.nodes)
    }

    #[test]
    fn plain_primitive_is_a_bare_type_name() {
        let (ok, nodes) = parse_type("i32");
        assert!(ok);
        assert_eq!(nodes.get(nodes.root().unwrap()).kind, NodeKind::TypeName);
    }

    #[test]
    fn hinted_primitive_wraps_the_type_name() {
        let (ok, nodes) = parse_type("i32<min=0, max=100>");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::HintedType);
        let children = nodes.children(root);
        assert_eq!(children.len(), 3); // TypeName, Hint(min), Hint(max)
        assert_eq!(nodes.get(children[0]).kind, NodeKind::TypeName);
        assert_eq!(nodes.get(children[1]).kind, NodeKind::Hint);
        assert_eq!(nodes.get(children[2]).kind, NodeKind::Hint);
    }

    #[test]
    fn list_type_wraps_the_element_type_with_its_size_hint() {
        let (ok, nodes) = parse_type("i32[]<size=3>");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::ListType);
        let children = nodes.children(root);
        assert_eq!(children.len(), 2); // TypeName, Hint(size)
    }

    #[test]
    fn negative_min_hint_wraps_the_literal_in_a_unary_node() {
        let (ok, nodes) = parse_type("i32<min=-5>");
        assert!(ok);
        let root = nodes.root().unwrap();
        let hint = nodes.children(root)[1];
        assert_eq!(nodes.get(hint).kind, NodeKind::Hint);
        let hint_children = nodes.children(hint);
        assert_eq!(nodes.get(hint_children[0]).kind, NodeKind::Unary);
    }

    #[test]
    fn user_type_name_parses_as_a_plain_type_name() {
        let (ok, nodes) = parse_type("Point");
        assert!(ok);
        assert_eq!(nodes.get(nodes.root().unwrap()).kind, NodeKind::TypeName);
    }
}
