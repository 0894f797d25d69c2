//! Type declaration parsing - a record type's name and its indented field block.

use crate::ast::NodeKind;
use crate::Parser;
use twc_lex::Token;

impl<'p> Parser<'p> {
    /// `"type" ident Indent FieldDecl+ Dedent`
    pub(crate) fn parse_type_decl(&mut self) -> bool {
        let mark = self.nodes_mark();
        self.bump(); // "type"
        let name_tok = match self.current_token() {
            Token::Ident(_) => self.bump(),
            _ => {
                self.error("expected a type name after `type`");
                return false;
            },
        };
        self.skip_newlines();
        if !matches!(self.current_token(), Token::Indent(_)) {
            self.error("expected an indented block of fields");
            return false;
        }
        self.bump();
        loop {
            self.skip_newlines();
            if matches!(self.current_token(), Token::Dedent(_)) {
                break;
            }
            if !self.parse_field_decl() {
                return false;
            }
        }
        self.bump(); // Dedent
        self.push_node(NodeKind::TypeDecl, name_tok, mark);
        true
    }

    /// `ident ":" TypeAnnotation`
    fn parse_field_decl(&mut self) -> bool {
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
        if !self.parse_type_annotation() {
            return false;
        }
        self.push_node(NodeKind::FieldDecl, field_tok, mark);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::Parser;
    use twc_util::Handler;

    fn parse_type_decl(source: &str) -> (bool, crate::ast::NodeStore) {
        let mut handler = Handler::new();
        let tokens = crate::TokenStore::lex(source, &mut handler);
        let mut parser = Parser::new(&tokens, &mut handler);
        let ok = parser.parse_type_decl();
        (ok, parser.nodes)
    }

    #[test]
    fn record_with_two_fields() {
        let source = "type Point\n\tx: i32\n\ty: i32\n";
        let (ok, nodes) = parse_type_decl(source);
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::TypeDecl);
        let children = nodes.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(nodes.get(children[0]).kind, NodeKind::FieldDecl);
        assert_eq!(nodes.get(children[1]).kind, NodeKind::FieldDecl);
    }

    #[test]
    fn field_with_hinted_type() {
        let source = "type Point\n\tx: i32<min=0, max=100>\n";
        let (ok, nodes) = parse_type_decl(source);
        assert!(ok);
        let root = nodes.root().unwrap();
        let field = nodes.children(root)[0];
        assert_eq!(nodes.get(field).kind, NodeKind::FieldDecl);
        assert_eq!(nodes.get(nodes.children(field)[0]).kind, NodeKind::HintedType);
    }
}
