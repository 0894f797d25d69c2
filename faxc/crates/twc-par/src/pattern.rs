//! Pattern parsing - wildcard, binding, literal, or-patterns.

use crate::ast::NodeKind;
use crate::Parser;
use twc_lex::Token;

impl<'p> Parser<'p> {
    /// `Pattern = PatternAlt ("|" PatternAlt)*`
    pub(crate) fn parse_pattern(&mut self) -> bool {
        let mark = self.nodes_mark();
        if !self.parse_pattern_primary() {
            return false;
        }
        let mut count = 1;
        let mut last_pipe = None;
        while matches!(self.current_token(), Token::Pipe) {
            last_pipe = Some(self.bump());
            if !self.parse_pattern_primary() {
                return false;
            }
            count += 1;
        }
        if count > 1 {
            self.push_node(NodeKind::OrPattern, last_pipe.unwrap(), mark);
        }
        true
    }

    /// Wildcard `_`, a binding identifier, or a (possibly negative) integer literal.
    fn parse_pattern_primary(&mut self) -> bool {
        let mark = self.nodes_mark();
        match self.current_token() {
            Token::Underscore => {
                let tok = self.bump();
                self.push_node(NodeKind::WildcardPattern, tok, mark);
                true
            },
            Token::Ident(_) => {
                let tok = self.bump();
                self.push_node(NodeKind::BindingPattern, tok, mark);
                true
            },
            Token::Minus | Token::Int(_) => {
                let negate = matches!(self.current_token(), Token::Minus);
                let minus_tok = if negate { Some(self.bump()) } else { None };
                let int_tok = match self.current_token() {
                    Token::Int(_) => self.bump(),
                    _ => {
                        self.error("expected an integer literal in pattern");
                        return false;
                    },
                };
                self.push_node(NodeKind::IntLiteral, int_tok, mark);
                let salient = if let Some(minus) = minus_tok {
                    self.push_node(NodeKind::Unary, minus, mark);
                    minus
                } else {
                    int_tok
                };
                self.push_node(NodeKind::LiteralPattern, salient, mark);
                true
            },
            _ => {
                self.error("expected a pattern: `_`, an identifier, or an integer literal");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::Parser;
    use twc_util::Handler;

    fn parse_pat(source: &str) -> (bool, crate::ast::NodeStore) {
        let mut handler = Handler::new();
        let tokens = crate::TokenStore::lex(source, &mut handler);
        let mut parser = Parser::new(&tokens, &mut handler);
        let ok = parser.parse_pattern();
        (ok, parser.nodes)
    }

    #[test]
    fn wildcard() {
        let (ok, nodes) = parse_pat("_");
        assert!(ok);
        assert_eq!(nodes.get(nodes.root().unwrap()).kind, NodeKind::WildcardPattern);
    }

    #[test]
    fn binding() {
        let (ok, nodes) = parse_pat("x");
        assert!(ok);
        assert_eq!(nodes.get(nodes.root().unwrap()).kind, NodeKind::BindingPattern);
    }

    #[test]
    fn negative_literal_pattern_wraps_in_unary() {
        let (ok, nodes) = parse_pat("-3");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::LiteralPattern);
        assert_eq!(nodes.get(nodes.children(root)[0]).kind, NodeKind::Unary);
    }

    #[test]
    fn or_pattern_collects_all_alternatives() {
        let (ok, nodes) = parse_pat("1 | 2 | _");
        assert!(ok);
        let root = nodes.root().unwrap();
        assert_eq!(nodes.get(root).kind, NodeKind::OrPattern);
        assert_eq!(nodes.children(root).len(), 3);
    }
}
