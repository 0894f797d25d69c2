//! Expression parsing via Pratt's binding-power algorithm.
//!
//! `parse_expr_bp` folds every level of the precedence table into one loop,
//! reusing a single `mark` captured before the left operand so that chained
//! operators at the same precedence (`a + b + c`) grow one flat `Binary`
//! chain rather than nesting a fresh mark per iteration.

use crate::ast::NodeKind;
use crate::{Parser, TokenId};
use twc_lex::Token;

/// `(left binding power, right binding power)` for an infix operator.
/// Left-associative operators bind their right side one tighter than their
/// left so repeated application folds left: `a - b - c == (a - b) - c`.
fn infix_bp(token: &Token) -> Option<(u8, u8)> {
    use Token::*;
    let bp = match token {
        PipePipe => (2, 3),
        AmpAmp => (4, 5),
        Pipe => (6, 7),
        Caret => (8, 9),
        Amp => (10, 11),
        Lt | Le | Gt | Ge | EqEq | Ne => (12, 13),
        Shl | Shr | Shr3 => (14, 15),
        Plus | Minus => (16, 17),
        Star | Slash | Percent | PercentPercent => (18, 19),
        _ => return None,
    };
    Some(bp)
}

impl<'p> Parser<'p> {
    pub(crate) fn parse_expr(&mut self) -> bool {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> bool {
        let mark = self.nodes_mark();
        if !self.parse_unary() {
            return false;
        }
        loop {
            let Some((lbp, rbp)) = infix_bp(self.current_token()) else { break };
            if lbp < min_bp {
                break;
            }
            let op_tok = self.bump();
            if !self.parse_expr_bp(rbp) {
                return false;
            }
            self.push_node(NodeKind::Binary, op_tok, mark);
        }
        true
    }

    /// Prefix `-`, `~`, `!`, otherwise falls through to postfix/primary.
    fn parse_unary(&mut self) -> bool {
        let mark = self.nodes_mark();
        match self.current_token() {
            Token::Minus | Token::Tilde | Token::Bang => {
                let op_tok = self.bump();
                if !self.parse_unary() {
                    return false;
                }
                self.push_node(NodeKind::Unary, op_tok, mark);
                true
            },
            _ => self.parse_postfix(),
        }
    }

    /// `Primary ("." ident | "[" Expression "]")*`
    fn parse_postfix(&mut self) -> bool {
        let mark = self.nodes_mark();
        if !self.parse_primary() {
            return false;
        }
        loop {
            match self.current_token() {
                Token::Dot => {
                    self.bump();
                    let field_tok = match self.current_token() {
                        Token::Ident(_) => self.bump(),
                        _ => {
                            self.error("expected a field name after `.`");
                            return false;
                        },
                    };
                    self.push_node(NodeKind::FieldAccess, field_tok, mark);
                },
                Token::LBracket => {
                    let bracket_tok = self.bump();
                    if !self.parse_expr() {
                        return false;
                    }
                    if self.expect(Token::RBracket).is_none() {
                        return false;
                    }
                    self.push_node(NodeKind::IndexAccess, bracket_tok, mark);
                },
                _ => break,
            }
        }
        true
    }

    fn parse_primary(&mut self) -> bool {
        let mark = self.nodes_mark();
        match self.current_token() {
            Token::Int(_) => {
                let tok = self.bump();
                self.push_node(NodeKind::IntLiteral, tok, mark);
                true
            },
            Token::Float(_) => {
                let tok = self.bump();
                self.push_node(NodeKind::FloatLiteral, tok, mark);
                true
            },
            Token::Ident(_) => {
                let tok = self.bump();
                if matches!(self.current_token(), Token::LParen) {
                    self.parse_record_literal(tok, mark)
                } else {
                    self.push_node(NodeKind::VarRef, tok, mark);
                    true
                }
            },
            Token::LParen => {
                self.bump();
                if !self.parse_expr() {
                    return false;
                }
                self.expect(Token::RParen).is_some()
            },
            Token::LBracket => self.parse_list_literal(mark),
            Token::KwMatch => self.parse_match_expr(mark),
            _ => {
                self.error("expected an expression");
                false
            },
        }
    }

    /// `name "(" (FieldInit ("," FieldInit)*)? ")"`, `name` already consumed.
    fn parse_record_literal(&mut self, name_tok: TokenId, mark: usize) -> bool {
        self.bump(); // "("
        if !matches!(self.current_token(), Token::RParen) {
            loop {
                if !self.parse_field_init() {
                    return false;
                }
                if matches!(self.current_token(), Token::Comma) {
                    self.bump();
                    continue;
                }
                break;
            }
        }
        if self.expect(Token::RParen).is_none() {
            return false;
        }
        self.push_node(NodeKind::RecordLiteral, name_tok, mark);
        true
    }

    /// `ident "=" Expression`
    fn parse_field_init(&mut self) -> bool {
        let mark = self.nodes_mark();
        let name_tok = match self.current_token() {
            Token::Ident(_) => self.bump(),
            _ => {
                self.error("expected a field name");
                return false;
            },
        };
        if self.expect(Token::Equals).is_none() {
            return false;
        }
        if !self.parse_expr() {
            return false;
        }
        self.push_node(NodeKind::FieldInit, name_tok, mark);
        true
    }

    /// `"[" (Expression ("," Expression)*)? "]"`
    fn parse_list_literal(&mut self, mark: usize) -> bool {
        self.bump(); // "["
        if !matches!(self.current_token(), Token::RBracket) {
            loop {
                if !self.parse_expr() {
                    return false;
                }
                if matches!(self.current_token(), Token::Comma) {
                    self.bump();
                    continue;
                }
                break;
            }
        }
        let close_tok = match self.expect(Token::RBracket) {
            Some(tok) => tok,
            None => return false,
        };
        self.push_node(NodeKind::ListLiteral, close_tok, mark);
        true
    }

    /// `"match" Expression Indent MatchArm+ Dedent`
    fn parse_match_expr(&mut self, mark: usize) -> bool {
        let match_tok = self.bump(); // "match"
        if !self.parse_expr() {
            return false;
        }
        self.skip_newlines();
        if !matches!(self.current_token(), Token::Indent(_)) {
            self.error("expected an indented block of match arms");
            return false;
        }
        self.bump();
        loop {
            self.skip_newlines();
            if matches!(self.current_token(), Token::Dedent(_)) {
                break;
            }
            if !self.parse_match_arm() {
                return false;
            }
        }
        self.bump(); // Dedent
        self.push_node(NodeKind::MatchExpr, match_tok, mark);
        true
    }

    /// `Pattern "->" Expression`
    fn parse_match_arm(&mut self) -> bool {
        let mark = self.nodes_mark();
        if !self.parse_pattern() {
            return false;
        }
        let arrow_tok = match self.expect(Token::Arrow) {
            Some(tok) => tok,
            None => return false,
        };
        if !self.parse_expr() {
            return false;
        }
        self.push_node(NodeKind::MatchArm, arrow_tok, mark);
        true
    }
}
