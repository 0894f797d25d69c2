//! twc-par - Parser (syntactic analyzer)
//!
//! Consumes the token stream produced by [`twc_lex`] and builds a
//! postorder-stored parse tree (see [`ast::NodeStore`]) whose final node is
//! always `Program`. A syntax error reports `TWPARSE001` and the parse
//! stops: [`ParseResult::succeeded`] is `false` and the tree built so far is
//! discarded by the caller rather than partially consumed.

pub mod ast;
#[cfg(test)]
mod edge_cases;
mod error;
mod expr;
mod items;
mod pattern;
mod stmt;
pub mod token_store;
mod types;

pub use ast::{NodeId, NodeKind, NodeStore, ParseNode};
pub use error::ParseError;
pub use token_store::{StoredToken, TokenId, TokenStore};

use twc_lex::Token;
use twc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};

/// Result of a full parse: the tree built so far and whether it's complete.
pub struct ParseResult {
    pub nodes: NodeStore,
    pub succeeded: bool,
}

pub struct Parser<'p> {
    tokens: &'p TokenStore,
    pos: usize,
    nodes: NodeStore,
    handler: &'p mut Handler,
    failed: bool,
}

impl<'p> Parser<'p> {
    pub fn new(tokens: &'p TokenStore, handler: &'p mut Handler) -> Self {
        Self { tokens, pos: 0, nodes: NodeStore::new(), handler, failed: false }
    }

    /// Lexes `source` and parses it in one step.
    pub fn parse_source(source: &str, handler: &mut Handler) -> ParseResult {
        let tokens = TokenStore::lex(source, handler);
        let mut parser = Parser::new(&tokens, handler);
        parser.parse_program()
    }

    pub fn parse_program(&mut self) -> ParseResult {
        let mark = self.nodes.mark();
        let start_tok = self.current_id();
        loop {
            self.skip_structural();
            if self.at_eof() {
                break;
            }
            if !self.parse_statement() {
                self.failed = true;
                break;
            }
        }
        self.nodes.push(NodeKind::Program, start_tok, mark);
        ParseResult { nodes: std::mem::take(&mut self.nodes), succeeded: !self.failed }
    }

    // -- token cursor -------------------------------------------------

    fn current_id(&self) -> TokenId {
        TokenId(self.pos as u32)
    }

    pub(crate) fn current_token(&self) -> &Token {
        self.tokens.token(self.current_id())
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    /// Consumes the current token and returns its id.
    pub(crate) fn bump(&mut self) -> TokenId {
        let id = self.current_id();
        if !self.at_eof() {
            self.pos += 1;
        }
        id
    }

    /// Skips `Newline`, `Indent`, and `Dedent` tokens that aren't being
    /// consumed by a construct that owns them (top-level statement
    /// separators); block owners (`TypeDecl`, `MatchExpr`) consume their
    /// own `Indent`/`Dedent` pair directly instead of calling this.
    pub(crate) fn skip_structural(&mut self) {
        while matches!(
            self.current_token(),
            Token::Newline | Token::Indent(_) | Token::Dedent(_)
        ) {
            self.bump();
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while matches!(self.current_token(), Token::Newline) {
            self.bump();
        }
    }

    /// Consumes the current token if it matches `expected`, reporting
    /// `TWPARSE001` and leaving position unchanged otherwise.
    pub(crate) fn expect(&mut self, expected: Token) -> Option<TokenId> {
        if *self.current_token() == expected {
            Some(self.bump())
        } else {
            self.error(&format!("expected {:?}, found {:?}", expected, self.current_token()));
            None
        }
    }

    pub(crate) fn nodes_mark(&self) -> usize {
        self.nodes.mark()
    }

    pub(crate) fn push_node(&mut self, kind: NodeKind, token_id: TokenId, mark: usize) -> NodeId {
        self.nodes.push(kind, token_id, mark)
    }

    pub(crate) fn error(&mut self, message: &str) {
        let stored = self.tokens.get(self.current_id());
        let span = Span::point(stored.line, stored.column);
        DiagnosticBuilder::error(message.to_string())
            .code(DiagnosticCode::TWPARSE001)
            .span(span)
            .emit(self.handler);
        self.failed = true;
    }
}
