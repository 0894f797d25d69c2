//! Flat, append-only token stream the parser walks by index.
//!
//! `twc-lex` hands back a bare [`twc_lex::Token`] per call with no source
//! position attached; the lexer tracks line/column internally and exposes
//! them only for the token it just produced. This store runs the lexer to
//! completion once and freezes each token's position alongside it, so the
//! parser (and later phases, via [`crate::ast::ParseNode::token_id`]) can
//! look a token's coordinates up by id instead of re-lexing.

use twc_lex::{Lexer, Token};
use twc_util::{define_idx, Handler, IndexVec};

define_idx!(TokenId);

#[derive(Clone, Debug, PartialEq)]
pub struct StoredToken {
    pub token: Token,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug)]
pub struct TokenStore {
    tokens: IndexVec<TokenId, StoredToken>,
}

impl TokenStore {
    /// Lexes `source` to completion (including the trailing `Eof`) and
    /// freezes the result.
    pub fn lex(source: &str, handler: &mut Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let mut tokens = IndexVec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token == Token::Eof;
            let stored = StoredToken {
                token,
                line: lexer.token_start_line(),
                column: lexer.token_start_column(),
            };
            tokens.push(stored);
            if is_eof {
                break;
            }
        }
        Self { tokens }
    }

    pub fn get(&self, id: TokenId) -> &StoredToken {
        &self.tokens[id]
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id].token
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
