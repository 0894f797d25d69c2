//! twc-lex - Lexical analyzer
//!
//! Turns preprocessed source text (see [`twc_pre`]) into a flat stream of
//! [`token::Token`]s terminated by `Eof`. The lexer never panics: an
//! unrecognized character becomes a `Token::Invalid` plus a diagnostic, and
//! the function always yields at least the `Eof` token.
//!
//! Token categories: structural (`Indent`/`Dedent`/`Newline`), the seven
//! keywords (`panic`, `match`, `type`, `i32`, `i64`, `f32`, `f64`),
//! identifiers (`[A-Za-z_][A-Za-z0-9_]*`), integer and float literals, and
//! punctuation. Keywords are matched before identifiers.

pub mod cursor;
mod edge_cases;
pub mod lexer;
mod safety;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
