//! Token kinds produced by the lexer.
//!
//! [`Token`] is what the lexer's dispatch loop actually produces and matches
//! on; it carries whatever payload a kind needs (a level, an interned name, a
//! literal value). [`TokenKind`] is the stable, payload-free discriminant the
//! parser stores alongside source position when it builds its own token
//! arena — its numeric ranges are part of the wire contract with later
//! phases, so new variants are appended, never reordered.

use twc_util::Symbol;

/// Stable, payload-free token discriminant.
///
/// Structural tokens occupy the bottom of the range, `Eof` the very top;
/// everything else is free to grow between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    Indent = 0,
    Dedent = 1,
    Newline = 2,

    KwPanic,
    KwMatch,
    KwType,
    KwI32,
    KwI64,
    KwF32,
    KwF64,

    Ident,
    Int,
    Float,

    Colon,
    Equals,
    Arrow,
    Underscore,
    Pipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PercentPercent,
    Amp,
    Caret,
    Tilde,
    Shl,
    Shr,
    Shr3,
    AmpAmp,
    PipePipe,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Bang,

    Invalid,

    Eof = 255,
}

/// A lexed token, carrying whatever payload its kind needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// New indentation level reached.
    Indent(u32),
    /// Indentation level dropped back to.
    Dedent(u32),
    Newline,

    KwPanic,
    KwMatch,
    KwType,
    KwI32,
    KwI64,
    KwF32,
    KwF64,

    Ident(Symbol),
    /// Integer literal value (scientific suffix already folded in).
    Int(i64),
    Float(f64),

    Colon,
    Equals,
    Arrow,
    Underscore,
    Pipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PercentPercent,
    Amp,
    Caret,
    Tilde,
    Shl,
    Shr,
    Shr3,
    AmpAmp,
    PipePipe,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Bang,

    /// An unrecognized character; the lexer has already reported a diagnostic
    /// and skipped it.
    Invalid(char),

    Eof,
}

impl Token {
    /// Maps a keyword's interned symbol to its token, if it is one.
    pub fn keyword_from_symbol(sym: Symbol) -> Option<Token> {
        match sym {
            s if s == twc_util::symbol::KW_PANIC => Some(Token::KwPanic),
            s if s == twc_util::symbol::KW_MATCH => Some(Token::KwMatch),
            s if s == twc_util::symbol::KW_TYPE => Some(Token::KwType),
            s if s == twc_util::symbol::TY_I32 => Some(Token::KwI32),
            s if s == twc_util::symbol::TY_I64 => Some(Token::KwI64),
            s if s == twc_util::symbol::TY_F32 => Some(Token::KwF32),
            s if s == twc_util::symbol::TY_F64 => Some(Token::KwF64),
            _ => None,
        }
    }

    /// The stable, payload-free discriminant for this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Indent(_) => TokenKind::Indent,
            Token::Dedent(_) => TokenKind::Dedent,
            Token::Newline => TokenKind::Newline,
            Token::KwPanic => TokenKind::KwPanic,
            Token::KwMatch => TokenKind::KwMatch,
            Token::KwType => TokenKind::KwType,
            Token::KwI32 => TokenKind::KwI32,
            Token::KwI64 => TokenKind::KwI64,
            Token::KwF32 => TokenKind::KwF32,
            Token::KwF64 => TokenKind::KwF64,
            Token::Ident(_) => TokenKind::Ident,
            Token::Int(_) => TokenKind::Int,
            Token::Float(_) => TokenKind::Float,
            Token::Colon => TokenKind::Colon,
            Token::Equals => TokenKind::Equals,
            Token::Arrow => TokenKind::Arrow,
            Token::Underscore => TokenKind::Underscore,
            Token::Pipe => TokenKind::Pipe,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Percent => TokenKind::Percent,
            Token::PercentPercent => TokenKind::PercentPercent,
            Token::Amp => TokenKind::Amp,
            Token::Caret => TokenKind::Caret,
            Token::Tilde => TokenKind::Tilde,
            Token::Shl => TokenKind::Shl,
            Token::Shr => TokenKind::Shr,
            Token::Shr3 => TokenKind::Shr3,
            Token::AmpAmp => TokenKind::AmpAmp,
            Token::PipePipe => TokenKind::PipePipe,
            Token::Lt => TokenKind::Lt,
            Token::Le => TokenKind::Le,
            Token::Gt => TokenKind::Gt,
            Token::Ge => TokenKind::Ge,
            Token::EqEq => TokenKind::EqEq,
            Token::Ne => TokenKind::Ne,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Bang => TokenKind::Bang,
            Token::Invalid(_) => TokenKind::Invalid,
            Token::Eof => TokenKind::Eof,
        }
    }
}
