//! Core lexer implementation.
//!
//! Turns preprocessed source text (raw content interleaved with the
//! preprocessor's INDENT/DEDENT markers) into a stream of [`Token`]s.

use twc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::Token;
use twc_pre::marker;

/// Lexer for TinyWhale source.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub handler: &'a mut Handler,

    /// Starting byte position of the token currently being lexed.
    pub token_start: usize,

    /// Line number where the current token starts (1-based).
    token_start_line: u32,

    /// Column number where the current token starts (1-based).
    token_start_column: u32,

    /// Whether the BOM (Byte Order Mark) has been checked.
    pub bom_checked: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given (preprocessed) source code.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            bom_checked: false,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace and comments, then dispatches on the current
    /// character. Always returns `Token::Eof` at end of input rather than
    /// panicking — the lexer never throws on arbitrary input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Token::Newline
            },
            marker::OPEN => self.lex_marker(),
            '(' => {
                self.cursor.advance();
                Token::LParen
            },
            ')' => {
                self.cursor.advance();
                Token::RParen
            },
            '[' => {
                self.cursor.advance();
                Token::LBracket
            },
            ']' => {
                self.cursor.advance();
                Token::RBracket
            },
            ',' => {
                self.cursor.advance();
                Token::Comma
            },
            ':' => {
                self.cursor.advance();
                Token::Colon
            },
            '+' => {
                self.cursor.advance();
                Token::Plus
            },
            '*' => {
                self.cursor.advance();
                Token::Star
            },
            '^' => {
                self.cursor.advance();
                Token::Caret
            },
            '~' => {
                self.cursor.advance();
                Token::Tilde
            },
            '/' => {
                self.cursor.advance();
                Token::Slash
            },
            '-' => self.lex_minus(),
            '%' => self.lex_percent(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '.' => {
                self.cursor.advance();
                Token::Dot
            },
            '_' => {
                self.cursor.advance();
                if crate::unicode::is_ascii_ident_continue(self.cursor.current_char()) {
                    self.lex_identifier()
                } else {
                    Token::Underscore
                }
            },
            c if crate::unicode::is_ascii_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("unexpected character '{c}'"));
                self.cursor.advance();
                Token::Invalid(c)
            },
        }
    }

    /// Decodes one `⟨line,level⟩⇥` / `⟨line,level⟩⇤` marker into a
    /// structural token. The line/column recorded for the token are the
    /// marker's own embedded `line` (column 1), per the preprocessor's
    /// contract, not the cursor's position in the decorated text.
    fn lex_marker(&mut self) -> Token {
        self.cursor.advance(); // consume OPEN

        let line = self.lex_marker_number(',');
        let level = self.lex_marker_number(marker::CLOSE);

        match self.cursor.current_char() {
            marker::INDENT => {
                self.cursor.advance();
                self.token_start_line = line;
                self.token_start_column = 1;
                Token::Indent(level)
            },
            marker::DEDENT => {
                self.cursor.advance();
                self.token_start_line = line;
                self.token_start_column = 1;
                Token::Dedent(level)
            },
            _ => {
                self.report_error("malformed indentation marker".to_string());
                Token::Invalid(marker::OPEN)
            },
        }
    }

    /// Reads digits up to (and consuming) `terminator`, returning the parsed
    /// value or 0 if the digits are missing or malformed.
    fn lex_marker_number(&mut self, terminator: char) -> u32 {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let value = text.parse().unwrap_or(0);
        if self.cursor.current_char() == terminator {
            self.cursor.advance();
        } else {
            self.report_error("malformed indentation marker".to_string());
        }
        value
    }

    /// Reports a lexical error at the current token's start position.
    pub fn report_error(&mut self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message)
            .code(twc_util::DiagnosticCode::TWLEX006)
            .span(span)
            .emit(self.handler);
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the byte offset where the current token began.
    pub fn token_start(&mut self) -> usize {
        self.token_start
    }

    /// The line on which the most recently returned token started.
    pub fn token_start_line(&self) -> u32 {
        self.token_start_line
    }

    /// The column at which the most recently returned token started.
    pub fn token_start_column(&self) -> u32 {
        self.token_start_column
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token == Token::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_util::Symbol;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let lexer = Lexer::new(source, &mut handler);
        lexer.collect()
    }

    #[test]
    fn test_empty_source_yields_no_tokens() {
        assert_eq!(lex_all(""), Vec::<Token>::new());
    }

    #[test]
    fn test_keyword_and_identifier() {
        assert_eq!(
            lex_all("panic x"),
            vec![Token::KwPanic, Token::Ident(Symbol::intern("x"))]
        );
    }

    #[test]
    fn test_newline_is_a_token() {
        assert_eq!(
            lex_all("x\ny"),
            vec![
                Token::Ident(Symbol::intern("x")),
                Token::Newline,
                Token::Ident(Symbol::intern("y")),
            ]
        );
    }

    #[test]
    fn test_decodes_indent_and_dedent_markers() {
        let source = "type Point\n\u{27E8}2,1\u{27E9}\u{21E5}x: i32\n\u{27E8}3,0\u{27E9}\u{21E4}";
        let tokens = lex_all(source);
        assert!(tokens.contains(&Token::Indent(1)));
        assert!(tokens.contains(&Token::Dedent(0)));
    }

    #[test]
    fn test_underscore_alone_is_wildcard() {
        assert_eq!(lex_all("_"), vec![Token::Underscore]);
    }

    #[test]
    fn test_underscore_prefixed_identifier() {
        assert_eq!(lex_all("_x"), vec![Token::Ident(Symbol::intern("_x"))]);
    }

    #[test]
    fn test_unknown_character_reports_and_skips() {
        let mut handler = Handler::new();
        let tokens: Vec<Token> = Lexer::new("x ` y", &mut handler).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident(Symbol::intern("x")),
                Token::Invalid('`'),
                Token::Ident(Symbol::intern("y")),
            ]
        );
        assert!(handler.has_errors());
    }

    #[test]
    fn test_full_punctuation_set() {
        let source = ": = -> | + - * / % %% & ^ ~ << >> >>> && || < <= > >= == != ( ) [ ] , . !";
        assert_eq!(
            lex_all(source),
            vec![
                Token::Colon,
                Token::Equals,
                Token::Arrow,
                Token::Pipe,
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Percent,
                Token::PercentPercent,
                Token::Amp,
                Token::Caret,
                Token::Tilde,
                Token::Shl,
                Token::Shr,
                Token::Shr3,
                Token::AmpAmp,
                Token::PipePipe,
                Token::Lt,
                Token::Le,
                Token::Gt,
                Token::Ge,
                Token::EqEq,
                Token::Ne,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::Comma,
                Token::Dot,
                Token::Bang,
            ]
        );
    }
}
