//! Operator and punctuation lexing.
//!
//! Punctuation with no compound form (`(`, `)`, `[`, `]`, `,`, `.`, `:`, `+`,
//! `*`, `^`, `~`) is matched directly in [`core`](crate::lexer::core); only
//! tokens that need one or more characters of lookahead get their own method
//! here.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `-` or `->`.
    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            Token::Arrow
        } else {
            Token::Minus
        }
    }

    /// `%` or `%%`.
    pub fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('%') {
            Token::PercentPercent
        } else {
            Token::Percent
        }
    }

    /// `=` or `==`.
    pub fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Equals
        }
    }

    /// `!` or `!=`.
    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::Ne
        } else {
            Token::Bang
        }
    }

    /// `<`, `<=`, or `<<`.
    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::Le
        } else if self.cursor.match_char('<') {
            Token::Shl
        } else {
            Token::Lt
        }
    }

    /// `>`, `>=`, `>>`, or `>>>` (logical right shift).
    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            return Token::Ge;
        }
        if self.cursor.match_char('>') {
            if self.cursor.match_char('>') {
                return Token::Shr3;
            }
            return Token::Shr;
        }
        Token::Gt
    }

    /// `&` or `&&`.
    pub fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Token::AmpAmp
        } else {
            Token::Amp
        }
    }

    /// `|` or `||`.
    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Token::PipePipe
        } else {
            Token::Pipe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_util::Handler;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let lexer = Lexer::new(source, &mut handler);
        lexer.collect()
    }

    #[test]
    fn test_minus_and_arrow() {
        assert_eq!(lex_all("-"), vec![Token::Minus]);
        assert_eq!(lex_all("->"), vec![Token::Arrow]);
    }

    #[test]
    fn test_percent_and_double_percent() {
        assert_eq!(lex_all("%"), vec![Token::Percent]);
        assert_eq!(lex_all("%%"), vec![Token::PercentPercent]);
    }

    #[test]
    fn test_equals_and_eqeq() {
        assert_eq!(lex_all("="), vec![Token::Equals]);
        assert_eq!(lex_all("=="), vec![Token::EqEq]);
    }

    #[test]
    fn test_bang_and_ne() {
        assert_eq!(lex_all("!"), vec![Token::Bang]);
        assert_eq!(lex_all("!="), vec![Token::Ne]);
    }

    #[test]
    fn test_less_family() {
        assert_eq!(lex_all("<"), vec![Token::Lt]);
        assert_eq!(lex_all("<="), vec![Token::Le]);
        assert_eq!(lex_all("<<"), vec![Token::Shl]);
    }

    #[test]
    fn test_greater_family() {
        assert_eq!(lex_all(">"), vec![Token::Gt]);
        assert_eq!(lex_all(">="), vec![Token::Ge]);
        assert_eq!(lex_all(">>"), vec![Token::Shr]);
        assert_eq!(lex_all(">>>"), vec![Token::Shr3]);
    }

    #[test]
    fn test_ampersand_family() {
        assert_eq!(lex_all("&"), vec![Token::Amp]);
        assert_eq!(lex_all("&&"), vec![Token::AmpAmp]);
    }

    #[test]
    fn test_pipe_family() {
        assert_eq!(lex_all("|"), vec![Token::Pipe]);
        assert_eq!(lex_all("||"), vec![Token::PipePipe]);
    }

    #[test]
    fn test_shr3_then_equals_is_not_swallowed() {
        // ">>>=" is not a token in this grammar; the trailing `=` lexes
        // as its own Equals token rather than being absorbed.
        assert_eq!(lex_all(">>>="), vec![Token::Shr3, Token::Equals]);
    }
}
