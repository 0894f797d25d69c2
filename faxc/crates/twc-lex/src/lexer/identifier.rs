//! Identifier and keyword lexing.

use twc_util::Symbol;

use crate::token::Token;
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword starting at the cursor's current
    /// position (already known to be a valid ASCII ident-start character).
    ///
    /// Keywords are matched before identifiers: `panic`, `match`, `type`,
    /// `i32`, `i64`, `f32`, `f64`. `min`/`max`/`size` are not keywords — they
    /// are plain identifiers that only become significant as refinement
    /// hint keys at check time.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let sym = Symbol::intern_known(text);
        Token::keyword_from_symbol(sym).unwrap_or(Token::Ident(sym))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_util::Handler;

    fn lex_ident(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.token_start = 0;
        lexer.lex_identifier()
    }

    #[test]
    fn test_plain_identifier() {
        assert_eq!(lex_ident("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn test_identifier_with_digits_and_underscore() {
        assert_eq!(lex_ident("x_1_y2"), Token::Ident(Symbol::intern("x_1_y2")));
    }

    #[test]
    fn test_leading_underscore_identifier() {
        assert_eq!(lex_ident("_tmp"), Token::Ident(Symbol::intern("_tmp")));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(lex_ident("panic"), Token::KwPanic);
        assert_eq!(lex_ident("match"), Token::KwMatch);
        assert_eq!(lex_ident("type"), Token::KwType);
        assert_eq!(lex_ident("i32"), Token::KwI32);
        assert_eq!(lex_ident("i64"), Token::KwI64);
        assert_eq!(lex_ident("f32"), Token::KwF32);
        assert_eq!(lex_ident("f64"), Token::KwF64);
    }

    #[test]
    fn test_keyword_like_prefix_is_still_an_identifier() {
        assert_eq!(
            lex_ident("panicked"),
            Token::Ident(Symbol::intern("panicked"))
        );
        assert_eq!(lex_ident("i32x"), Token::Ident(Symbol::intern("i32x")));
    }

    #[test]
    fn test_refinement_hint_keys_are_plain_identifiers() {
        assert_eq!(lex_ident("min"), Token::Ident(Symbol::intern("min")));
        assert_eq!(lex_ident("max"), Token::Ident(Symbol::intern("max")));
        assert_eq!(lex_ident("size"), Token::Ident(Symbol::intern("size")));
    }
}
