//! Number literal lexing.
//!
//! Integer literals are a plain decimal digit run with an optional
//! scientific suffix (`1e3` means 1000, still an integer literal). Float
//! literals require a `.`; an exponent is optional on either form.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or float literal starting at the cursor's current
    /// position (already known to be an ASCII digit).
    pub fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let has_fraction =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();
        if has_fraction {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let has_exponent = self.lex_optional_exponent();

        let text = self.cursor.slice_from(start);

        if has_fraction {
            match text.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(e) => {
                    self.report_error(format!("invalid float literal '{text}': {e}"));
                    Token::Float(0.0)
                },
            }
        } else if has_exponent {
            match text.parse::<f64>() {
                Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                    Token::Int(value as i64)
                },
                Ok(_) => {
                    self.report_error(format!(
                        "integer literal '{text}' with scientific suffix is not a whole number"
                    ));
                    Token::Int(0)
                },
                Err(e) => {
                    self.report_error(format!("invalid integer literal '{text}': {e}"));
                    Token::Int(0)
                },
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::Int(value),
                Err(e) => {
                    self.report_error(format!("integer literal '{text}' overflows: {e}"));
                    Token::Int(0)
                },
            }
        }
    }

    /// Consumes `e`/`E` followed by an optional sign and a digit run.
    /// Returns whether an exponent was present. Reports a diagnostic (but
    /// still consumes the `e`) if no digits follow.
    fn lex_optional_exponent(&mut self) -> bool {
        if self.cursor.current_char() != 'e' && self.cursor.current_char() != 'E' {
            return false;
        }
        self.cursor.advance();
        if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
            self.cursor.advance();
        }

        let digits_start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.position() == digits_start {
            self.report_error("no digits in exponent".to_string());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_util::Handler;

    fn lex_num(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        lexer.lex_number()
    }

    #[test]
    fn test_decimal_integer() {
        assert_eq!(lex_num("0"), Token::Int(0));
        assert_eq!(lex_num("42"), Token::Int(42));
        assert_eq!(lex_num("123456"), Token::Int(123456));
    }

    #[test]
    fn test_float_requires_dot() {
        let result = lex_num("3.14");
        assert!(matches!(result, Token::Float(f) if (f - 3.14).abs() < 0.0001));
    }

    #[test]
    fn test_integer_with_scientific_suffix() {
        assert_eq!(lex_num("1e3"), Token::Int(1000));
    }

    #[test]
    fn test_integer_with_scientific_suffix_uppercase_and_sign() {
        assert_eq!(lex_num("2E2"), Token::Int(200));
    }

    #[test]
    fn test_float_with_exponent() {
        let result = lex_num("2.5e1");
        assert!(matches!(result, Token::Float(f) if (f - 25.0).abs() < 0.0001));
    }

    #[test]
    fn test_dot_not_followed_by_digit_is_not_a_fraction() {
        // "42.foo" lexes just the integer "42"; the '.' and 'foo' are
        // separate tokens for the caller to lex next.
        assert_eq!(lex_num("42.foo"), Token::Int(42));
    }
}
