//! Comment skipping.
//!
//! A comment starts at `#` and ends at the next `#` or end of line,
//! whichever comes first; it acts as whitespace either way.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace and `#`-delimited comments before the next token.
    pub fn skip_whitespace_and_comments(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }

        loop {
            if self.cursor.is_at_end() {
                return;
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                },
                '#' => self.skip_comment(),
                _ => return,
            }
        }
    }

    fn skip_comment(&mut self) {
        self.cursor.advance();
        while !self.cursor.is_at_end()
            && self.cursor.current_char() != '#'
            && self.cursor.current_char() != '\n'
        {
            self.cursor.advance();
        }
        if self.cursor.current_char() == '#' {
            self.cursor.advance();
        }
    }
}
