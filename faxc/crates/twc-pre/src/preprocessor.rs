//! Indentation preprocessor.
//!
//! Consumes raw source text and produces a single text artifact where the
//! original content is interleaved with INDENT/DEDENT markers, ready for the
//! lexer to turn into structural tokens. See [`marker`](crate::marker) for
//! the wire format and [`state`](crate::state) for the state machine's
//! fields.
//!
//! # Examples
//!
//! ```
//! use twc_pre::Preprocessor;
//!
//! let source = "panic\n";
//! let output = Preprocessor::new(source).run().unwrap();
//! assert_eq!(output.text, "panic\n");
//! assert!(output.diagnostics.is_empty());
//! ```

use twc_util::{Diagnostic, DiagnosticCode, Span};

use crate::error::{PreprocessError, PreprocessResult};
use crate::marker;
use crate::state::{IndentChar, IndentFrame, IndentState, Mode};

const DIRECTIVE_DOUBLE_QUOTED: &str = "\"use spaces\"";
const DIRECTIVE_SINGLE_QUOTED: &str = "'use spaces'";

/// Result of preprocessing one source file.
pub struct PreprocessOutput {
    /// The marker-decorated text, ready for the lexer.
    pub text: String,
    /// Diagnostics raised while scanning indentation. Never fatal on their
    /// own — the caller decides whether accumulated errors should stop the
    /// pipeline (see the driver's phase short-circuiting).
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the indentation state machine over a source string.
pub struct Preprocessor<'a> {
    source: &'a str,
}

impl<'a> Preprocessor<'a> {
    /// Creates a preprocessor for `source`. A leading UTF-8 BOM is discarded.
    pub fn new(source: &'a str) -> Self {
        Self {
            source: strip_bom(source),
        }
    }

    /// Runs the state machine to completion, producing marker-decorated text.
    pub fn run(&self) -> PreprocessResult<PreprocessOutput> {
        let mut diagnostics = Vec::new();
        let mut output = String::with_capacity(self.source.len() + 16);
        let mut state = IndentState::new();

        let lines: Vec<&str> = self.source.lines().collect();
        let had_trailing_newline = self.source.ends_with('\n');
        let mut mode_resolved = false;
        let mut last_line_no: u32 = 0;

        for (idx, line) in lines.iter().enumerate() {
            let line_no = (idx + 1) as u32;
            last_line_no = line_no;
            let is_last_physical_line = idx + 1 == lines.len();
            let emit_trailing_newline = !is_last_physical_line || had_trailing_newline;
            let is_blank = line.trim().is_empty();

            if !mode_resolved && !is_blank {
                mode_resolved = true;
                let trimmed = line.trim();
                if trimmed == DIRECTIVE_DOUBLE_QUOTED || trimmed == DIRECTIVE_SINGLE_QUOTED {
                    state.mode = Mode::Directive;
                    state.expected_indent_type = Some(IndentChar::Space);
                    state.directive_found = true;
                    state.established_line = Some(line_no);
                    continue;
                }
                state.mode = Mode::Detect;
            }

            if is_blank {
                output.push_str(line);
                if emit_trailing_newline {
                    output.push('\n');
                }
                continue;
            }

            self.process_content_line(
                line,
                line_no,
                &mut state,
                &mut diagnostics,
                &mut output,
            )?;

            if emit_trailing_newline {
                output.push('\n');
            }
        }

        while !state.stack.is_empty() {
            state.stack.pop();
            output.push_str(&marker::dedent_marker(last_line_no, state.top_level()));
        }

        Ok(PreprocessOutput {
            text: output,
            diagnostics,
        })
    }

    fn process_content_line(
        &self,
        line: &str,
        line_no: u32,
        state: &mut IndentState,
        diagnostics: &mut Vec<Diagnostic>,
        output: &mut String,
    ) -> PreprocessResult<()> {
        let (indent_len, first_char, mismatch) = scan_indent(line);
        let content = &line[indent_len..];

        if let Some((expected, found)) = mismatch {
            diagnostics.push(
                Diagnostic::error(
                    format!(
                        "mixed indentation: expected {}, found {}",
                        char_name(expected),
                        char_name(found)
                    ),
                    Span::point(line_no, 1),
                )
                .with_code(DiagnosticCode::TWLEX001),
            );
        }

        if let Some(found) = first_char {
            match state.expected_indent_type {
                None => {
                    state.expected_indent_type = IndentChar::from_char(found);
                    state.established_line = Some(line_no);
                }
                Some(expected) => {
                    if IndentChar::from_char(found) != Some(expected) {
                        diagnostics.push(
                            Diagnostic::error(
                                format!(
                                    "file indentation uses {} here, but was established as {} on line {}",
                                    char_name(found),
                                    expected.name(),
                                    state.established_line.unwrap_or(0)
                                ),
                                Span::point(line_no, 1),
                            )
                            .with_code(DiagnosticCode::TWLEX005),
                        );
                    }
                }
            }
            // The unit (character count per level) is fixed by the first
            // indented line regardless of whether the character itself was
            // just detected here or already fixed by a `use spaces` directive.
            if state.indent_unit.is_none() {
                state.indent_unit = Some(indent_len.max(1));
            }
        }

        let unit = state.indent_unit.unwrap_or(1).max(1);
        let level = (indent_len / unit) as u32;
        if indent_len % unit != 0 {
            diagnostics.push(
                Diagnostic::error(
                    format!(
                        "indentation of {indent_len} is not a multiple of the established unit {unit}"
                    ),
                    Span::point(line_no, 1),
                )
                .with_code(DiagnosticCode::TWLEX002),
            );
        }

        let top = state.top_level();
        match level.cmp(&top) {
            std::cmp::Ordering::Greater => {
                if level > top + 1 {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("indentation jumps from level {top} to {level}"),
                            Span::point(line_no, (indent_len + 1) as u32),
                        )
                        .with_code(DiagnosticCode::TWLEX004),
                    );
                }
                state.stack.push(IndentFrame {
                    level,
                    line: line_no,
                });
                output.push_str(&line[..indent_len]);
                output.push_str(&marker::indent_marker(line_no, level));
                output.push_str(content);
            }
            std::cmp::Ordering::Less => {
                while state.top_level() > level {
                    state
                        .stack
                        .pop()
                        .ok_or(PreprocessError::StackUnderflow { line: line_no })?;
                    output.push_str(&marker::dedent_marker(line_no, state.top_level()));
                }
                if state.top_level() != level {
                    diagnostics.push(
                        Diagnostic::error(
                            format!(
                                "dedent to level {level} does not match any enclosing indentation"
                            ),
                            Span::point(line_no, 1),
                        )
                        .with_code(DiagnosticCode::TWLEX003)
                        .with_note(format!("valid levels: {:?}", state.valid_levels())),
                    );
                }
                output.push_str(&line[..indent_len]);
                output.push_str(content);
            }
            std::cmp::Ordering::Equal => {
                output.push_str(line);
            }
        }

        Ok(())
    }
}

fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{FEFF}').unwrap_or(source)
}

fn char_name(c: char) -> &'static str {
    match c {
        '\t' => "tab",
        ' ' => "space",
        _ => "?",
    }
}

/// Scans the leading run of tab/space characters on a line.
///
/// Returns the byte length of the whitespace prefix, the first whitespace
/// character seen (if any), and a `(expected, found)` pair the first time a
/// different whitespace character appears within that prefix.
fn scan_indent(line: &str) -> (usize, Option<char>, Option<(char, char)>) {
    let mut first: Option<char> = None;
    let mut mismatch: Option<(char, char)> = None;
    let mut len = 0usize;

    for c in line.chars() {
        if c == ' ' || c == '\t' {
            match first {
                None => first = Some(c),
                Some(f) if c != f && mismatch.is_none() => mismatch = Some((f, c)),
                _ => {}
            }
            len += c.len_utf8();
        } else {
            break;
        }
    }

    (len, first, mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> PreprocessOutput {
        Preprocessor::new(source).run().unwrap()
    }

    #[test]
    fn test_no_indentation() {
        let output = run("panic\n");
        assert_eq!(output.text, "panic\n");
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_single_indent_and_eof_dedent() {
        let output = run("type Point\n\tx: i32\n");
        assert!(output.text.contains("\u{27E8}2,1\u{27E9}\u{21E5}"));
        assert!(output.text.ends_with("\u{27E8}2,0\u{27E9}\u{21E4}"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_indent_then_dedent_mid_file() {
        let source = "type Point\n\tx: i32\ny: i32 = 1\n";
        let output = run(source);
        assert!(output.text.contains("\u{27E8}2,1\u{27E9}\u{21E5}"));
        assert!(output.text.contains("\u{27E8}3,0\u{27E9}\u{21E4}"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_blank_lines_preserve_structure() {
        let source = "type Point\n\n\tx: i32\n";
        let output = run(source);
        assert!(output.text.contains("\u{27E8}3,1\u{27E9}\u{21E5}"));
    }

    #[test]
    fn test_over_indent_emits_twlex004() {
        // Unit is 1 tab (fixed on line 2); line 3 jumps straight to level 3.
        let source = "type Point\n\tx: i32\n\t\t\ty: i32\n";
        let output = run(source);
        assert!(output
            .diagnostics
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::TWLEX004)));
    }

    #[test]
    fn test_dedent_to_unknown_level_emits_twlex003() {
        // Level 2 is never pushed onto the stack (3 jumps straight from 1), so
        // dedenting to 2 has no enclosing frame to land on.
        let source = "type Point\n\tx: i32\n\t\t\ty: i32\n\t\tz: i32\n";
        let output = run(source);
        assert!(output
            .diagnostics
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::TWLEX003)));
    }

    #[test]
    fn test_mixed_indentation_emits_twlex001() {
        let source = "type Point\n \tx: i32\n";
        let output = run(source);
        assert!(output
            .diagnostics
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::TWLEX001)));
    }

    #[test]
    fn test_file_wide_mismatch_emits_twlex005() {
        let source = "type Point\n\tx: i32\n    y: i32\n";
        let output = run(source);
        assert!(output
            .diagnostics
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::TWLEX005)));
    }

    #[test]
    fn test_bom_is_stripped() {
        let source = "\u{FEFF}panic\n";
        let output = run(source);
        assert_eq!(output.text, "panic\n");
    }

    #[test]
    fn test_use_spaces_directive_consumed() {
        let source = "\"use spaces\"\ntype Point\n  x: i32\n";
        let output = run(source);
        assert!(!output.text.starts_with("\"use spaces\""));
        assert!(output.text.contains("\u{27E8}3,1\u{27E9}\u{21E5}"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_use_spaces_directive_single_quoted() {
        let source = "'use spaces'\ntype Point\n  x: i32\n";
        let output = run(source);
        assert!(!output.text.starts_with("'use spaces'"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_source_produces_no_markers() {
        let output = run("");
        assert_eq!(output.text, "");
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_multiple_eof_dedents() {
        let source = "type Point\n\tx: i32\n\t\ty: i32\n";
        let output = run(source);
        assert!(output.text.contains("\u{27E8}3,1\u{27E9}\u{21E4}"));
        assert!(output.text.contains("\u{27E8}3,0\u{27E9}\u{21E4}"));
    }
}
