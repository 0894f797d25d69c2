//! State carried across lines by the indentation state machine.

/// Which whitespace character a file has committed to for indentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentChar {
    Tab,
    Space,
}

impl IndentChar {
    pub fn as_char(self) -> char {
        match self {
            IndentChar::Tab => '\t',
            IndentChar::Space => ' ',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\t' => Some(IndentChar::Tab),
            ' ' => Some(IndentChar::Space),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndentChar::Tab => "tab",
            IndentChar::Space => "space",
        }
    }
}

/// How the file's indentation type was (or will be) established.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The first indented line fixes the character and unit.
    Detect,
    /// A `"use spaces"` / `'use spaces'` directive fixed the character.
    Directive,
}

/// One entry on the indent stack: the level it represents and the line it was opened on.
#[derive(Clone, Copy, Debug)]
pub struct IndentFrame {
    pub level: u32,
    pub line: u32,
}

/// Running state of the indentation state machine over the course of one file.
pub struct IndentState {
    pub mode: Mode,
    pub expected_indent_type: Option<IndentChar>,
    pub indent_unit: Option<usize>,
    pub established_line: Option<u32>,
    pub stack: Vec<IndentFrame>,
    pub directive_found: bool,
}

impl IndentState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Detect,
            expected_indent_type: None,
            indent_unit: None,
            established_line: None,
            stack: Vec::new(),
            directive_found: false,
        }
    }

    /// The indent level of the line currently at the top of the stack, or 0 at the base.
    pub fn top_level(&self) -> u32 {
        self.stack.last().map(|f| f.level).unwrap_or(0)
    }

    /// Levels currently reachable by a dedent, including the implicit base level 0.
    pub fn valid_levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = std::iter::once(0)
            .chain(self.stack.iter().map(|f| f.level))
            .collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }
}

impl Default for IndentState {
    fn default() -> Self {
        Self::new()
    }
}
