//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! Codes follow the catalog format `TW<PHASE><NNN>`: an uppercase phase tag
//! (`LEX`, `PARSE`, `CHECK`, `GEN`, `CLI`) followed by a three-digit number.
//!
//! # Examples
//!
//! ```
//! use twc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::TWLEX001;
//! assert_eq!(code.prefix(), "TWLEX");
//! assert_eq!(code.number(), 1);
//! assert_eq!(code.as_str(), "TWLEX001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where `prefix` is
/// `TW` followed by a phase tag (`LEX`, `PARSE`, `CHECK`, `GEN`, `CLI`) and
/// `number` is a three-digit identifier, zero-padded.
///
/// This allows users to reference specific diagnostics in documentation
/// and suppression attributes.
///
/// # Examples
///
/// ```
/// use twc_util::diagnostic::DiagnosticCode;
///
/// let code = DiagnosticCode::new("TWLEX", 1);
/// assert_eq!(code.as_str(), "TWLEX001");
///
/// let check = DiagnosticCode::TWCHECK041;
/// assert_eq!(check.prefix(), "TWCHECK");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The phase prefix, e.g. `TWLEX`, `TWCHECK`
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_util::diagnostic::DiagnosticCode;
    ///
    /// let code = DiagnosticCode::new("TWGEN", 1);
    /// assert_eq!(code.prefix(), "TWGEN");
    /// assert_eq!(code.number(), 1);
    /// ```
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the phase prefix (e.g. `TWLEX`, `TWCHECK`)
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::TWLEX001.prefix(), "TWLEX");
    /// assert_eq!(DiagnosticCode::TWCHECK041.prefix(), "TWCHECK");
    /// ```
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::TWLEX001.number(), 1);
    /// ```
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g. `TWLEX001`, `TWCHECK041`)
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_util::diagnostic::DiagnosticCode;
    ///
    /// assert_eq!(DiagnosticCode::TWLEX001.as_str(), "TWLEX001");
    /// assert_eq!(DiagnosticCode::TWCHECK041.as_str(), "TWCHECK041");
    /// ```
    pub fn as_str(&self) -> String {
        format!("{}{:03}", self.prefix, self.number)
    }

    // =========================================================================
    // PREPROCESSOR / LEXER (TWLEX001-TWLEX006)
    // =========================================================================

    /// TWLEX001: mixed tabs and spaces on a single line
    pub const TWLEX001: Self = Self::new("TWLEX", 1);
    /// TWLEX002: indent width is not a multiple of the established unit
    pub const TWLEX002: Self = Self::new("TWLEX", 2);
    /// TWLEX003: dedent targets a level never pushed onto the indent stack
    pub const TWLEX003: Self = Self::new("TWLEX", 3);
    /// TWLEX004: indent jumps more than one level at once
    pub const TWLEX004: Self = Self::new("TWLEX", 4);
    /// TWLEX005: file-wide indentation character mismatch
    pub const TWLEX005: Self = Self::new("TWLEX", 5);
    /// TWLEX006: unknown character, skipped
    pub const TWLEX006: Self = Self::new("TWLEX", 6);

    // =========================================================================
    // PARSER (TWPARSE001)
    // =========================================================================

    /// TWPARSE001: syntax error, parser stopped
    pub const TWPARSE001: Self = Self::new("TWPARSE", 1);

    // =========================================================================
    // CHECKER (TWCHECK010-TWCHECK050)
    // =========================================================================

    /// TWCHECK010: reference to an undefined user type
    pub const TWCHECK010: Self = Self::new("TWCHECK", 10);
    /// TWCHECK012: unsupported nested aggregate literal
    pub const TWCHECK012: Self = Self::new("TWCHECK", 12);
    /// TWCHECK013: use of an identifier before its binding
    pub const TWCHECK013: Self = Self::new("TWCHECK", 13);
    /// TWCHECK014: integer literal out of range for its target type
    pub const TWCHECK014: Self = Self::new("TWCHECK", 14);
    /// TWCHECK015: unary negation applied to a non-literal operand
    pub const TWCHECK015: Self = Self::new("TWCHECK", 15);
    /// TWCHECK017: float literal out of range for its target type
    pub const TWCHECK017: Self = Self::new("TWCHECK", 17);
    /// TWCHECK018: non-integer pattern matched against an integer scrutinee
    pub const TWCHECK018: Self = Self::new("TWCHECK", 18);
    /// TWCHECK020: match expression missing a trailing catch-all arm
    pub const TWCHECK020: Self = Self::new("TWCHECK", 20);
    /// TWCHECK021: integer-only operator applied to a float operand
    pub const TWCHECK021: Self = Self::new("TWCHECK", 21);
    /// TWCHECK022: binary operator operands have different types
    pub const TWCHECK022: Self = Self::new("TWCHECK", 22);
    /// TWCHECK023: ambiguous `!=` inside a chained comparison
    pub const TWCHECK023: Self = Self::new("TWCHECK", 23);
    /// TWCHECK024: logical operator applied to a non-integer operand
    pub const TWCHECK024: Self = Self::new("TWCHECK", 24);
    /// TWCHECK025: division by a literal zero
    pub const TWCHECK025: Self = Self::new("TWCHECK", 25);
    /// TWCHECK026: duplicate field name in a record type declaration
    pub const TWCHECK026: Self = Self::new("TWCHECK", 26);
    /// TWCHECK027: record initializer missing a declared field
    pub const TWCHECK027: Self = Self::new("TWCHECK", 27);
    /// TWCHECK028: record initializer names an unknown field
    pub const TWCHECK028: Self = Self::new("TWCHECK", 28);
    /// TWCHECK029: record initializer initializes a field twice
    pub const TWCHECK029: Self = Self::new("TWCHECK", 29);
    /// TWCHECK030: field access names an unknown field
    pub const TWCHECK030: Self = Self::new("TWCHECK", 30);
    /// TWCHECK031: field or index access on a non-aggregate value
    pub const TWCHECK031: Self = Self::new("TWCHECK", 31);
    /// TWCHECK032: recursive record type detected
    pub const TWCHECK032: Self = Self::new("TWCHECK", 32);
    /// TWCHECK033: nested record initializer names the wrong record type
    pub const TWCHECK033: Self = Self::new("TWCHECK", 33);
    /// TWCHECK034: constant list index out of bounds
    pub const TWCHECK034: Self = Self::new("TWCHECK", 34);
    /// TWCHECK035: non-constant list index (unsupported)
    pub const TWCHECK035: Self = Self::new("TWCHECK", 35);
    /// TWCHECK036: list `size` hint is not a positive integer
    pub const TWCHECK036: Self = Self::new("TWCHECK", 36);
    /// TWCHECK037: list literal length does not match its declared size
    pub const TWCHECK037: Self = Self::new("TWCHECK", 37);
    /// TWCHECK040: refinement hint applied to a non-integer base type
    pub const TWCHECK040: Self = Self::new("TWCHECK", 40);
    /// TWCHECK041: value violates a refined type's min/max bound
    pub const TWCHECK041: Self = Self::new("TWCHECK", 41);
    /// TWCHECK050: statement is unreachable after a `panic` (warning)
    pub const TWCHECK050: Self = Self::new("TWCHECK", 50);

    // =========================================================================
    // CODE GENERATOR (TWGEN001)
    // =========================================================================

    /// TWGEN001: empty instruction stream, nothing to generate
    pub const TWGEN001: Self = Self::new("TWGEN", 1);

    // =========================================================================
    // CLI (TWCLI001, TWCLI004)
    // =========================================================================

    /// TWCLI001: input file does not exist
    pub const TWCLI001: Self = Self::new("TWCLI", 1);
    /// TWCLI004: unknown output format passed to `-t`
    pub const TWCLI004: Self = Self::new("TWCLI", 4);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
