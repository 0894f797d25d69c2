//! Internal error types for the preprocessor.
//!
//! The preprocessor contract promises it never throws on arbitrary input —
//! anything wrong with the *source* becomes a diagnostic in the returned
//! [`crate::PreprocessOutput`], not an `Err`. The error type here only
//! guards against state-machine bugs that should be unreachable for any
//! input, mirroring `twc_util::error`'s pattern of modeling "shouldn't
//! happen" conditions as `Result` rather than `panic!`/`unwrap`.

use thiserror::Error;

/// Internal invariant violations in the indentation state machine.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// The indent stack was popped past empty while dedenting.
    #[error("indent stack underflow at line {line}")]
    StackUnderflow { line: u32 },
}

/// Result type alias for preprocessor operations.
pub type PreprocessResult<T> = std::result::Result<T, PreprocessError>;
