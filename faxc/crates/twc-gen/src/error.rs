//! Error types for WebAssembly code generation.
//!
//! This module defines error types for the twc-gen crate, providing proper
//! error handling instead of panics.

use thiserror::Error;

/// Error type for WebAssembly code generation
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// The instruction stream is empty (TWGEN001): there is nothing to emit.
    #[error("empty program: nothing to compile")]
    EmptyProgram,

    /// A binary operator has no wasm lowering for its operand type/token
    /// combination. Shouldn't occur for SemIR produced by a succeeded check.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// `wasmprinter` failed to render the assembled binary as text.
    #[error("failed to render module text: {0}")]
    Print(String),
}

/// Result type alias for code generation operations
pub type Result<T> = std::result::Result<T, CodeGenError>;
