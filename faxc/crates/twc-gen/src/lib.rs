//! twc-gen - WebAssembly code generation.
//!
//! Consumes a succeeded [`twc_sem::CheckResult`] and lowers its SemIR
//! instruction stream into a single-function wasm module exported and
//! started as `_start`. See [`wasm::generate`].

pub mod error;
pub mod wasm;
#[cfg(test)]
mod tests;

pub use error::{CodeGenError, Result};
pub use wasm::{generate, GenResult};
