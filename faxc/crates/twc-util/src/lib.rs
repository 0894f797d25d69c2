//! twc-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This module provides fundamental utilities and types that form the foundation
//! of the entire TinyWhale compiler infrastructure. These utilities are designed
//! to be zero-cost abstractions that improve code clarity, type safety, and
//! performance without runtime overhead.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ZERO-COST ABSTRACTIONS
//!    All utilities compile down to efficient code with no runtime penalty
//!    compared to hand-written implementations.
//!
//! 2. TYPE SAFETY
//!    Leverage Rust's type system to prevent bugs at compile time.
//!    Examples: Typed indices prevent mixing different ID spaces.
//!
//! 3. PERFORMANCE
//!    Optimize for the common case while maintaining correctness.
//!    Examples: Efficient string interning, lock-free data structures.
//!
//! 4. ERGONOMICS
//!    APIs should be intuitive and easy to use correctly.
//!    Examples: Builder patterns, type inference-friendly interfaces.
//!
//! ============================================================================
//! ARENA-INDEXED STORES
//! ============================================================================
//!
//! Every cross-phase data structure in TinyWhale (strings, floats, tokens,
//! parse nodes, types, symbols, SemIR instructions) lives in a dense,
//! append-only [`index_vec::IndexVec`] addressed by a branded integer id
//! (see [`define_idx`]). No store is ever mutated in place once a later
//! compiler phase has observed it.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::Symbol;

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

/// Macro to define a branded arena index type backed by `u32`.
///
/// Generates a `Copy` newtype implementing [`Idx`] so it can address an
/// [`IndexVec`]. Every TinyWhale store id (`StringId`, `TokenId`, `NodeId`,
/// ...) is produced by this macro rather than hand-rolled.
///
/// # Examples
///
/// ```
/// use twc_util::{define_idx, IndexVec};
///
/// define_idx!(ExampleId);
///
/// let mut store: IndexVec<ExampleId, &str> = IndexVec::new();
/// let id = store.push("hello");
/// assert_eq!(store[id], "hello");
/// ```
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
