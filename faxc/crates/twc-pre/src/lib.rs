//! twc-pre - Indentation preprocessor
//!
//! Turns raw, whitespace-indented source text into a single text artifact
//! where the original content is interleaved with INDENT/DEDENT markers.
//! The lexer consumes this marker-decorated text and turns the markers into
//! structural tokens; no later phase re-examines raw whitespace.
//!
//! The state machine tracks one file's indentation character (tab or
//! space) and unit (how many of that character make up one level), fixed
//! either by the first indented line (`detect` mode) or by a `use spaces`
//! directive on the file's first non-blank line (`directive` mode). See
//! [`preprocessor`] for the full algorithm.

pub mod error;
pub mod marker;
pub mod preprocessor;
pub mod state;

pub use error::{PreprocessError, PreprocessResult};
pub use preprocessor::{PreprocessOutput, Preprocessor};
