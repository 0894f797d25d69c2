//! Internal invariant errors.
//!
//! The parser's public contract never returns a `Result` — syntax problems
//! become a `TWPARSE001` diagnostic plus `succeeded = false`. This type
//! exists only for the rare situation where the parser's own bookkeeping
//! would be violated (mirrors [`twc_pre::error::PreprocessError`]).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("node store underflow: tried to close a subtree before its mark at {mark}")]
    NodeStoreUnderflow { mark: usize },
}
