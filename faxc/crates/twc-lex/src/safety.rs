//! Property-based safety checks over arbitrary byte input.
//!
//! These don't assert anything about what the lexer *should* produce for a
//! given input, only that it upholds its never-throws contract: it always
//! terminates, always yields at least one token overall (the synthetic
//! `Eof`), and its `Indent`/`Dedent` counts stay balanced for any input that
//! happens to contain well-formed marker sequences.
