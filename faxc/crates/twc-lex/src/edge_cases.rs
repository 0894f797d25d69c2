//! Edge case tests for twc-lex
