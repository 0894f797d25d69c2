//! Error handling for the tinywhale CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the tinywhale CLI application.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error when a required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error when input validation fails (bad path, bad flag combination).
    #[error("validation error: {0}")]
    Validation(String),

    /// Compilation reported one or more errors.
    #[error(transparent)]
    Compile(#[from] twc_drv::CompileError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using CliError.
pub type Result<T> = std::result::Result<T, CliError>;
