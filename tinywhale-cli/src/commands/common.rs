//! Common message templates shared across tinywhale commands.

/// Standard error message templates.
pub mod error_messages {
    /// Error when input path does not exist.
    pub const INPUT_PATH_NOT_EXIST: &str = "input path does not exist:";

    /// Error when input path is not a file.
    pub const INPUT_PATH_NOT_FILE: &str = "input path is not a file:";

    /// Error when output path is not a directory.
    pub const OUTPUT_PATH_NOT_DIR: &str = "output path is not a directory:";

    /// Error when an unknown output format is specified.
    pub const UNKNOWN_FORMAT: &str = "unknown output format:";
}

/// Standard output message templates.
pub mod output_messages {
    /// Generic info message format.
    pub const INFO: &str = "ℹ️";

    /// Generic warning message format.
    pub const WARNING: &str = "⚠️";

    /// Message when a directory is created.
    pub const CREATED_DIR: &str = "✅ created directory:";

    /// Message when a build artifact is written.
    pub const WROTE_FILE: &str = "✅ wrote:";
}
