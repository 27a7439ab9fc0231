//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Input path names a directory
    #[error("Input is a directory, expected a file: {path}")]
    InputIsDirectory { path: String },

    /// Configuration file or override rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] contracts::ContractError),
}

impl CliError {
    pub fn input_is_directory(path: impl Into<String>) -> Self {
        Self::InputIsDirectory { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
