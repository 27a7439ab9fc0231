//! Layered error definitions
//!
//! Categorized by source: config / resource / read / write

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Resource Errors =====
    /// Input could not be opened or an output could not be created
    #[error("resource unavailable '{}': {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===== Stream Errors =====
    /// Mid-stream read failure (distinct from end of input)
    #[error("read failure after line {line_number}: {source}")]
    ReadFailure {
        line_number: u64,
        #[source]
        source: std::io::Error,
    },

    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    WriteFailure { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create resource unavailable error
    pub fn resource_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create read failure error
    pub fn read_failure(line_number: u64, source: std::io::Error) -> Self {
        Self::ReadFailure {
            line_number,
            source,
        }
    }

    /// Create sink write error
    pub fn write_failure(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailure {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
