//! Error types for the rulecheck CLI
//!
//! Provides structured error types for argument, settings, I/O and parsing
//! failures. Rule violations are not errors; they end up in the report.

use rulecheck_core::SourceError;
use thiserror::Error;

use crate::cli::ExitCode;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Data or rule document could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Settings file is unreadable or malformed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        CliError::FileError(msg.into())
    }

    /// Create a config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::ConfigError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CliError::InvalidInput(_)
                | CliError::FileError(_)
                | CliError::ParseError(_)
                | CliError::ConfigError(_)
        )
    }

    /// Exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidInput(_) | CliError::ConfigError(_) => ExitCode::InvalidInput,
            CliError::FileError(_) | CliError::ParseError(_) => ExitCode::FileError,
            CliError::SerializationError(_) | CliError::InternalError(_) => ExitCode::InternalError,
        }
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        if err.is_io() {
            CliError::FileError(err.to_string())
        } else {
            CliError::ParseError(err.to_string())
        }
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::InvalidInput(err.kind().to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::SerializationError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigError(format!("TOML error: {}", err))
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
