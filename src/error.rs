//! Error types shared by the resolver, agent loader, and config manager.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by every public operation of the crate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource or path is absent.
    #[error("{0}")]
    NotFound(String),

    /// Agent could not be resolved; `reason` carries the resolver's explanation.
    #[error("Agent '{name}' not found: {reason}")]
    AgentNotFound { name: String, reason: String },

    /// Resource exists but cannot be read.
    #[error("{0}")]
    Unreadable(String),

    /// Malformed YAML.
    #[error("Failed to parse {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    /// Well-formed document missing mandatory semantic fields.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Configuration document missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unexpected filesystem fault.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Short machine-friendly label for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) | ApiError::AgentNotFound { .. } => "not_found",
            ApiError::Unreadable(_) => "unreadable",
            ApiError::ParseError { .. } => "parse_error",
            ApiError::ValidationError(_) => "validation_error",
            ApiError::ConfigError(_) => "config_error",
            ApiError::IoError(_) => "io_error",
        }
    }
}
