//! Outcome of resolving a `(type, name)` pair.

use crate::error::ApiError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Why a resolution did not produce content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissCause {
    /// Nothing exists at the attempted path.
    Missing,
    /// The file exists but read permission is denied.
    Unreadable,
    /// The name would escape the resource directory.
    InvalidName,
    /// The file passed the permission probe but reading it failed.
    ReadFailed,
}

/// Either the resolved file with its full text, or a reason it was not produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionResult {
    Found { path: PathBuf, content: String },
    NotFound { cause: MissCause, reason: String },
}

impl ResolutionResult {
    pub(crate) fn not_found(cause: MissCause, reason: String) -> Self {
        ResolutionResult::NotFound { cause, reason }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolutionResult::Found { path, .. } => Some(path),
            ResolutionResult::NotFound { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ResolutionResult::Found { content, .. } => Some(content),
            ResolutionResult::NotFound { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ResolutionResult::Found { .. } => None,
            ResolutionResult::NotFound { reason, .. } => Some(reason),
        }
    }

    pub fn cause(&self) -> Option<MissCause> {
        match self {
            ResolutionResult::Found { .. } => None,
            ResolutionResult::NotFound { cause, .. } => Some(*cause),
        }
    }

    /// Convert into `(path, content)` or the error matching the miss cause.
    pub fn into_result(self) -> Result<(PathBuf, String), ApiError> {
        match self {
            ResolutionResult::Found { path, content } => Ok((path, content)),
            ResolutionResult::NotFound { cause, reason } => Err(match cause {
                MissCause::Missing | MissCause::InvalidName => ApiError::NotFound(reason),
                MissCause::Unreadable => ApiError::Unreadable(reason),
                MissCause::ReadFailed => ApiError::IoError(reason),
            }),
        }
    }
}
