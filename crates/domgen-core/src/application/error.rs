//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! domain model. Model errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading a domain or writing generated files.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A stub file referenced by a request does not exist.
    #[error("Stub not found: {path}")]
    StubNotFound { path: PathBuf },

    /// The domain description could not be read or parsed.
    #[error("Failed to load domain description from {origin}: {reason}")]
    LoaderFailed { origin: String, reason: String },

    /// In-memory store access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StubNotFound { path } => vec![
                format!("No stub at {}", path.display()),
                "Pass an existing file to --stub".into(),
            ],
            Self::LoaderFailed { origin, .. } => vec![
                format!("Check the syntax of {}", origin),
                "Domain descriptions are TOML (.toml) or JSON (.json)".into(),
                "Run: domgen init to create a configuration with a domain path".into(),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked while holding the lock".into(),
                "Try again".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::StubNotFound { .. } => ErrorCategory::NotFound,
            Self::LoaderFailed { .. } => ErrorCategory::Validation,
        }
    }
}
