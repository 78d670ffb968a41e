//! Application layer errors.
//!
//! These errors represent failures in orchestration, not generation rules.
//! Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Rendering a source unit to text failed.
    #[error("Rendering {artifact} failed: {reason}")]
    RenderingFailed { artifact: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A model-definition file could not be read or parsed.
    #[error("Cannot load model definition {path}: {reason}")]
    InputLoad { path: PathBuf, reason: String },

    /// A model-definition file has an extension no loader understands.
    #[error("Unsupported model definition format: {path}")]
    UnsupportedInputFormat { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure --app-dir points at your application sources".into(),
            ],
            Self::InputLoad { path, .. } => vec![
                format!("Check the syntax of {}", path.display()),
                "Model definitions are TOML or JSON".into(),
            ],
            Self::UnsupportedInputFormat { .. } => {
                vec!["Use a .toml or .json model definition".into()]
            }
            Self::LockPoisoned => vec!["A previous operation panicked; retry the command".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::LockPoisoned | Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::ValidationFailed(_) | Self::InputLoad { .. } => ErrorCategory::Validation,
            Self::UnsupportedInputFormat { .. } => ErrorCategory::Validation,
        }
    }
}
