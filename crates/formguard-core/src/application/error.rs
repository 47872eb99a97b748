//! Application layer errors.
//!
//! These errors represent failures in orchestration, not rule logic.
//! Rule definition errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No schema registered under this name.
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// A schema source could not be read or parsed.
    #[error("Failed to load schema from {path}: {reason}")]
    SchemaLoad { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Schema store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SchemaNotFound { name } => vec![
                format!("No schema named '{}'", name),
                "Try: formguard list to see available schemas".into(),
                "Or pass the path to a .toml schema file".into(),
            ],
            Self::SchemaLoad { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file exists and is valid TOML".into(),
            ],
            Self::StoreLockError => vec![
                "The schema store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaNotFound { .. } => ErrorCategory::NotFound,
            Self::SchemaLoad { .. } => ErrorCategory::Validation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
