//! Application layer errors.
//!
//! These errors represent failures in loading and writing documents, not in
//! their structure. Structural problems are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a build.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No search directory contains the requested file.
    #[error("file '{file}' not found in search path [{}]", display_paths(.searched))]
    NotFound { file: String, searched: Vec<PathBuf> },

    /// The first matching file is not well-formed JSON.
    #[error("unable to read valid json from {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory adapter state is unusable (lock poisoned).
    #[error("adapter state lock poisoned")]
    LockPoisoned,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { file, searched } => vec![
                format!("'{}' was searched in {} director(y/ies)", file, searched.len()),
                "Add the model's directory with --searchPath dir1,dir2".into(),
                "Run: tmtd list -s <dir> to see the models that can be found".into(),
            ],
            Self::ParseError { path, .. } => vec![
                format!("Fix the JSON syntax in {}", path.display()),
                "Only the first matching file in the search path is read".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ParseError { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_search_path() {
        let err = ApplicationError::NotFound {
            file: "lamp.tm.json".into(),
            searched: vec![PathBuf::from("models"), PathBuf::from(".")],
        };
        assert_eq!(
            err.to_string(),
            "file 'lamp.tm.json' not found in search path [models, .]"
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
