//! Unified error handling for tmtd core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for tmtd core operations.
///
/// This enum wraps all possible errors that can occur when using tmtd-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum TmtdError {
    /// Errors from the domain layer (malformed model structure).
    #[error("Model error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading and writing).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TmtdError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// `true` when the error means a document could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::NotFound { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type TmtdResult<T> = Result<T, TmtdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_categories_are_carried_over() {
        let err: TmtdError = DomainError::EvalError {
            file: "a.json".into(),
            pointer: "#/x".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_not_found());
    }

    #[test]
    fn configuration_errors_have_suggestions() {
        let err = TmtdError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.suggestions().is_empty());
    }
}
