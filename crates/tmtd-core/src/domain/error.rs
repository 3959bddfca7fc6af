// ============================================================================
// domain/error.rs - STRUCTURAL ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors describe problems with the *shape* of a model, never with
/// I/O. They are:
/// - Cloneable (collected and logged as warnings during a walk)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Shape errors
    // ========================================================================
    #[error("cannot merge {src} into {dest} at depth {depth}")]
    ShapeMismatch {
        dest: &'static str,
        src: &'static str,
        depth: usize,
    },

    #[error("document root must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("section '{section}' must be {expected}, found {found}")]
    InvalidSection {
        section: String,
        expected: &'static str,
        found: &'static str,
    },

    // ========================================================================
    // Reference errors
    // ========================================================================
    #[error("pointer '{pointer}' does not resolve in '{file}'")]
    EvalError { file: String, pointer: String },

    #[error("invalid reference '{0}': expected 'file#/pointer'")]
    InvalidReference(String),

    // ========================================================================
    // Traversal
    // ========================================================================
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("path cursor popped past its root")]
    CursorUnderflow,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ShapeMismatch { .. } => vec![
                "An inherited or referenced fragment disagrees with the local model".into(),
                "Make both sides objects, or drop one of the declarations".into(),
            ],
            Self::RootNotObject { .. } => vec![
                "A Thing Model must be a JSON object at its root".into(),
                "Wrap the content in { ... } and add a \"links\" array".into(),
            ],
            Self::InvalidSection { section, expected, .. } => vec![
                format!("'{section}' should be {expected}"),
                "Check the model against the WoT Thing Model layout".into(),
            ],
            Self::EvalError { file, pointer } => vec![
                format!("Check that '{file}' contains a value at '{pointer}'"),
                "Pointers are written as #/segment/segment".into(),
            ],
            Self::InvalidReference(_) => vec![
                "Write references as \"tm:ref\": \"file.json#/path/to/value\"".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ShapeMismatch { .. }
            | Self::RootNotObject { .. }
            | Self::InvalidSection { .. }
            | Self::InvalidReference(_) => ErrorCategory::Validation,
            Self::EvalError { .. } => ErrorCategory::NotFound,
            Self::InvalidPattern { .. } | Self::CursorUnderflow => ErrorCategory::Internal,
        }
    }
}

/// Short name of a JSON value kind, used in error messages.
pub fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
