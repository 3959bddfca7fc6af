//! `file#/json/pointer` references.

use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// A reference to a fragment of another document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// File part, resolved through the document loader.
    pub file: String,
    /// Pointer part, without the leading `#`.
    pub pointer: String,
}

impl Reference {
    /// Split on the first `#`. A reference without `#` addresses the whole
    /// document.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let (file, pointer) = raw.split_once('#').unwrap_or((raw, ""));
        if file.is_empty() {
            return Err(DomainError::InvalidReference(raw.to_string()));
        }
        Ok(Self {
            file: file.to_string(),
            pointer: pointer.to_string(),
        })
    }

    /// Resolve the pointer inside `document`, the already loaded file.
    pub fn evaluate<'a>(&self, document: &'a Value) -> Result<&'a Value, DomainError> {
        evaluate(document, &self.pointer).ok_or_else(|| DomainError::EvalError {
            file: self.file.clone(),
            pointer: format!("#{}", self.pointer),
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file, self.pointer)
    }
}

/// Evaluate a pointer such as `#/a/b`, `/a/b` or `a/b` against `document`.
///
/// Segments address object keys or list indices. `~1` and `~0` escapes are
/// honoured. An empty pointer yields the document itself.
pub fn evaluate<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    let trimmed = pointer.strip_prefix('#').unwrap_or(pointer);
    match trimmed {
        "" | "/" => Some(document),
        p if p.starts_with('/') => document.pointer(p),
        p => document.pointer(&format!("/{p}")),
    }
}

/// Like [`evaluate`], for a document root held as an object.
///
/// The empty pointer has no value to return here and yields `None`.
pub fn evaluate_in_object<'a>(root: &'a Map<String, Value>, pointer: &str) -> Option<&'a Value> {
    let trimmed = pointer.strip_prefix('#').unwrap_or(pointer);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    let key = first.replace("~1", "/").replace("~0", "~");
    let value = root.get(&key)?;
    if rest.is_empty() {
        Some(value)
    } else {
        value.pointer(&format!("/{rest}"))
    }
}
