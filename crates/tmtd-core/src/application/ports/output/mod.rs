//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `tmtd-adapters` crate provides implementations.

use std::path::Path;

use serde_json::Value;

use crate::error::TmtdResult;

/// Port for locating and parsing model documents.
///
/// Implemented by:
/// - `tmtd_adapters::loader::SearchPathLoader` (search directories over a `Filesystem`)
///
/// ## Contract
///
/// - Search directories are tried in order; the first directory where the
///   file exists is the only one read
/// - A missing file yields `ApplicationError::NotFound`
/// - Malformed content yields `ApplicationError::ParseError`
#[cfg_attr(test, mockall::automock)]
pub trait DocumentLoader: Send + Sync {
    /// Load and parse `file_name`.
    fn load(&self, file_name: &str) -> TmtdResult<Value>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tmtd_adapters::filesystem::LocalFilesystem` (production)
/// - `tmtd_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TmtdResult<()>;

    /// Write content to a file (mode 0644 where permissions apply).
    fn write_file(&self, path: &Path, content: &str) -> TmtdResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> TmtdResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
