//! Search-path document loader.
//!
//! Implements the `DocumentLoader` port over any [`Filesystem`]. A file name
//! is looked up in each search directory in order. The first directory that
//! contains it is the only one read: a parse or read failure there is
//! reported as is and later directories are not consulted.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument, trace};

use tmtd_core::{
    application::{
        ApplicationError,
        ports::{DocumentLoader, Filesystem},
    },
    error::TmtdResult,
};

/// Split a comma-separated search path. Blank entries are skipped.
pub fn parse_search_path(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Loads JSON documents from an ordered list of directories.
#[derive(Debug, Clone)]
pub struct SearchPathLoader<F> {
    filesystem: F,
    search_path: Vec<PathBuf>,
}

impl<F: Filesystem> SearchPathLoader<F> {
    /// Create a loader. An empty search path behaves as `["."]`.
    pub fn new(filesystem: F, search_path: Vec<PathBuf>) -> Self {
        let search_path = if search_path.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            search_path
        };
        Self {
            filesystem,
            search_path,
        }
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// The first existing `dir/file_name`, if any.
    pub fn locate(&self, file_name: &str) -> Option<PathBuf> {
        self.search_path
            .iter()
            .map(|dir| dir.join(file_name))
            .inspect(|candidate| trace!(path = %candidate.display(), "probing"))
            .find(|candidate| self.filesystem.exists(candidate))
    }

    fn parse(&self, path: &Path) -> TmtdResult<Value> {
        let text = self.filesystem.read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl<F: Filesystem> DocumentLoader for SearchPathLoader<F> {
    #[instrument(skip(self))]
    fn load(&self, file_name: &str) -> TmtdResult<Value> {
        let Some(path) = self.locate(file_name) else {
            return Err(ApplicationError::NotFound {
                file: file_name.to_string(),
                searched: self.search_path.clone(),
            }
            .into());
        };
        debug!(path = %path.display(), "reading document");
        self.parse(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{LocalFilesystem, MemoryFilesystem};
    use serde_json::json;
    use tempfile::TempDir;
    use tmtd_core::error::TmtdError;

    fn loader(fs: MemoryFilesystem, dirs: &str) -> SearchPathLoader<MemoryFilesystem> {
        SearchPathLoader::new(fs, parse_search_path(dirs))
    }

    #[test]
    fn search_path_parsing() {
        assert_eq!(
            parse_search_path(" models, ,lib ,"),
            vec![PathBuf::from("models"), PathBuf::from("lib")]
        );
        assert!(parse_search_path("").is_empty());
    }

    #[test]
    fn empty_search_path_means_current_directory() {
        let fs = MemoryFilesystem::new().with_file("./a.json", r#"{"a": 1}"#);
        let loader = loader(fs, "");
        assert_eq!(loader.search_path(), &[PathBuf::from(".")]);
        assert_eq!(loader.load("a.json").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn first_directory_containing_the_file_wins() {
        let fs = MemoryFilesystem::new()
            .with_file("second/m.json", r#"{"from": "second"}"#)
            .with_file("third/m.json", r#"{"from": "third"}"#);
        let loader = loader(fs, "first,second,third");
        assert_eq!(loader.load("m.json").unwrap(), json!({"from": "second"}));
    }

    #[test]
    fn malformed_first_match_does_not_fall_back() {
        let fs = MemoryFilesystem::new()
            .with_file("a/m.json", "{ not json")
            .with_file("b/m.json", "{}");
        let err = loader(fs, "a,b").load("m.json").unwrap_err();
        assert!(matches!(
            err,
            TmtdError::Application(ApplicationError::ParseError { ref path, .. })
                if path == Path::new("a/m.json")
        ));
    }

    #[test]
    fn unreadable_first_match_does_not_fall_back() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a");
        let second = temp.path().join("b");
        std::fs::create_dir_all(first.join("m.json")).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(second.join("m.json"), r#"{"from": "b"}"#).unwrap();

        let loader = SearchPathLoader::new(LocalFilesystem::new(), vec![first.clone(), second]);
        let err = loader.load("m.json").unwrap_err();
        let expected = first.join("m.json");
        assert!(matches!(
            err,
            TmtdError::Application(ApplicationError::FilesystemError { ref path, .. })
                if *path == expected
        ));
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let err = loader(MemoryFilesystem::new(), "a,b")
            .load("m.json")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "file 'm.json' not found in search path [a, b]"
        );
    }

    #[test]
    fn key_order_is_preserved() {
        let fs = MemoryFilesystem::new().with_file("./o.json", r#"{"z": 1, "a": 2, "m": 3}"#);
        let doc = loader(fs, ".").load("o.json").unwrap();
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
