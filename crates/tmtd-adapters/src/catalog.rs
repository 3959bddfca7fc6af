//! Model catalog.
//!
//! Walks the search directories and collects every Thing Model found there
//! (`*.jsonld` and `*.tm.json` files) together with its `title`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// One model file found in the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub path: PathBuf,
    /// The model's `title`, when it has a string one.
    pub title: Option<String>,
}

/// Everything found in a search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogListing {
    pub models: Vec<ModelEntry>,
    /// Search directories that do not exist.
    pub missing: Vec<PathBuf>,
}

/// Lists models below a set of directories.
#[derive(Debug, Clone)]
pub struct Catalog {
    search_path: Vec<PathBuf>,
}

impl Catalog {
    /// Create a catalog. An empty search path behaves as `["."]`.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        let search_path = if search_path.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            search_path
        };
        Self { search_path }
    }

    /// Walk every search directory.
    ///
    /// Unreadable or malformed files are skipped with a `WARN` log rather
    /// than failing the whole listing.
    #[instrument(skip(self))]
    pub fn list(&self) -> CatalogListing {
        let mut listing = CatalogListing::default();
        for dir in &self.search_path {
            if !dir.is_dir() {
                warn!(dir = %dir.display(), "search directory not found");
                listing.missing.push(dir.clone());
                continue;
            }
            self.collect(dir, &mut listing.models);
        }
        debug!(count = listing.models.len(), "finished listing models");
        listing
    }

    fn collect(&self, dir: &Path, models: &mut Vec<ModelEntry>) {
        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "directory walk error");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_model_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        found.sort();

        for path in found {
            match read_title(&path) {
                Ok(title) => models.push(ModelEntry { path, title }),
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "skipping unreadable model");
                }
            }
        }
    }
}

/// `*.jsonld` or `*.tm.json`.
pub fn is_model_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".jsonld") || name.ends_with(".tm.json")
}

fn read_title(path: &Path) -> Result<Option<String>, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let doc: Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    Ok(doc
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string))
}
