//! Infrastructure adapters for tmtd.
//!
//! This crate implements the ports defined in `tmtd-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod loader;

// Re-export commonly used adapters
pub use catalog::{Catalog, CatalogListing, ModelEntry};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use loader::{SearchPathLoader, parse_search_path};
