//! `Filesystem` port implementations.
//!
//! [`LocalFilesystem`] backs the CLI. [`MemoryFilesystem`] lets the loader
//! and build tests run without touching disk.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
