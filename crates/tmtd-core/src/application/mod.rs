//! Application layer for tmtd.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService, Processor)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Merge, fold and
//! printing rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BuildReport, // DTO returned by a build
    BuildService,
    OutputTarget,
    Processor,
    Resolution,
    description_file_name,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DocumentLoader, Filesystem};

pub use error::ApplicationError;
