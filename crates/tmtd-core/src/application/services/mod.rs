//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build a Thing Description from a model".

pub mod build_service;
pub mod processor;

pub use build_service::{BuildReport, BuildService, OutputTarget, description_file_name};
pub use processor::{Processor, Resolution};
