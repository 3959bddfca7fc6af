//! tmtd Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the tmtd
//! Thing Model resolver, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             tmtd-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │        (BuildService, Processor)        │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: DocumentLoader, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      tmtd-adapters (Infrastructure)     │
//! │ (SearchPathLoader, LocalFilesystem, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (PathCursor, merge, fold, print, ...)   │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tmtd_core::prelude::*;
//!
//! # fn run(loader: Box<dyn DocumentLoader>, fs: Box<dyn Filesystem>) -> TmtdResult<()> {
//! let service = BuildService::new(loader, fs);
//! let variables = service.load_variables(Some("vars.json"))?;
//! let report = service.build("lamp.tm.json", &variables, &OutputTarget::parse("out"))?;
//! println!("{} bytes", report.bytes());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildReport, BuildService, OutputTarget, Processor, Resolution,
        ports::{DocumentLoader, Filesystem},
    };
    pub use crate::domain::{PathCursor, PathPattern, Variables, print};
    pub use crate::error::{TmtdError, TmtdResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
