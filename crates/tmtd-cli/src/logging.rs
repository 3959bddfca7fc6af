//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `tmtd-core` and
//! `tmtd-adapters` only *emit* spans and events.
//!
//! # Level selection
//!
//! | Flag(s)        | Filter level                   |
//! |----------------|--------------------------------|
//! | `--quiet`      | ERROR                          |
//! | `--loglevel X` | X                              |
//! | `-v`           | INFO                           |
//! | `-vv`          | DEBUG                          |
//! | `-vvv`         | TRACE                          |
//! | (none)         | config `loglevel` (default OFF)|
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, LogLevel};

/// Crates whose events are shown.
const TARGETS: [&str; 3] = ["tmtd", "tmtd_core", "tmtd_adapters"];

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs, configured: LogLevel) -> anyhow::Result<()> {
    let level = derive_level(args, configured);

    // RUST_LOG wins; otherwise every tmtd crate gets the same level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn filter_directives(level: LogLevel) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Pick the effective level from the flags and the configured default.
fn derive_level(args: &GlobalArgs, configured: LogLevel) -> LogLevel {
    if args.quiet {
        return LogLevel::Error;
    }
    if let Some(level) = args.loglevel {
        return level;
    }
    match args.verbose {
        0 => configured,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}
