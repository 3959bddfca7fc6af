//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogLevel};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tmtd",
    bin_name = "tmtd",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Thing Model to Thing Description resolver",
    long_about = "tmtd resolves a partially abstract W3C WoT Thing Model into a \
                  concrete Thing Description: tm:extends, tm:submodel and tm:ref \
                  are resolved and {{placeholders}} substituted.",
    after_help = "EXAMPLES:\n\
        \x20 tmtd build lamp.tm.json -o -\n\
        \x20 tmtd build lamp.tm.json -o out -s models,lib -m vars.json\n\
        \x20 tmtd list -s models\n\
        \x20 tmtd completions bash > /usr/share/bash-completion/completions/tmtd",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a Thing Model into a Thing Description.
    #[command(
        visible_alias = "b",
        about = "Build a Thing Description",
        after_help = "EXAMPLES:\n\
            \x20 tmtd build lamp.tm.json -o -                 # print to console\n\
            \x20 tmtd build lamp.tm.json -o out               # writes out/lamp.td.json\n\
            \x20 tmtd build lamp.tm.json -s models,lib -m vars.json -o out"
    )]
    Build(BuildArgs),

    /// List the models found in the search path.
    #[command(
        visible_alias = "ls",
        about = "List Thing Models",
        after_help = "EXAMPLES:\n\
            \x20 tmtd list\n\
            \x20 tmtd list -s models,lib\n\
            \x20 tmtd list --format json"
    )]
    List(ListArgs),

    /// Initialise a tmtd configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 tmtd init           # global config\n\
            \x20 tmtd init --local   # .tmtd.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tmtd completions bash > ~/.local/share/bash-completion/completions/tmtd\n\
            \x20 tmtd completions zsh  > ~/.zfunc/_tmtd\n\
            \x20 tmtd completions fish > ~/.config/fish/completions/tmtd.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the tmtd configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tmtd config get search_path\n\
            \x20 tmtd config list\n\
            \x20 tmtd config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `tmtd build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Root Thing Model, looked up in the search path.
    #[arg(value_name = "FILE", help = "Thing Model file name")]
    pub file: String,

    /// `-` prints to the console, empty writes nothing, anything else is a
    /// directory (created as needed).
    #[arg(
        short = 'o',
        long = "outputDir",
        visible_alias = "output-dir",
        value_name = "DIR",
        allow_hyphen_values = true,
        help = "Output directory, '-' for console"
    )]
    pub output_dir: Option<String>,

    /// Comma-separated directories searched for models and variable files.
    #[arg(
        short = 's',
        long = "searchPath",
        visible_alias = "search-path",
        value_name = "DIRS",
        help = "Search path, e.g. models,lib (default: .)"
    )]
    pub search_path: Option<String>,

    /// JSON file of flat variables used for {{placeholder}} substitution.
    #[arg(
        short = 'm',
        long = "varmap",
        value_name = "FILE",
        help = "Variable map file"
    )]
    pub varmap: Option<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `tmtd list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Comma-separated directories to walk.
    #[arg(
        short = 's',
        long = "searchPath",
        visible_alias = "search-path",
        value_name = "DIRS",
        help = "Search path (default: configured search_path)"
    )]
    pub search_path: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Path and title per model.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `tmtd init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.tmtd.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tmtd completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `tmtd config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Key name, e.g. `search_path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_command() {
        let cli = Cli::parse_from([
            "tmtd",
            "build",
            "lamp.tm.json",
            "--outputDir",
            "out",
            "--searchPath",
            "models,lib",
            "--varmap",
            "vars.json",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.file, "lamp.tm.json");
        assert_eq!(args.output_dir.as_deref(), Some("out"));
        assert_eq!(args.search_path.as_deref(), Some("models,lib"));
        assert_eq!(args.varmap.as_deref(), Some("vars.json"));
    }

    #[test]
    fn dash_is_accepted_as_output_dir() {
        let cli = Cli::parse_from(["tmtd", "b", "lamp.tm.json", "-o", "-"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.output_dir.as_deref(), Some("-"));
    }

    #[test]
    fn loglevel_is_global() {
        let cli = Cli::parse_from(["tmtd", "list", "--loglevel", "debug"]);
        assert_eq!(cli.global.loglevel, Some(LogLevel::Debug));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["tmtd", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn build_requires_a_file() {
        assert!(Cli::try_parse_from(["tmtd", "build"]).is_err());
    }
}
