//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables prefixed `TMTD_` (`.env` is loaded first)
//! 3. `--config FILE`, else `.tmtd.toml` in the CWD, else the global file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::LogLevel;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".tmtd.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "TMTD";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level used when neither `--loglevel` nor `-v` is given.
    pub loglevel: String,
    /// Comma-separated search path used when `--searchPath` is absent.
    pub search_path: String,
    /// Output used when `--outputDir` is absent (`-`, empty or a directory).
    pub output_dir: String,
    /// Variable map used when `--varmap` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varmap: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loglevel: LogLevel::Off.to_string(),
            search_path: ".".into(),
            output_dir: String::new(),
            varmap: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config files and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. The implicit files are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(config_file.map(PathBuf::as_path), &Self::config_path())
    }

    fn load_from(config_file: Option<&Path>, global: &Path) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("loglevel", defaults.loglevel)?
            .set_default("search_path", defaults.search_path)?
            .set_default("output_dir", defaults.output_dir)?;

        builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder
                .add_source(config::File::from(global).required(false))
                .add_source(config::File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let settings = builder.build().context("failed to read configuration")?;
        let config: Self = settings
            .try_deserialize()
            .context("invalid configuration values")?;

        if LogLevel::parse(&config.loglevel).is_none() {
            anyhow::bail!(
                "invalid loglevel '{}' (expected error, warn, info, debug, trace or off)",
                config.loglevel
            );
        }
        Ok(config)
    }

    /// Configured log level.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.loglevel).unwrap_or(LogLevel::Off)
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tmtd.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "innomotics", "tmtd")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a single key as text.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "loglevel" => Some(self.loglevel.clone()),
            "search_path" => Some(self.search_path.clone()),
            "output_dir" => Some(self.output_dir.clone()),
            "varmap" => Some(self.varmap.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.log_level(), LogLevel::Off);
        assert_eq!(cfg.search_path, ".");
        assert!(cfg.output_dir.is_empty());
        assert!(cfg.varmap.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tmtd.toml");
        std::fs::write(
            &path,
            "loglevel = \"debug\"\nsearch_path = \"models,lib\"\nvarmap = \"vars.json\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some(&path), &temp.path().join("none.toml")).unwrap();
        assert_eq!(cfg.log_level(), LogLevel::Debug);
        assert_eq!(cfg.search_path, "models,lib");
        assert_eq!(cfg.output_dir, "");
        assert_eq!(cfg.varmap.as_deref(), Some("vars.json"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(AppConfig::load_from(Some(&missing), &missing).is_err());
    }

    #[test]
    fn invalid_loglevel_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tmtd.toml");
        std::fs::write(&path, "loglevel = \"loud\"\n").unwrap();
        assert!(AppConfig::load_from(Some(&path), &path).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("search_path").as_deref(), Some("."));
        assert_eq!(cfg.get("varmap").as_deref(), Some(""));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }

    #[test]
    fn serialises_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("search_path = \".\""));
        assert!(!text.contains("varmap"));
    }
}
