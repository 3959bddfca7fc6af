//! Implementation of the `tmtd build` command.

use tracing::{debug, warn};

use tmtd_adapters::{LocalFilesystem, SearchPathLoader, parse_search_path};
use tmtd_core::{
    application::{BuildService, OutputTarget},
    domain::Variables,
};

use crate::{
    cli::BuildArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Flags merged with configured defaults.
#[derive(Debug, Clone, PartialEq)]
struct BuildPlan {
    file: String,
    search_path: String,
    target: OutputTarget,
    varmap: Option<String>,
}

impl BuildPlan {
    fn new(args: BuildArgs, config: &AppConfig) -> CliResult<Self> {
        if args.file.trim().is_empty() {
            return Err(CliError::InvalidInput {
                message: "the Thing Model file name is empty".into(),
                source: None,
            });
        }
        let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
        Ok(Self {
            file: args.file,
            search_path: args
                .search_path
                .unwrap_or_else(|| config.search_path.clone()),
            target: OutputTarget::parse(&output_dir),
            varmap: args.varmap.or_else(|| config.varmap.clone()),
        })
    }
}

pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let plan = BuildPlan::new(args, &config)?;
    debug!(?plan, "build plan");

    let loader = SearchPathLoader::new(LocalFilesystem::new(), parse_search_path(&plan.search_path));
    let service = BuildService::new(Box::new(loader), Box::new(LocalFilesystem::new()));

    // A broken variable map is not fatal: placeholders simply stay as written.
    let variables = match service.load_variables(plan.varmap.as_deref()) {
        Ok(variables) => variables,
        Err(e) => {
            warn!(error = %e, "variable map ignored");
            Variables::new()
        }
    };

    let report = service.build(&plan.file, &variables, &plan.target)?;

    match (&plan.target, &report.written) {
        (OutputTarget::Stdout, _) => output.document(&report.rendered)?,
        (OutputTarget::Directory(_), Some(path)) => output.success(&format!(
            "Wrote {} ({} bytes)",
            path.display(),
            report.bytes()
        ))?,
        _ => output.info(&format!("Resolved {} (no output written)", report.model))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(output_dir: Option<&str>, search_path: Option<&str>) -> BuildArgs {
        BuildArgs {
            file: "lamp.tm.json".into(),
            output_dir: output_dir.map(str::to_string),
            search_path: search_path.map(str::to_string),
            varmap: None,
        }
    }

    #[test]
    fn flags_win_over_config() {
        let config = AppConfig {
            search_path: "models".into(),
            output_dir: "out".into(),
            varmap: Some("vars.json".into()),
            ..AppConfig::default()
        };
        let plan = BuildPlan::new(args(Some("-"), Some("a,b")), &config).unwrap();
        assert_eq!(plan.search_path, "a,b");
        assert_eq!(plan.target, OutputTarget::Stdout);
        assert_eq!(plan.varmap.as_deref(), Some("vars.json"));
    }

    #[test]
    fn config_fills_missing_flags() {
        let config = AppConfig {
            output_dir: "out".into(),
            ..AppConfig::default()
        };
        let plan = BuildPlan::new(args(None, None), &config).unwrap();
        assert_eq!(plan.search_path, ".");
        assert_eq!(plan.target, OutputTarget::Directory(PathBuf::from("out")));
        assert!(plan.varmap.is_none());
    }

    #[test]
    fn blank_file_is_invalid_input() {
        let mut a = args(None, None);
        a.file = "  ".into();
        assert!(matches!(
            BuildPlan::new(a, &AppConfig::default()),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
