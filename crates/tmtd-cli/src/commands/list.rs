//! Implementation of the `tmtd list` command.

use serde_json::json;

use tmtd_adapters::{Catalog, parse_search_path};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let search_path = args.search_path.unwrap_or(config.search_path);
    let listing = Catalog::new(parse_search_path(&search_path)).list();

    for dir in &listing.missing {
        output.warning(&format!("search directory not found: {}", dir.display()))?;
    }

    match args.format {
        ListFormat::Table => {
            output.header("Thing Models:")?;
            if listing.models.is_empty() {
                output.print("  (none)")?;
            }
            for model in &listing.models {
                let title = model.title.as_deref().unwrap_or("-");
                output.print(&format!(
                    "  {}  {}",
                    model.path.display(),
                    output.dim(title)
                ))?;
            }
        }

        ListFormat::List => {
            for model in &listing.models {
                output.document(&model.path.display().to_string())?;
            }
        }

        ListFormat::Json => {
            // JSON must stay parseable in pipes and in quiet mode.
            let entries: Vec<_> = listing
                .models
                .iter()
                .map(|m| json!({"path": m.path.display().to_string(), "title": m.title}))
                .collect();
            let text = serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".into());
            output.document(&text)?;
        }
    }

    Ok(())
}
