//! clippy-metadata - Command-line interface for the Clippy lint metadata extractor
//!
//! Walks a Clippy source tree and writes the catalog of public lints as JSON.

mod cli;
mod logging;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use clippy_metadata_core::ExtractorConfig;
use clippy_metadata_core::config::{
    load_config_or_default_with_warnings, load_config_with_warnings,
};
use clippy_metadata_core::extractor::{RunSummary, run};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli);

    let summary = execute(&cli)?;
    println!(
        "{} {} lints written to {}",
        "done:".green().bold(),
        summary.stats.emitted,
        summary.output.display()
    );
    Ok(())
}

fn execute(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = resolve_config(cli)?;

    run(&cli.source_root, &cli.output, config).with_context(|| {
        format!(
            "Failed to extract lint metadata from {}",
            cli.source_root.display()
        )
    })
}

/// Loads the configuration and applies the command-line overrides on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<ExtractorConfig> {
    let config_result = match &cli.config {
        Some(path) => load_config_with_warnings(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            load_config_or_default_with_warnings(&cwd)?
        }
    };
    for warning in &config_result.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    Ok(apply_overrides(config_result.config, cli))
}

fn apply_overrides(mut config: ExtractorConfig, cli: &Cli) -> ExtractorConfig {
    if !cli.category.is_empty() {
        config.catalog.categories = cli.category.clone();
    }
    if let Some(description) = cli.description {
        config.catalog.description = description.into();
    }
    config
}
