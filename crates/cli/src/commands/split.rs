//! Split command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{Category, SplitConfig};
use dispatcher::{create_dispatcher, SplitReport};
use ingestion::FileLineSource;
use tracing::info;

use crate::cli::Cli;
use crate::error::{self, CliError};

/// Execute the split
pub async fn run_split(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let outputs = config.output_paths(&cli.input);

    info!(
        input = %cli.input.display(),
        marker = %config.marker,
        match_mode = ?config.match_mode,
        queue_capacity = config.queue_capacity,
        "Configuration resolved"
    );

    if cli.dry_run {
        info!("Dry run mode - no file will be opened or created");
        print_plan(&cli.input, &config, &outputs)?;
        return Ok(());
    }

    let report = split_file(&cli.input, &config).await?;

    if !cli.quiet {
        print_summary(&report, &outputs);
    }
    Ok(())
}

/// Split `input` into its two outputs
///
/// The input is opened and both outputs created before any worker starts.
pub async fn split_file(input: &Path, config: &SplitConfig) -> Result<SplitReport> {
    if input.is_dir() {
        return Err(CliError::input_is_directory(input.display().to_string()).into());
    }

    let source = FileLineSource::open(input)
        .await
        .with_context(|| format!("Failed to open input {}", input.display()))?;

    let dispatcher = create_dispatcher(config, input)
        .await
        .context("Failed to create outputs")?;

    dispatcher.run(source).await.context("Split failed")
}

/// Build the effective configuration: defaults, then file, then flags
pub fn resolve_config(cli: &Cli) -> error::Result<SplitConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_from_path(path)?
        }
        None => SplitConfig::default(),
    };

    if let Some(marker) = &cli.marker {
        config.marker = marker.clone();
    }
    if let Some(mode) = cli.match_mode {
        config.match_mode = mode.into();
    }
    if let Some(suffix) = &cli.primary_suffix {
        config.primary_suffix = suffix.clone();
    }
    if let Some(suffix) = &cli.secondary_suffix {
        config.secondary_suffix = suffix.clone();
    }
    if let Some(capacity) = cli.queue_capacity {
        config.queue_capacity = capacity;
    }
    if cli.strict_writes {
        config.strict_writes = true;
    }

    ConfigLoader::validate(&config)?;
    Ok(config)
}

/// Print the resolved plan for dry-run mode
fn print_plan(input: &Path, config: &SplitConfig, outputs: &[PathBuf; Category::COUNT]) -> Result<()> {
    print!("{}", render_plan(input, config, outputs)?);
    Ok(())
}

fn render_plan(
    input: &Path,
    config: &SplitConfig,
    outputs: &[PathBuf; Category::COUNT],
) -> Result<String> {
    let mut plan = format!("\n=== Split Plan ===\n\nInput: {}\n", input.display());
    for category in Category::ALL {
        plan.push_str(&format!(
            "  {:<9} -> {}\n",
            category.as_str(),
            outputs[category.index()].display()
        ));
    }
    plan.push_str("\nEffective configuration:\n\n");
    plan.push_str(&ConfigLoader::to_toml(config)?);
    Ok(plan)
}

/// Print per-category results
fn print_summary(report: &SplitReport, outputs: &[PathBuf; Category::COUNT]) {
    print!("{}", render_summary(report, outputs));
}

fn render_summary(report: &SplitReport, outputs: &[PathBuf; Category::COUNT]) -> String {
    let mut summary = format!(
        "Split {} lines in {:.3}s ({:.0} lines/s)\n",
        report.lines_read,
        report.duration.as_secs_f64(),
        report.lines_per_sec()
    );
    for category in Category::ALL {
        let sink = report.sink(category);
        summary.push_str(&format!(
            "  {:<9} {:>10} lines  {:>4} failures  {}\n",
            category.as_str(),
            sink.metrics.write_count,
            sink.metrics.failure_count,
            outputs[category.index()].display()
        ));
    }
    summary
}
