//! Command execution logic.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use threadmap_core::HybridChain;
use threadmap_io::{ReportOptions, json, report, stix};

use super::args::{AnalyzeArgs, ExampleArgs, ImportNetworkArgs, ReportArgs, StixArgs};
use crate::config::ThreadmapConfig;
use crate::error::Error;
use crate::network::{NetworkIntel, OperationPlan, network_to_chain};
use crate::output::{self, OutputConfig, OutputMode};
use crate::scenarios;
use crate::summary::ChainAnalysis;

async fn load(path: &Path) -> Result<HybridChain> {
    json::load_chain(path)
        .await
        .with_context(|| format!("Failed to load chain from {}", path.display()))
}

/// Decode a JSON input file.
pub(crate) async fn read_json_file<T: DeserializeOwned>(path: &Path) -> crate::error::Result<T> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|e| Error::Input {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write `content` to `path` atomically, or to stdout when no path is given.
async fn emit(content: &str, path: Option<&Path>, what: &str, output_mode: OutputMode) -> Result<()> {
    match path {
        Some(path) => {
            threadmap_io::write_atomic(path, content.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            announce_saved(path, what, output_mode)?;
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn announce_saved(path: &Path, what: &str, output_mode: OutputMode) -> io::Result<()> {
    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "saved": what,
            "path": path.display().to_string(),
        })),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            eprintln!(
                "{} {what} to {}",
                output::success("Saved", &config),
                output::info(&path.display().to_string(), &config)
            );
            Ok(())
        }
    }
}

/// Execute the example command
pub async fn execute_example(args: &ExampleArgs, output_mode: OutputMode) -> Result<()> {
    let chain = scenarios::apt28_2016()?;

    match &args.output {
        Some(path) => {
            json::save_chain(&chain, path)
                .await
                .with_context(|| format!("Failed to save chain to {}", path.display()))?;
            announce_saved(path, "chain", output_mode)?;
        }
        None => println!("{}", json::to_json(&chain)?),
    }
    Ok(())
}

/// Execute the analyze command
pub async fn execute_analyze(
    args: &AnalyzeArgs,
    config: &ThreadmapConfig,
    output_mode: OutputMode,
) -> Result<()> {
    let chain = load(&args.chain).await?;
    let limit = args
        .chokepoints
        .unwrap_or(config.analysis.chokepoint_limit);

    let analysis = ChainAnalysis::compute(&chain, limit);
    output::print_analysis(&analysis, output_mode)?;
    Ok(())
}

/// Execute the report command
pub async fn execute_report(
    args: &ReportArgs,
    config: &ThreadmapConfig,
    output_mode: OutputMode,
) -> Result<()> {
    let chain = load(&args.chain).await?;
    let markdown = report::to_markdown_with(&chain, &ReportOptions::from(&config.report));
    emit(&markdown, args.output.as_deref(), "report", output_mode).await
}

/// Execute the stix command
pub async fn execute_stix(args: &StixArgs, output_mode: OutputMode) -> Result<()> {
    let chain = load(&args.chain).await?;
    let bundle = stix::to_stix_bundle(&chain);
    let content = serde_json::to_string_pretty(&bundle)?;
    emit(&content, args.output.as_deref(), "STIX bundle", output_mode).await
}

/// Execute the import-network command
pub async fn execute_import_network(
    args: &ImportNetworkArgs,
    config: &ThreadmapConfig,
    output_mode: OutputMode,
) -> Result<()> {
    let intel: NetworkIntel = read_json_file(&args.intel).await?;
    let plan: Option<OperationPlan> = match &args.plan {
        Some(path) => Some(read_json_file(path).await?),
        None => None,
    };

    let import = network_to_chain(&intel, plan.as_ref(), &args.name, &config.adapter)?;

    // Warnings go to stderr so stdout stays a clean chain document
    output::write_warnings(
        &mut io::stderr().lock(),
        &import.warnings,
        &OutputConfig::from_env(),
    )?;

    match &args.output {
        Some(path) => {
            json::save_chain(&import.chain, path)
                .await
                .with_context(|| format!("Failed to save chain to {}", path.display()))?;
            announce_saved(path, "chain", output_mode)?;
        }
        None => println!("{}", json::to_json(&import.chain)?),
    }
    Ok(())
}
