//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the `example` command
#[derive(Parser, Debug, Clone)]
pub struct ExampleArgs {
    /// Write the chain JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Chain JSON file
    pub chain: PathBuf,

    /// Chokepoints to list (overrides `analysis.chokepoint_limit`)
    #[arg(long)]
    pub chokepoints: Option<usize>,
}

/// Arguments for the `report` command
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Chain JSON file
    pub chain: PathBuf,

    /// Write the Markdown report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `stix` command
#[derive(Parser, Debug, Clone)]
pub struct StixArgs {
    /// Chain JSON file
    pub chain: PathBuf,

    /// Write the bundle to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import-network` command
#[derive(Parser, Debug, Clone)]
pub struct ImportNetworkArgs {
    /// Network intelligence JSON (nodes and communities)
    #[arg(long)]
    pub intel: PathBuf,

    /// Operation plan JSON
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Campaign name; also determines the chain id
    #[arg(short, long, default_value = "Network Operation")]
    pub name: String,

    /// Write the chain JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
