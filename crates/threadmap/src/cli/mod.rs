//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `example`: Emit the APT28 2016 reference chain
//! - `analyze`: Run every analysis query on a chain
//! - `report`: Render a Markdown report
//! - `stix`: Export a STIX 2.1 bundle
//! - `import-network`: Convert network intelligence into a chain
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config <path>`: Configuration file (default: `./threadmap.yaml` if present)
//!
//! # Example
//!
//! ```bash
//! threadmap example --output apt28.json
//! threadmap analyze apt28.json
//! threadmap report apt28.json --output apt28.md
//! threadmap import-network --intel intel.json --plan plan.json --name "Op Echo"
//! ```

mod args;
mod execute;

use crate::config::ThreadmapConfig;
use crate::output::OutputMode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AnalyzeArgs, ExampleArgs, ImportNetworkArgs, ReportArgs, StixArgs};

/// ThreadMap - model hybrid operations as typed graphs
///
/// Chains of actors, actions, capabilities, infrastructure, narratives,
/// targets and effects, analyzed for critical paths and intervention points.
#[derive(Parser, Debug)]
#[command(name = "threadmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Emit the APT28 2016 hack-and-leak reference chain
    ///
    /// Eleven entities covering every kind, useful as a template for new
    /// chains.
    Example(ExampleArgs),

    /// Analyze a chain
    ///
    /// Shows execution order, critical path, chokepoints, intervention
    /// ranking, narrative threads and capability requirements.
    Analyze(AnalyzeArgs),

    /// Generate a Markdown report for a chain
    Report(ReportArgs),

    /// Export a chain as a STIX 2.1 bundle
    Stix(StixArgs),

    /// Build a chain from network influence analysis
    ///
    /// Top influential nodes become actors, communities become
    /// infrastructure, and an optional operation plan becomes a sequence of
    /// actions ending in a reach effect.
    ImportNetwork(ImportNetworkArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("ThreadMap hybrid operation modeling");
            println!("Use --help for more information");
            return Ok(());
        };

        let config = ThreadmapConfig::discover(self.config.as_deref(), &std::env::current_dir()?)
            .await
            .context("Failed to load configuration")?;

        match command {
            Commands::Example(args) => execute::execute_example(args, output_mode).await,
            Commands::Analyze(args) => execute::execute_analyze(args, &config, output_mode).await,
            Commands::Report(args) => execute::execute_report(args, &config, output_mode).await,
            Commands::Stix(args) => execute::execute_stix(args, output_mode).await,
            Commands::ImportNetwork(args) => {
                execute::execute_import_network(args, &config, output_mode).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["threadmap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["threadmap", "analyze", "c.json", "--json", "--config", "x.yaml"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.chain, PathBuf::from("c.json"));
                assert_eq!(args.chokepoints, None);
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_import_network_defaults() {
        let cli = Cli::try_parse_from(["threadmap", "import-network", "--intel", "i.json"]).unwrap();
        match cli.command {
            Some(Commands::ImportNetwork(args)) => {
                assert_eq!(args.name, "Network Operation");
                assert!(args.plan.is_none());
                assert!(args.output.is_none());
            }
            other => panic!("expected import-network, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_import_network_requires_intel() {
        assert!(Cli::try_parse_from(["threadmap", "import-network"]).is_err());
    }

    #[test]
    fn test_parse_report_output() {
        let cli = Cli::try_parse_from(["threadmap", "report", "c.json", "-o", "r.md"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportArgs { output: Some(_), .. }))
        ));
    }
}
