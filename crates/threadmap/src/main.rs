//! ThreadMap CLI binary.

use anyhow::Result;
use threadmap::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the threadmap CLI.
///
/// Uses tokio's current_thread runtime; the only async work is file I/O.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=threadmap_core=debug
    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("threadmap=info,threadmap_core=warn,threadmap_io=warn")
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting threadmap CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Threadmap CLI completed successfully");
    Ok(())
}
