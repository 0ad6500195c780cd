//! Output formatting for CLI commands.
//!
//! Commands print either human-readable text or JSON for programmatic use.
//! Text rendering writes to any [`Write`] so it can be tested without a
//! terminal.

pub mod color;

use crate::network::AdapterWarning;
use crate::summary::ChainAnalysis;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use threadmap_core::domain::EntityId;

pub use color::{error, info, success, warning};

use color::{bold, colorize_kind, dimmed};

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `THREADMAP_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("THREADMAP_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{}", json)
}

/// Print an analysis in the specified format
pub fn print_analysis(analysis: &ChainAnalysis, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(analysis),
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_analysis(&mut handle, analysis, &OutputConfig::from_env())
        }
    }
}

fn arrow_path(path: &[EntityId], config: &OutputConfig) -> String {
    path.iter()
        .map(|id| info(id.as_str(), config))
        .collect::<Vec<_>>()
        .join(" → ")
}

fn section<W: Write>(w: &mut W, title: &str, config: &OutputConfig) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", bold(title, config))
}

/// Render an analysis as text.
pub fn write_analysis<W: Write>(
    w: &mut W,
    analysis: &ChainAnalysis,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} ({})",
        bold(&analysis.name, config),
        info(&analysis.chain_id, config)
    )?;
    writeln!(
        w,
        "  {} {}  {} {}",
        dimmed("Entities:", config),
        analysis.entity_count,
        dimmed("Relationships:", config),
        analysis.relationship_count
    )?;
    if analysis.is_valid_dag {
        writeln!(w, "  {}", success("Valid DAG", config))?;
    } else {
        writeln!(
            w,
            "  {}",
            error("Contains cycles: no execution order or critical path", config)
        )?;
    }

    if let Some(order) = &analysis.execution_order {
        section(w, "Execution order:", config)?;
        for (i, id) in order.iter().enumerate() {
            writeln!(w, "  {:>3}. {}", i + 1, info(id.as_str(), config))?;
        }
    }

    if let Some(critical) = &analysis.critical_path {
        section(
            w,
            &format!("Critical path ({} hours):", critical.total_hours),
            config,
        )?;
        writeln!(w, "  {}", arrow_path(&critical.path, config))?;
    }

    section(w, "Chokepoints:", config)?;
    for chokepoint in &analysis.chokepoints {
        writeln!(
            w,
            "  {} [{}]: {} downstream, {} upstream",
            info(chokepoint.node_id.as_str(), config),
            colorize_kind(chokepoint.entity_type, config),
            chokepoint.downstream_count,
            chokepoint.upstream_count
        )?;
    }

    section(w, "Intervention ranking:", config)?;
    for (i, point) in analysis.interventions.iter().enumerate() {
        writeln!(
            w,
            "  {:>3}. {} ({}) [{}] score {}, downstream {}",
            i + 1,
            point.name,
            info(point.node_id.as_str(), config),
            colorize_kind(point.entity_type, config),
            point.score,
            point.downstream_impact
        )?;
    }

    section(w, "Narrative threads:", config)?;
    if analysis.narrative_threads.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
    }
    for thread in &analysis.narrative_threads {
        writeln!(w, "  {}", arrow_path(thread, config))?;
    }

    section(w, "Capability requirements:", config)?;
    if analysis.capabilities.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
    }
    for capability in &analysis.capabilities {
        writeln!(
            w,
            "  {} [{}] {} {}",
            capability.name,
            capability.capability_type,
            dimmed("from", config),
            capability.source
        )?;
    }

    Ok(())
}

/// Render adapter warnings, one per line.
pub fn write_warnings<W: Write>(
    w: &mut W,
    warnings: &[AdapterWarning],
    config: &OutputConfig,
) -> io::Result<()> {
    for item in warnings {
        writeln!(w, "{} {item}", warning("warning:", config))?;
    }
    Ok(())
}
