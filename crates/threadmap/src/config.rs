//! Configuration file handling.
//!
//! Settings live in `threadmap.yaml` in the working directory, or in the file
//! passed via `--config`. Every key is optional:
//!
//! ```yaml
//! analysis:
//!   chokepoint_limit: 10
//! report:
//!   top_interventions: 5
//!   top_chokepoints: 5
//! adapter:
//!   max_actors: 20
//!   default_success_probability: 0.5
//!   max_entry_success: 0.95
//!   amplify_success: 0.6
//! ```

use crate::error::{Error, Result};
use crate::network::AdapterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use threadmap_io::ReportOptions;
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "threadmap.yaml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThreadmapConfig {
    /// `analyze` command settings
    pub analysis: AnalysisConfig,

    /// Markdown report settings
    pub report: ReportConfig,

    /// Network intelligence adapter settings
    pub adapter: AdapterConfig,
}

/// Analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Chokepoints listed by `analyze`
    pub chokepoint_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chokepoint_limit: 10,
        }
    }
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Entries in the intervention section
    pub top_interventions: usize,

    /// Entries in the chokepoint section
    pub top_chokepoints: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let options = ReportOptions::default();
        Self {
            top_interventions: options.top_interventions,
            top_chokepoints: options.top_chokepoints,
        }
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            top_interventions: config.top_interventions,
            top_chokepoints: config.top_chokepoints,
        }
    }
}

impl ThreadmapConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.adapter.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        // An empty file is an empty mapping, not an error
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_yaml(&content)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `threadmap.yaml` in `dir` is
    /// used when present and defaults otherwise.
    pub async fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path).await;
        }

        let default_path = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&default_path).await? {
            tracing::debug!(path = %default_path.display(), "Loading configuration");
            Self::load(&default_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ThreadmapConfig::default();
        assert_eq!(config.analysis.chokepoint_limit, 10);
        assert_eq!(config.report.top_interventions, 5);
        assert_eq!(config.report.top_chokepoints, 5);
        assert_eq!(config.adapter.max_actors, 20);
        assert_eq!(config.adapter.default_success_probability, 0.5);
        assert_eq!(config.adapter.max_entry_success, 0.95);
        assert_eq!(config.adapter.amplify_success, 0.6);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = ThreadmapConfig::from_yaml("report:\n  top_chokepoints: 2\n").unwrap();
        assert_eq!(config.report.top_chokepoints, 2);
        assert_eq!(config.report.top_interventions, 5);
        assert_eq!(config.analysis.chokepoint_limit, 10);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ThreadmapConfig::from_yaml("analysis:\n  chokepoints: 3\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let result = ThreadmapConfig::from_yaml("adapter:\n  amplify_success: 1.5\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = ThreadmapConfig::default();
        config.adapter.max_actors = 7;
        let restored = ThreadmapConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(restored, config);
    }

    #[tokio::test]
    async fn test_discover_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ThreadmapConfig::discover(None, temp.path()).await.unwrap();
        assert_eq!(config, ThreadmapConfig::default());
    }

    #[tokio::test]
    async fn test_discover_reads_working_directory_file() {
        let temp = TempDir::new().unwrap();
        tokio::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "analysis:\n  chokepoint_limit: 3\n",
        )
        .await
        .unwrap();

        let config = ThreadmapConfig::discover(None, temp.path()).await.unwrap();
        assert_eq!(config.analysis.chokepoint_limit, 3);
    }

    #[tokio::test]
    async fn test_discover_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let result = ThreadmapConfig::discover(Some(&missing), temp.path()).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yaml");
        tokio::fs::write(&path, "").await.unwrap();
        assert_eq!(
            ThreadmapConfig::load(&path).await.unwrap(),
            ThreadmapConfig::default()
        );
    }
}
