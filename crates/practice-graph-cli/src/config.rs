//! Configuration management for the practices CLI.
//!
//! Configuration lives in an optional YAML file (`practices.yaml` by
//! default). Every field has a default, so an empty or missing file is valid.
//!
//! ```yaml
//! data-file: data/practices.json
//! adoption-file: .practices/adopted.json
//! engine:
//!   max-tree-depth: 25
//!   max-cycle-hops: 100
//! ```

use crate::error::{CliError, Result};
use practice_graph::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "practices.yaml";

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "practices.json";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct PracticesConfig {
    /// Path to the practice dataset (JSON)
    pub data_file: PathBuf,

    /// Path to a JSON array of adopted practice ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption_file: Option<PathBuf>,

    /// Engine traversal limits
    pub engine: EngineConfig,
}

impl Default for PracticesConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            adoption_file: None,
            engine: EngineConfig::default(),
        }
    }
}

impl PracticesConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Resolve configuration for a run.
    ///
    /// An explicit path must exist. Without one, `practices.yaml` in
    /// `working_dir` is used if present, otherwise defaults apply.
    pub async fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path).await;
        }

        let candidate = working_dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await? {
            tracing::debug!(path = %candidate.display(), "Loading configuration");
            Self::load(&candidate).await
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }
}
