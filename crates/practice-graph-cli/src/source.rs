//! Where practice data comes from.
//!
//! The engine takes records; it never reads files. A [`PracticeSource`]
//! produces a [`Dataset`] for the CLI to hand over.

use crate::error::{CliError, Result};
use async_trait::async_trait;
use practice_graph::{AdoptionSet, Dataset};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A provider of practice records.
#[async_trait]
pub trait PracticeSource: Send + Sync {
    /// Load the full dataset.
    async fn load(&self) -> Result<Dataset>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// A dataset stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PracticeSource for JsonFileSource {
    async fn load(&self) -> Result<Dataset> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CliError::Source {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Dataset::from_json(&content).map_err(|e| CliError::Source {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A dataset already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    /// Wrap an existing dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl PracticeSource for InMemorySource {
    async fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Read an adoption file: a JSON array of ids.
///
/// Entries that are not ids are dropped by [`AdoptionSet::from_json`]; only
/// a file that is missing or is not JSON at all is an error.
pub async fn load_adoption_file(path: &Path) -> Result<AdoptionSet> {
    let content = fs::read_to_string(path).await.map_err(|e| CliError::Source {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| CliError::Source {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(AdoptionSet::from_json(&value))
}
