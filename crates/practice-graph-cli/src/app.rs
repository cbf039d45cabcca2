//! Application context for CLI command execution.
//!
//! The `App` holds the built graph and the adoption snapshot for a single
//! invocation. Everything is loaded up front; commands only query.
//!
//! # Example
//!
//! ```no_run
//! use practices::app::{App, LoadOptions};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::load(Path::new("."), &LoadOptions::default()).await?;
//!     println!("{} practices", app.graph().len());
//!     Ok(())
//! }
//! ```

use crate::config::PracticesConfig;
use crate::error::Result;
use crate::source::{JsonFileSource, PracticeSource, load_adoption_file};
use practice_graph::{AdoptionSet, EngineConfig, Graph};
use std::path::{Path, PathBuf};

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Dataset path, overriding `data-file`
    pub data: Option<PathBuf>,
    /// Tree depth cap, overriding `engine.max-tree-depth`
    pub max_depth: Option<usize>,
    /// Adopted ids given on the command line
    pub adopted: Vec<String>,
    /// Adoption file, overriding `adoption-file`
    pub adopted_file: Option<PathBuf>,
}

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    graph: Graph,
    adopted: AdoptionSet,
    origin: String,
}

impl App {
    /// Load configuration, dataset, and adoption state for a run.
    ///
    /// Relative paths in the configuration file are resolved against
    /// `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read or parsed
    /// - The dataset or adoption file cannot be read or parsed
    /// - The dataset does not form a valid acyclic graph
    pub async fn load(working_dir: &Path, options: &LoadOptions) -> Result<Self> {
        let config = PracticesConfig::discover(options.config.as_deref(), working_dir).await?;

        let mut engine = config.engine;
        if let Some(depth) = options.max_depth {
            engine.max_tree_depth = depth;
        }

        let data_path = options
            .data
            .clone()
            .unwrap_or_else(|| working_dir.join(&config.data_file));

        let adoption_path = options
            .adopted_file
            .clone()
            .or_else(|| config.adoption_file.map(|path| working_dir.join(path)));
        let from_file = match adoption_path {
            Some(path) => load_adoption_file(&path).await?,
            None => AdoptionSet::new(),
        };
        let adopted: AdoptionSet = from_file
            .iter()
            .chain(options.adopted.iter().map(String::as_str))
            .collect();

        Self::from_source(&JsonFileSource::new(data_path), engine, adopted).await
    }

    /// Build an `App` from any source.
    pub async fn from_source(
        source: &dyn PracticeSource,
        engine: EngineConfig,
        adopted: AdoptionSet,
    ) -> Result<Self> {
        let origin = source.describe();
        tracing::debug!(source = %origin, "Loading practices");

        let dataset = source.load().await?;
        let graph = Graph::from_dataset(dataset, &engine)?;

        tracing::debug!(
            practices = graph.len(),
            dependencies = graph.edge_count(),
            adopted = adopted.len(),
            "Practice graph ready"
        );

        Ok(Self {
            graph,
            adopted,
            origin,
        })
    }

    /// The validated practice graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Adopted practice ids for this run.
    pub fn adopted(&self) -> &AdoptionSet {
        &self.adopted
    }

    /// Where the practices were loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::error::CliError;
    use crate::source::InMemorySource;
    use practice_graph::Dataset;
    use tempfile::TempDir;
    use tokio::fs;

    const DATASET: &str = r#"{
        "practices": [
            {"id": "a", "name": "A", "category": "core"},
            {"id": "b", "name": "B", "category": "core", "dependencies": ["a"]}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_uses_configured_data_file_and_adoption() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("catalog.json"), DATASET).await.unwrap();
        fs::write(dir.path().join("adopted.json"), r#"["a"]"#).await.unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "data-file: catalog.json\nadoption-file: adopted.json\nengine:\n  max-tree-depth: 7\n",
        )
        .await
        .unwrap();

        let app = App::load(dir.path(), &LoadOptions::default()).await.unwrap();
        assert_eq!(app.graph().len(), 2);
        assert!(app.adopted().contains("a"));
        assert_eq!(app.graph().config().max_tree_depth, 7);
        assert!(app.origin().ends_with("catalog.json"));
    }

    #[tokio::test]
    async fn test_command_line_overrides_config() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("other.json");
        fs::write(&data, DATASET).await.unwrap();

        let options = LoadOptions {
            data: Some(data),
            max_depth: Some(1),
            adopted: vec!["b".to_string(), " ".to_string()],
            ..LoadOptions::default()
        };
        let app = App::load(dir.path(), &options).await.unwrap();
        assert_eq!(app.graph().config().max_tree_depth, 1);
        assert_eq!(app.adopted().len(), 1);
        assert!(app.adopted().contains("b"));
    }

    #[tokio::test]
    async fn test_invalid_dataset_surfaces_graph_error() {
        let dataset = Dataset::from_json(
            r#"{"practices": [
                {"id": "x", "name": "X", "category": "core", "dependencies": ["y"]},
                {"id": "y", "name": "Y", "category": "core", "dependencies": ["x"]}
            ]}"#,
        )
        .unwrap();

        let err = App::from_source(
            &InMemorySource::new(dataset),
            EngineConfig::default(),
            AdoptionSet::new(),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, CliError::Graph(practice_graph::Error::Cycle { .. })),
            "got {err:?}"
        );
    }
}
