//! Error types for the practices CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for CLI operations outside the engine.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A data file could not be read or parsed.
    #[error("Failed to load {}: {reason}", path.display())]
    Source {
        /// The file being loaded
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The practice graph rejected the data or a query.
    #[error(transparent)]
    Graph(#[from] practice_graph::Error),
}

impl CliError {
    /// Whether this error means a requested practice does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Graph(practice_graph::Error::NotFound(_)))
    }
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
