//! Error types for practice graph operations.

use crate::domain::PracticeId;
use thiserror::Error;

/// The error type for practice graph operations.
///
/// Every variant except [`Error::NotFound`] is a construction error: it is
/// raised while building a [`Graph`](crate::graph::Graph) and never during
/// traversal of an already-built graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A practice id is not kebab-case.
    #[error("Invalid practice id '{id}': {reason}")]
    InvalidId {
        /// The rejected id, as supplied
        id: String,
        /// Which kebab-case rule was violated
        reason: String,
    },

    /// Two practice records share the same id.
    #[error("Duplicate practice id: {0}")]
    DuplicateId(PracticeId),

    /// A practice record names a category outside the known set.
    #[error("Unknown category '{category}' for practice {practice}")]
    UnknownCategory {
        /// The practice carrying the category
        practice: String,
        /// The unrecognized category string
        category: String,
    },

    /// An edge references a practice that is not in the dataset.
    #[error("Dependency {from} -> {to} references unknown practice {missing}")]
    DanglingEdge {
        /// The dependent practice of the edge
        from: String,
        /// The dependency practice of the edge
        to: String,
        /// Whichever endpoint could not be resolved
        missing: String,
    },

    /// A practice declares a dependency on itself.
    #[error("Practice {0} cannot depend on itself")]
    SelfDependency(PracticeId),

    /// The same dependency pair appears more than once.
    #[error("Duplicate dependency: {from} -> {to}")]
    DuplicateEdge {
        /// The dependent practice
        from: PracticeId,
        /// The dependency practice
        to: PracticeId,
    },

    /// The dependency edges contain a cycle.
    ///
    /// `path` lists the ids along the cycle; its first and last entries are equal.
    #[error("Circular dependency: {}", format_path(.path))]
    Cycle {
        /// The offending cycle, closed (first == last)
        path: Vec<PracticeId>,
    },

    /// The requested practice does not exist in the graph.
    #[error("Practice not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Returns true if this error is fatal to a graph load.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

fn format_path(path: &[PracticeId]) -> String {
    path.iter()
        .map(PracticeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A specialized Result type for practice graph operations.
pub type Result<T> = std::result::Result<T, Error>;
