//! Raw input records supplied by a data source.
//!
//! These are the shapes a repository or JSON file hands the engine before any
//! validation. [`Graph::build`](crate::graph::Graph::build) turns them into a
//! validated graph or rejects them.

use serde::{Deserialize, Serialize};

/// An unvalidated practice record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    /// Kebab-case id (validated at build time)
    pub id: String,

    /// Display name
    pub name: String,

    /// Category name (parsed at build time)
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Requirement strings, in display order
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Benefit strings, in display order
    #[serde(default)]
    pub benefits: Vec<String>,

    /// Optional maturity tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_level: Option<u32>,

    /// Inline dependencies, merged into the edge list by [`Dataset::into_parts`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRef>,
}

/// A reference to a dependency, either a bare id or an object carrying one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyRef {
    /// `"version-control"`
    Id(String),

    /// `{"id": "version-control", ...}`; other fields are ignored
    Practice {
        /// The referenced practice id
        id: String,
    },
}

impl DependencyRef {
    /// The referenced id, whichever form it came in.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Practice { id } => id,
        }
    }
}

impl From<&str> for DependencyRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

/// An unvalidated "depends on" edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    /// The dependent practice
    pub practice_id: String,

    /// The practice it depends on
    pub depends_on_id: String,
}

impl EdgeRecord {
    /// Create an edge record.
    pub fn new(practice_id: impl Into<String>, depends_on_id: impl Into<String>) -> Self {
        Self {
            practice_id: practice_id.into(),
            depends_on_id: depends_on_id.into(),
        }
    }
}

/// A complete dataset: practices plus explicit edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Practice records
    pub practices: Vec<PracticeRecord>,

    /// Explicit edge records
    #[serde(default)]
    pub dependencies: Vec<EdgeRecord>,
}

impl Dataset {
    /// Parse a dataset from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Split into practice records and the full edge list.
    ///
    /// Inline `dependencies` on each record are appended after the explicit
    /// edges, in record order. Records keep no inline dependencies afterwards.
    #[must_use]
    pub fn into_parts(self) -> (Vec<PracticeRecord>, Vec<EdgeRecord>) {
        let mut edges = self.dependencies;
        let practices = self
            .practices
            .into_iter()
            .map(|mut record| {
                for dep in record.dependencies.drain(..) {
                    edges.push(EdgeRecord::new(record.id.clone(), dep.id()));
                }
                record
            })
            .collect();
        (practices, edges)
    }
}
