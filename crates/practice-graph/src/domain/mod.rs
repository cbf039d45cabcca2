//! Domain types for the practice catalog.
//!
//! This module contains the entities the engine works on ([`Practice`],
//! [`Category`], [`PracticeId`]) and the derived views it produces
//! ([`TreeNode`], [`FlatNode`], [`Recommendation`], [`AdoptionProgress`]).

mod id;

pub use id::PracticeId;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of a practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Tooling that runs without human involvement
    Automation,

    /// A team habit or working agreement
    Behavior,

    /// Tooling that only pays off once a behavior is in place
    BehaviorEnabledAutomation,

    /// Foundational practice everything else builds on
    Core,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Self::Automation,
        Self::Behavior,
        Self::BehaviorEnabledAutomation,
        Self::Core,
    ];

    /// The kebab-case name used in datasets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::Behavior => "behavior",
            Self::BehaviorEnabledAutomation => "behavior-enabled-automation",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A named, adoptable practice in the catalog.
///
/// Practices are immutable once a graph has been built. Whether a practice is
/// adopted is not stored here; it is supplied per query via an
/// [`AdoptionSet`](crate::adoption::AdoptionSet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    /// Unique kebab-case identifier
    pub id: PracticeId,

    /// Display name
    pub name: String,

    /// Category
    pub category: Category,

    /// Free-text description
    pub description: String,

    /// What a team needs in place to adopt this practice
    pub requirements: Vec<String>,

    /// What a team gains by adopting it
    pub benefits: Vec<String>,

    /// Maturity tier (lower = more foundational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_level: Option<u32>,
}

/// Why a tree branch stopped expanding early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Truncation {
    /// The practice already appears on the path from the root.
    Cycle,

    /// The branch reached the maximum tree depth.
    DepthLimit,
}

/// A practice materialized at a position in a dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// The practice at this position
    #[serde(flatten)]
    pub practice: Practice,

    /// Zero-based depth below the root
    pub level: usize,

    /// Whether the practice is in the adoption set of the query
    pub adopted: bool,

    /// Direct dependencies, ordered by name
    pub dependencies: Vec<TreeNode>,

    /// Set when the children were cut off rather than exhausted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<Truncation>,
}

impl TreeNode {
    /// The id of the practice at this node.
    #[must_use]
    pub fn id(&self) -> &PracticeId {
        &self.practice.id
    }

    /// Visit this node and every node below it, depth-first, pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        for child in &self.dependencies {
            child.walk(visit);
        }
    }

    /// Total number of nodes in this subtree, counting repeated practices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

/// A practice in a flattened, deduplicated tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    /// The practice
    #[serde(flatten)]
    pub practice: Practice,

    /// Deepest level at which the practice occurs in the source tree
    pub level: usize,

    /// Whether the practice is in the adoption set of the query
    pub adopted: bool,

    /// Ids of the practice's direct dependencies
    pub dependencies: Vec<PracticeId>,
}

impl FlatNode {
    /// The id of the practice.
    #[must_use]
    pub fn id(&self) -> &PracticeId {
        &self.practice.id
    }
}

/// Outcome of asking for the next practice to adopt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Recommendation {
    /// The best practice to adopt next.
    Next(Practice),

    /// Every practice in the graph is adopted.
    Complete,

    /// Practices remain, but each has at least one unadopted dependency.
    Blocked {
        /// Number of practices not yet adopted
        remaining: usize,
    },
}

impl Recommendation {
    /// The recommended practice, if there is one.
    #[must_use]
    pub fn practice(&self) -> Option<&Practice> {
        match self {
            Self::Next(practice) => Some(practice),
            Self::Complete | Self::Blocked { .. } => None,
        }
    }
}

/// Aggregate adoption progress over a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionProgress {
    /// Number of practices in the graph
    pub total: usize,

    /// Number of adopted ids that resolve to practices in the graph
    pub adopted: usize,

    /// `adopted / total` as a rounded percentage (0 when the graph is empty)
    pub percentage: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("automation", Category::Automation)]
    #[case("behavior", Category::Behavior)]
    #[case("behavior-enabled-automation", Category::BehaviorEnabledAutomation)]
    #[case("core", Category::Core)]
    fn category_round_trips_through_str(#[case] text: &str, #[case] expected: Category) {
        let parsed: Category = text.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), text);
    }

    #[rstest]
    #[case::unknown("tooling")]
    #[case::wrong_case("Core")]
    #[case::empty("")]
    fn category_rejects_unknown_values(#[case] text: &str) {
        assert_eq!(
            text.parse::<Category>(),
            Err(ParseCategoryError(text.to_string()))
        );
    }

    #[test]
    fn recommendation_serializes_with_status_tag() {
        let json = serde_json::to_value(Recommendation::Blocked { remaining: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"status": "blocked", "remaining": 3}));

        let json = serde_json::to_value(Recommendation::Complete).unwrap();
        assert_eq!(json, serde_json::json!({"status": "complete"}));
    }

    #[test]
    fn practice_serializes_camel_case() {
        let practice = Practice {
            id: PracticeId::new_unchecked("tdd"),
            name: "Test-Driven Development".into(),
            category: Category::Behavior,
            description: String::new(),
            requirements: vec![],
            benefits: vec![],
            maturity_level: Some(2),
        };
        let json = serde_json::to_value(&practice).unwrap();
        assert_eq!(json["maturityLevel"], 2);
        assert_eq!(json["category"], "behavior");
    }
}
