//! Tree Builder: materializes a rooted dependency tree from the graph.
//!
//! A practice reachable through several branches appears once per branch;
//! collapsing those repeats is the flattener's job, not the builder's.
//!
//! # Cycle Guard
//!
//! A built [`Graph`] is acyclic, but the builder works against any
//! [`DependencyLookup`] and must terminate regardless. It tracks the ids on
//! the *current path* from the root. A dependency already on that path is
//! still emitted as a node, with no children and [`Truncation::Cycle`]. A
//! global visited set would be wrong here: it would prune diamond-shaped
//! re-convergence that is perfectly legal in a DAG.

use crate::adoption::AdoptionSet;
use crate::config::DEFAULT_MAX_TREE_DEPTH;
use crate::domain::{Practice, PracticeId, TreeNode, Truncation};
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::collections::HashSet;

/// Source of practices and their ordered direct dependencies.
pub trait DependencyLookup {
    /// Get a practice by id.
    fn lookup(&self, id: &str) -> Option<&Practice>;

    /// Direct dependencies of `id` in display order. Unknown ids have none.
    fn ordered_dependencies(&self, id: &str) -> Vec<&Practice>;
}

impl DependencyLookup for Graph {
    fn lookup(&self, id: &str) -> Option<&Practice> {
        self.practice(id)
    }

    fn ordered_dependencies(&self, id: &str) -> Vec<&Practice> {
        self.direct_dependencies(id).unwrap_or_default()
    }
}

/// Build the dependency tree rooted at `root`, expanding at most `max_depth` levels.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root` is not in the graph.
pub fn build_tree(graph: &Graph, root: &str, max_depth: usize) -> Result<TreeNode> {
    TreeBuilder::new(graph).max_depth(max_depth).build(root)
}

/// Configurable tree construction.
///
/// ```
/// use practice_graph::{AdoptionSet, EdgeRecord, Graph, PracticeRecord, TreeBuilder};
///
/// # fn record(id: &str) -> PracticeRecord {
/// #     serde_json::from_value(serde_json::json!({"id": id, "name": id, "category": "core"})).unwrap()
/// # }
/// let graph = Graph::build(
///     vec![record("ci"), record("vcs")],
///     vec![EdgeRecord::new("ci", "vcs")],
/// )?;
/// let adopted = AdoptionSet::from_ids(["vcs"]);
///
/// let tree = TreeBuilder::new(&graph).adopted(&adopted).build("ci")?;
/// assert_eq!(tree.dependencies[0].level, 1);
/// assert!(tree.dependencies[0].adopted);
/// # Ok::<(), practice_graph::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a, L: ?Sized = Graph> {
    lookup: &'a L,
    max_depth: usize,
    adopted: Option<&'a AdoptionSet>,
}

impl<'a> TreeBuilder<'a, Graph> {
    /// A builder over `graph`, using the graph's configured depth limit.
    #[must_use]
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            lookup: graph,
            max_depth: graph.config().max_tree_depth,
            adopted: None,
        }
    }
}

impl<'a, L: DependencyLookup + ?Sized> TreeBuilder<'a, L> {
    /// A builder over an arbitrary lookup, with the default depth limit.
    pub fn with_lookup(lookup: &'a L) -> Self {
        Self {
            lookup,
            max_depth: DEFAULT_MAX_TREE_DEPTH,
            adopted: None,
        }
    }

    /// Nodes at this level keep their place but are not expanded.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Mark nodes whose practice is in `adopted`.
    #[must_use]
    pub fn adopted(mut self, adopted: &'a AdoptionSet) -> Self {
        self.adopted = Some(adopted);
        self
    }

    /// Build the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `root` is unknown to the lookup.
    pub fn build(&self, root: &str) -> Result<TreeNode> {
        let practice = self
            .lookup
            .lookup(root)
            .ok_or_else(|| Error::NotFound(root.to_string()))?;

        let mut path = HashSet::new();
        let mut stats = TruncationStats::default();
        let tree = self.expand(practice, 0, &mut path, &mut stats);

        if stats.cycles > 0 {
            tracing::warn!(
                root,
                branches = stats.cycles,
                "Dependency tree hit a cycle; affected branches were cut"
            );
        }
        if stats.depth_limited > 0 {
            tracing::warn!(
                root,
                branches = stats.depth_limited,
                max_depth = self.max_depth,
                "Dependency tree exceeded the depth limit; affected branches were cut"
            );
        }

        Ok(tree)
    }

    fn expand(
        &self,
        practice: &Practice,
        level: usize,
        path: &mut HashSet<PracticeId>,
        stats: &mut TruncationStats,
    ) -> TreeNode {
        let mut node = self.leaf(practice, level, None);

        let dependencies = self.lookup.ordered_dependencies(practice.id.as_str());
        if dependencies.is_empty() {
            return node;
        }

        if level >= self.max_depth {
            node.truncated = Some(Truncation::DepthLimit);
            stats.depth_limited += 1;
            return node;
        }

        path.insert(practice.id.clone());
        node.dependencies = dependencies
            .into_iter()
            .map(|dependency| {
                if path.contains(&dependency.id) {
                    stats.cycles += 1;
                    self.leaf(dependency, level + 1, Some(Truncation::Cycle))
                } else {
                    self.expand(dependency, level + 1, path, stats)
                }
            })
            .collect();
        path.remove(&practice.id);

        node
    }

    fn leaf(&self, practice: &Practice, level: usize, truncated: Option<Truncation>) -> TreeNode {
        TreeNode {
            practice: practice.clone(),
            level,
            adopted: self
                .adopted
                .is_some_and(|set| set.contains(practice.id.as_str())),
            dependencies: Vec::new(),
            truncated,
        }
    }
}

#[derive(Debug, Default)]
struct TruncationStats {
    cycles: usize,
    depth_limited: usize,
}
