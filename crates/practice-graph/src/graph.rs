//! The Graph Store: an immutable, validated practice dependency graph.
//!
//! # Edge Direction
//!
//! Edges point from **dependent to dependency**: an edge `A -> B` means
//! practice A depends on practice B. Consequently:
//!
//! - outgoing edges of a node are its direct dependencies
//! - incoming edges of a node are its direct dependents
//!
//! # Construction
//!
//! [`Graph::build`] validates records in three passes:
//!
//! 1. Practices: kebab-case ids, unique ids, known categories
//! 2. Edges, one at a time: both endpoints exist, no self edge, no duplicate
//!    pair, and the edge does not close a cycle (bounded probe, see
//!    [`crate::cycle`])
//! 3. Whole-graph acyclicity check, which catches anything a bounded probe
//!    could not rule out
//!
//! Any failure rejects the whole load. Probes that hit their hop cap are not
//! failures; they are recorded as [`GraphWarning`]s and logged.

use crate::config::EngineConfig;
use crate::cycle::{self, CycleProbe};
use crate::dataset::{Dataset, EdgeRecord, PracticeRecord};
use crate::domain::{Category, Practice, PracticeId};
use crate::error::{Error, Result};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A non-fatal condition raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    /// A cycle probe for a new edge hit its hop cap before finishing.
    ///
    /// The edge was accepted; the final whole-graph check still guarantees
    /// the graph is acyclic, but the probe itself was inconclusive.
    CycleCheckTruncated {
        /// The dependent practice of the edge being added
        from: PracticeId,
        /// The dependency practice of the edge being added
        to: PracticeId,
        /// Number of nodes expanded before giving up
        hops: usize,
    },
}

impl GraphWarning {
    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CycleCheckTruncated { .. } => "cycle_check_truncated",
        }
    }
}

impl fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleCheckTruncated { from, to, hops } => write!(
                f,
                "cycle check for {from} -> {to} stopped after {hops} hops without a result"
            ),
        }
    }
}

/// Immutable dependency graph of practices.
///
/// Built once per dataset, then shared read-only. All derived views (trees,
/// flat listings, recommendations) are fresh allocations, so a `Graph` can be
/// queried from many threads at once without locking.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Practices indexed by id
    practices: HashMap<PracticeId, Practice>,

    /// Dependency graph; edge source depends on edge target
    graph: DiGraph<PracticeId, ()>,

    /// Mapping from practice id to graph node.
    ///
    /// Every key of `practices` has an entry here.
    node_map: HashMap<PracticeId, NodeIndex>,

    /// Limits the graph was built with
    config: EngineConfig,

    /// Non-fatal conditions raised during construction
    warnings: Vec<GraphWarning>,
}

impl Graph {
    /// Build a graph with the default [`EngineConfig`].
    pub fn build(practices: Vec<PracticeRecord>, edges: Vec<EdgeRecord>) -> Result<Self> {
        Self::build_with_config(practices, edges, &EngineConfig::default())
    }

    /// Build a graph from a dataset, merging inline dependencies into the edge list.
    pub fn from_dataset(dataset: Dataset, config: &EngineConfig) -> Result<Self> {
        let (practices, edges) = dataset.into_parts();
        Self::build_with_config(practices, edges, config)
    }

    /// Build a graph with explicit traversal limits.
    ///
    /// # Errors
    ///
    /// Returns a construction error if:
    /// - a practice id is not kebab-case ([`Error::InvalidId`])
    /// - two practices share an id ([`Error::DuplicateId`])
    /// - a category is unknown ([`Error::UnknownCategory`])
    /// - an edge endpoint does not exist ([`Error::DanglingEdge`])
    /// - an edge points at its own source ([`Error::SelfDependency`])
    /// - an edge is repeated ([`Error::DuplicateEdge`])
    /// - the edges contain a cycle ([`Error::Cycle`])
    pub fn build_with_config(
        practice_records: Vec<PracticeRecord>,
        edge_records: Vec<EdgeRecord>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let mut store = Self {
            practices: HashMap::with_capacity(practice_records.len()),
            graph: DiGraph::with_capacity(practice_records.len(), edge_records.len()),
            node_map: HashMap::with_capacity(practice_records.len()),
            config: *config,
            warnings: Vec::new(),
        };

        // First pass: validate practices and create nodes
        for record in practice_records {
            let practice = practice_from_record(record)?;
            if store.practices.contains_key(&practice.id) {
                return Err(Error::DuplicateId(practice.id));
            }
            let node = store.graph.add_node(practice.id.clone());
            store.node_map.insert(practice.id.clone(), node);
            store.practices.insert(practice.id.clone(), practice);
        }

        // Second pass: add edges one at a time, probing each for cycles
        let mut seen_edges: HashSet<(NodeIndex, NodeIndex)> =
            HashSet::with_capacity(edge_records.len());
        for edge in &edge_records {
            let (from, to) = store.resolve_edge(edge)?;

            if from == to {
                return Err(Error::SelfDependency(store.graph[from].clone()));
            }

            if !seen_edges.insert((from, to)) {
                return Err(Error::DuplicateEdge {
                    from: store.graph[from].clone(),
                    to: store.graph[to].clone(),
                });
            }

            match cycle::probe_edge(&store.graph, from, to, config.max_cycle_hops) {
                CycleProbe::Clear => {}
                CycleProbe::Closes { path } => return Err(Error::Cycle { path }),
                CycleProbe::Inconclusive { hops } => {
                    let warning = GraphWarning::CycleCheckTruncated {
                        from: store.graph[from].clone(),
                        to: store.graph[to].clone(),
                        hops,
                    };
                    tracing::warn!(
                        from = %edge.practice_id,
                        to = %edge.depends_on_id,
                        hops,
                        "Cycle check hit its hop cap; relying on full validation"
                    );
                    store.warnings.push(warning);
                }
            }

            store.graph.add_edge(from, to, ());
        }

        // Third pass: authoritative whole-graph check
        cycle::validate_acyclic(&store)?;

        tracing::debug!(
            practices = store.practices.len(),
            dependencies = store.graph.edge_count(),
            warnings = store.warnings.len(),
            "Built practice graph"
        );

        Ok(store)
    }

    /// Look up both endpoints of an edge record.
    fn resolve_edge(&self, edge: &EdgeRecord) -> Result<(NodeIndex, NodeIndex)> {
        let dangling = |missing: &str| Error::DanglingEdge {
            from: edge.practice_id.clone(),
            to: edge.depends_on_id.clone(),
            missing: missing.to_string(),
        };
        let from = self
            .node_index(&edge.practice_id)
            .ok_or_else(|| dangling(&edge.practice_id))?;
        let to = self
            .node_index(&edge.depends_on_id)
            .ok_or_else(|| dangling(&edge.depends_on_id))?;
        Ok((from, to))
    }

    /// Get a practice by id.
    #[must_use]
    pub fn practice(&self, id: &str) -> Option<&Practice> {
        self.practices.get(id)
    }

    /// Whether a practice with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.practices.contains_key(id)
    }

    /// Number of practices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.practices.len()
    }

    /// Whether the graph has no practices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.practices.is_empty()
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All practices, ordered by id.
    #[must_use]
    pub fn practices(&self) -> Vec<&Practice> {
        let mut all: Vec<&Practice> = self.practices.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Practices `id` directly depends on, ordered by name then id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not in the graph.
    pub fn direct_dependencies(&self, id: &str) -> Result<Vec<&Practice>> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Practices that directly depend on `id`, ordered by name then id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not in the graph.
    pub fn direct_dependents(&self, id: &str) -> Result<Vec<&Practice>> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Ids of the direct dependencies of `id`, in no particular order.
    ///
    /// Unknown ids have no dependencies.
    pub fn dependency_ids<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = &'a PracticeId> + use<'a> {
        self.node_index(id)
            .into_iter()
            .flat_map(move |node| self.graph.neighbors_directed(node, Direction::Outgoing))
            .map(move |n| &self.graph[n])
    }

    /// Warnings raised while building the graph.
    #[must_use]
    pub fn warnings(&self) -> &[GraphWarning] {
        &self.warnings
    }

    /// Limits the graph was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Result<Vec<&Practice>> {
        let node = self
            .node_index(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let mut neighbors: Vec<&Practice> = self
            .graph
            .neighbors_directed(node, direction)
            .filter_map(|n| self.practices.get(&self.graph[n]))
            .collect();
        neighbors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(neighbors)
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn petgraph(&self) -> &DiGraph<PracticeId, ()> {
        &self.graph
    }
}

/// Validate a raw record and convert it to a [`Practice`].
fn practice_from_record(record: PracticeRecord) -> Result<Practice> {
    let id = PracticeId::parse(&record.id)?;
    let category: Category = record
        .category
        .parse()
        .map_err(|_| Error::UnknownCategory {
            practice: record.id.clone(),
            category: record.category.clone(),
        })?;

    Ok(Practice {
        id,
        name: record.name,
        category,
        description: record.description,
        requirements: record.requirements,
        benefits: record.benefits,
        maturity_level: record.maturity_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, name: &str) -> PracticeRecord {
        PracticeRecord {
            id: id.to_string(),
            name: name.to_string(),
            category: "core".to_string(),
            description: String::new(),
            requirements: vec![],
            benefits: vec![],
            maturity_level: None,
            dependencies: vec![],
        }
    }

    fn ids(practices: &[&Practice]) -> Vec<String> {
        practices.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn builds_and_indexes_practices() {
        let graph = Graph::build(
            vec![record("a", "Alpha"), record("b", "Beta")],
            vec![EdgeRecord::new("b", "a")],
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.practice("a").unwrap().name, "Alpha");
        assert!(graph.practice("c").is_none());
        assert!(graph.warnings().is_empty());
    }

    #[test]
    fn dependencies_are_ordered_by_name() {
        let graph = Graph::build(
            vec![
                record("root", "Root"),
                record("z-id", "Apple"),
                record("a-id", "Zebra"),
                record("m-id", "Mango"),
            ],
            vec![
                EdgeRecord::new("root", "a-id"),
                EdgeRecord::new("root", "z-id"),
                EdgeRecord::new("root", "m-id"),
            ],
        )
        .unwrap();

        let deps = graph.direct_dependencies("root").unwrap();
        assert_eq!(ids(&deps), ["z-id", "m-id", "a-id"]);
    }

    #[test]
    fn name_ties_fall_back_to_id() {
        let graph = Graph::build(
            vec![record("root", "Root"), record("b", "Same"), record("a", "Same")],
            vec![EdgeRecord::new("root", "b"), EdgeRecord::new("root", "a")],
        )
        .unwrap();

        assert_eq!(ids(&graph.direct_dependencies("root").unwrap()), ["a", "b"]);
    }

    #[test]
    fn dependents_are_inverse_edges() {
        let graph = Graph::build(
            vec![record("base", "Base"), record("x", "X"), record("y", "Y")],
            vec![EdgeRecord::new("y", "base"), EdgeRecord::new("x", "base")],
        )
        .unwrap();

        assert_eq!(ids(&graph.direct_dependents("base").unwrap()), ["x", "y"]);
        assert!(graph.direct_dependents("x").unwrap().is_empty());
        assert_eq!(
            graph.direct_dependents("ghost"),
            Err(Error::NotFound("ghost".to_string()))
        );
    }

    #[rstest]
    #[case::uppercase_and_underscore("Continuous_Integration")]
    #[case::trailing_hyphen("ci-")]
    fn rejects_invalid_ids(#[case] id: &str) {
        let err = Graph::build(vec![record(id, "Bad")], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }), "got {err:?}");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Graph::build(vec![record("a", "One"), record("a", "Two")], vec![]).unwrap_err();
        assert_eq!(err, Error::DuplicateId(PracticeId::new_unchecked("a")));
    }

    #[test]
    fn rejects_unknown_category() {
        let mut bad = record("a", "A");
        bad.category = "tooling".to_string();
        let err = Graph::build(vec![bad], vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownCategory {
                practice: "a".to_string(),
                category: "tooling".to_string(),
            }
        );
    }

    #[rstest]
    #[case::unknown_dependency("a", "ghost", "ghost")]
    #[case::unknown_dependent("ghost", "a", "ghost")]
    fn rejects_dangling_edges(#[case] from: &str, #[case] to: &str, #[case] missing: &str) {
        let err = Graph::build(vec![record("a", "A")], vec![EdgeRecord::new(from, to)]).unwrap_err();
        assert_eq!(
            err,
            Error::DanglingEdge {
                from: from.to_string(),
                to: to.to_string(),
                missing: missing.to_string(),
            }
        );
    }

    #[test]
    fn rejects_self_dependency() {
        let err = Graph::build(vec![record("a", "A")], vec![EdgeRecord::new("a", "a")]).unwrap_err();
        assert_eq!(err, Error::SelfDependency(PracticeId::new_unchecked("a")));
    }

    #[test]
    fn rejects_duplicate_edges() {
        let err = Graph::build(
            vec![record("a", "A"), record("b", "B")],
            vec![EdgeRecord::new("b", "a"), EdgeRecord::new("b", "a")],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateEdge { .. }), "got {err:?}");
    }

    #[test]
    fn rejects_two_node_cycle_with_closed_path() {
        let err = Graph::build(
            vec![record("x", "X"), record("y", "Y")],
            vec![EdgeRecord::new("x", "y"), EdgeRecord::new("y", "x")],
        )
        .unwrap_err();

        let Error::Cycle { path } = err else {
            panic!("expected cycle error, got {err:?}");
        };
        let path: Vec<_> = path.iter().map(PracticeId::as_str).collect();
        assert_eq!(path, ["x", "y", "x"]);
    }

    #[test]
    fn truncated_probe_is_a_warning_not_an_error() {
        let config = EngineConfig {
            max_cycle_hops: 1,
            ..EngineConfig::default()
        };
        // Adding a -> d walks the dependents of a (b, then c), which needs more than one hop
        let graph = Graph::build_with_config(
            vec![record("a", "A"), record("b", "B"), record("c", "C"), record("d", "D")],
            vec![
                EdgeRecord::new("b", "a"),
                EdgeRecord::new("c", "b"),
                EdgeRecord::new("a", "d"),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(
            graph.warnings(),
            [GraphWarning::CycleCheckTruncated {
                from: PracticeId::new_unchecked("a"),
                to: PracticeId::new_unchecked("d"),
                hops: 1,
            }]
        );
        assert_eq!(graph.warnings()[0].kind(), "cycle_check_truncated");
    }

    #[test]
    fn from_dataset_merges_inline_dependencies() {
        let json = r#"{"practices": [
            {"id": "a", "name": "A", "category": "core"},
            {"id": "b", "name": "B", "category": "behavior", "dependencies": ["a"]}
        ]}"#;
        let graph =
            Graph::from_dataset(Dataset::from_json(json).unwrap(), &EngineConfig::default())
                .unwrap();
        assert_eq!(ids(&graph.direct_dependencies("b").unwrap()), ["a"]);
    }
}
