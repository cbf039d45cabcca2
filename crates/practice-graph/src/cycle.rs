//! Cycle detection for the practice graph.
//!
//! Two checks live here:
//!
//! - [`would_create_cycle`] answers whether a prospective edge `from -> to`
//!   would close a cycle. It walks *dependents* of `from` (reverse edges)
//!   looking for `to`: if `to` already depends on `from`, directly or
//!   transitively, the new edge closes a loop. The walk is bounded by
//!   [`EngineConfig::max_cycle_hops`](crate::config::EngineConfig) so a
//!   pathological input cannot make a single check unbounded.
//! - [`validate_acyclic`] checks a whole graph and reports one concrete cycle.
//!   It is unbounded and authoritative; graph construction always runs it.

use crate::domain::PracticeId;
use crate::error::{Error, Result};
use crate::graph::Graph;
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// Result of probing a prospective edge for cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleProbe {
    /// The edge does not close a cycle.
    Clear,

    /// The edge closes a cycle.
    Closes {
        /// The cycle the edge would close, starting and ending at the
        /// edge's dependency
        path: Vec<PracticeId>,
    },

    /// The hop cap was reached before the walk finished.
    Inconclusive {
        /// Number of nodes expanded
        hops: usize,
    },
}

/// Whether adding the edge `from -> to` ("`from` depends on `to`") would
/// create a cycle.
///
/// Returns `true` when `from == to`. If the walk hits the graph's hop cap,
/// a warning is logged and the result is `false` (no cycle found within bound).
///
/// # Errors
///
/// Returns [`Error::NotFound`] if either id is not in the graph.
pub fn would_create_cycle(graph: &Graph, from: &str, to: &str) -> Result<bool> {
    let from_node = graph
        .node_index(from)
        .ok_or_else(|| Error::NotFound(from.to_string()))?;
    let to_node = graph
        .node_index(to)
        .ok_or_else(|| Error::NotFound(to.to_string()))?;

    match probe_edge(
        graph.petgraph(),
        from_node,
        to_node,
        graph.config().max_cycle_hops,
    ) {
        CycleProbe::Clear => Ok(false),
        CycleProbe::Closes { .. } => Ok(true),
        CycleProbe::Inconclusive { hops } => {
            tracing::warn!(from, to, hops, "Cycle check hit its hop cap, assuming no cycle");
            Ok(false)
        }
    }
}

/// Bounded breadth-first walk over the dependents of `from`, looking for `to`.
///
/// Each node is expanded at most once. At most `max_hops` nodes are expanded;
/// if nodes remain queued after that, the probe is inconclusive.
pub(crate) fn probe_edge(
    graph: &DiGraph<PracticeId, ()>,
    from: NodeIndex,
    to: NodeIndex,
    max_hops: usize,
) -> CycleProbe {
    if from == to {
        return CycleProbe::Closes {
            path: vec![graph[to].clone(), graph[to].clone()],
        };
    }

    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut visited: HashSet<NodeIndex> = HashSet::from([from]);
    let mut queue: VecDeque<NodeIndex> = VecDeque::from([from]);
    let mut hops = 0;

    while let Some(current) = queue.pop_front() {
        if hops >= max_hops {
            return CycleProbe::Inconclusive { hops };
        }
        hops += 1;

        // Incoming edges come from practices that depend on `current`
        for dependent in graph.neighbors_directed(current, Direction::Incoming) {
            if !visited.insert(dependent) {
                continue;
            }
            parent.insert(dependent, current);

            if dependent == to {
                // Walk back to `from`; every step follows a depends-on edge
                let mut path = vec![graph[to].clone()];
                let mut node = to;
                while let Some(&next) = parent.get(&node) {
                    path.push(graph[next].clone());
                    node = next;
                }
                path.push(graph[to].clone());
                return CycleProbe::Closes { path };
            }

            queue.push_back(dependent);
        }
    }

    CycleProbe::Clear
}

/// Validate that the whole graph is acyclic.
///
/// # Errors
///
/// Returns [`Error::Cycle`] with one offending cycle. The cycle starts at the
/// lexicographically smallest id involved in any cycle and is the shortest
/// cycle through that id, so the report is deterministic.
pub fn validate_acyclic(graph: &Graph) -> Result<()> {
    match find_cycle(graph.petgraph()) {
        Some(path) => Err(Error::Cycle { path }),
        None => Ok(()),
    }
}

/// Find one cycle, if any, as a closed path of ids.
pub(crate) fn find_cycle(graph: &DiGraph<PracticeId, ()>) -> Option<Vec<PracticeId>> {
    let cyclic: Vec<Vec<NodeIndex>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1 || scc.first().is_some_and(|&n| graph.contains_edge(n, n))
        })
        .collect();

    let start = cyclic
        .iter()
        .flatten()
        .copied()
        .min_by(|a, b| graph[*a].cmp(&graph[*b]))?;

    if graph.contains_edge(start, start) {
        return Some(vec![graph[start].clone(), graph[start].clone()]);
    }

    let members: HashSet<NodeIndex> = cyclic
        .iter()
        .find(|scc| scc.contains(&start))
        .into_iter()
        .flatten()
        .copied()
        .collect();

    // BFS inside the component; the first edge back to `start` closes the
    // shortest cycle through it
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let mut next: Vec<NodeIndex> = graph
            .neighbors_directed(current, Direction::Outgoing)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_by(|a, b| graph[*a].cmp(&graph[*b]));

        for node in next {
            if node == start {
                let mut path = vec![graph[current].clone()];
                let mut cursor = current;
                while let Some(&prev) = parent.get(&cursor) {
                    path.push(graph[prev].clone());
                    cursor = prev;
                }
                path.reverse();
                path.push(graph[start].clone());
                return Some(path);
            }
            if visited.insert(node) {
                parent.insert(node, current);
                queue.push_back(node);
            }
        }
    }

    None
}
