//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use practice_graph::{EdgeRecord, Graph, PracticeRecord};

/// A practice record in the `core` category with a name derived from the id.
pub fn record(id: &str) -> PracticeRecord {
    record_with_tier(id, None)
}

/// A practice record with an explicit maturity tier.
pub fn record_with_tier(id: &str, maturity_level: Option<u32>) -> PracticeRecord {
    PracticeRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        category: "core".to_string(),
        description: format!("Description of {id}"),
        requirements: vec![],
        benefits: vec![],
        maturity_level,
        dependencies: vec![],
    }
}

/// Build a graph from `(id, [dependency ids])` pairs.
pub fn graph_of(catalog: &[(&str, &[&str])]) -> practice_graph::Result<Graph> {
    let practices = catalog.iter().map(|(id, _)| record(id)).collect();
    let edges = catalog
        .iter()
        .flat_map(|(id, deps)| deps.iter().map(move |dep| EdgeRecord::new(*id, *dep)))
        .collect();
    Graph::build(practices, edges)
}
