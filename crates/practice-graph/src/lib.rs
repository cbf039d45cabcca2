//! Practice Graph - dependency graph engine for a catalog of practices.
//!
//! Practices declare dependencies on one another. This crate validates that
//! catalog as a directed acyclic graph and derives views from it on demand:
//!
//! - a rooted dependency tree ([`build_tree`], [`TreeBuilder`])
//! - a deduplicated flat listing ([`flatten`])
//! - the ancestors and descendants of a selected practice ([`filter_by_selection`])
//! - the next practice to adopt and overall progress ([`next_recommendation`],
//!   [`adoption_progress`])
//!
//! Every operation is a synchronous, pure function of its inputs. The engine
//! does no I/O; hosts load records and adoption state and pass them in.
//!
//! ```
//! use practice_graph::{AdoptionSet, Dataset, EngineConfig, Graph, Recommendation};
//!
//! let dataset = Dataset::from_json(r#"{
//!     "practices": [
//!         {"id": "version-control", "name": "Version Control", "category": "core"},
//!         {"id": "continuous-integration", "name": "Continuous Integration",
//!          "category": "automation", "dependencies": ["version-control"]}
//!     ]
//! }"#).unwrap();
//! let graph = Graph::from_dataset(dataset, &EngineConfig::default())?;
//!
//! let adopted = AdoptionSet::from_ids(["version-control"]);
//! let next = practice_graph::next_recommendation(&graph, &adopted);
//! assert_eq!(next.practice().unwrap().id.as_str(), "continuous-integration");
//! assert_eq!(practice_graph::adoption_progress(&graph, &adopted).percentage, 50);
//! # Ok::<(), practice_graph::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod adoption;
pub mod config;
pub mod cycle;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod graph;
pub mod recommend;
pub mod tree;

pub use adoption::AdoptionSet;
pub use config::EngineConfig;
pub use cycle::{validate_acyclic, would_create_cycle};
pub use dataset::{Dataset, DependencyRef, EdgeRecord, PracticeRecord};
pub use domain::{
    AdoptionProgress, Category, FlatNode, Practice, PracticeId, Recommendation, TreeNode,
    Truncation,
};
pub use error::{Error, Result};
pub use filter::filter_by_selection;
pub use flatten::flatten;
pub use graph::{Graph, GraphWarning};
pub use recommend::{adoption_progress, eligible_candidates, next_recommendation};
pub use tree::{DependencyLookup, TreeBuilder, build_tree};
