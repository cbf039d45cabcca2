//! Engine configuration.
//!
//! The engine itself never reads files; hosts deserialize [`EngineConfig`]
//! from whatever configuration source they own and pass it in.

use serde::{Deserialize, Serialize};

/// Default maximum depth of a materialized tree.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 100;

/// Default number of nodes a single cycle probe may expand.
pub const DEFAULT_MAX_CYCLE_HOPS: usize = 100;

/// Traversal limits applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    /// Nodes deeper than this are kept but not expanded.
    pub max_tree_depth: usize,

    /// Upper bound on nodes expanded when checking a prospective edge for cycles.
    pub max_cycle_hops: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            max_cycle_hops: DEFAULT_MAX_CYCLE_HOPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max-tree-depth": 7}"#).unwrap();
        assert_eq!(config.max_tree_depth, 7);
        assert_eq!(config.max_cycle_hops, DEFAULT_MAX_CYCLE_HOPS);
    }
}
