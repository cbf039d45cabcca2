//! Tree Flattener: collapses a dependency tree into a deduplicated listing.
//!
//! A practice reachable along several paths is listed once, at the deepest
//! level it occurs ("deepest wins"): a practice is only as ready to adopt as
//! its most dependent appearance implies.
//!
//! Output is ordered by level ascending, then id ascending.

use crate::domain::{FlatNode, PracticeId, TreeNode};
use std::collections::HashMap;

/// Flatten a tree into one [`FlatNode`] per distinct practice.
///
/// Each node's `dependencies` is the union of its children's ids over every
/// occurrence in the tree, in first-seen order. Occurrences cut short by a
/// depth or cycle guard contribute no children, so the union still lists the
/// full dependency set whenever any occurrence was expanded.
#[must_use]
pub fn flatten(tree: &TreeNode) -> Vec<FlatNode> {
    // Collect every occurrence per practice
    let mut occurrences: HashMap<&PracticeId, Vec<&TreeNode>> = HashMap::new();
    tree.walk(&mut |node| occurrences.entry(node.id()).or_default().push(node));

    let mut flat: Vec<FlatNode> = occurrences
        .into_values()
        .filter_map(|nodes| {
            let deepest = nodes.iter().copied().max_by_key(|node| node.level)?;

            let mut dependencies: Vec<PracticeId> = Vec::new();
            for child in nodes.iter().flat_map(|node| &node.dependencies) {
                if !dependencies.contains(child.id()) {
                    dependencies.push(child.id().clone());
                }
            }

            Some(FlatNode {
                practice: deepest.practice.clone(),
                level: deepest.level,
                adopted: deepest.adopted,
                dependencies,
            })
        })
        .collect();

    flat.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.id().cmp(b.id())));
    flat
}
