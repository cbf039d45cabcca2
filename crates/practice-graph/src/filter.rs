//! Relation Filter: narrows a flat listing to one practice and its relatives.
//!
//! Relatives are computed over the flattened listing rather than the tree,
//! since the listing is the only view with a single entry per practice:
//!
//! - **ancestors**: practices that depend on the selection, directly or
//!   transitively
//! - **descendants**: practices the selection depends on, directly or
//!   transitively
//!
//! Both closures track visited ids, so malformed or cyclic listings still
//! terminate.

use crate::domain::{FlatNode, PracticeId};
use std::collections::{HashMap, HashSet};

/// Keep `selected`, its ancestors and its descendants, in their original order.
///
/// Returns the listing unchanged when `selected` is empty or not in it.
#[must_use]
pub fn filter_by_selection(flat: &[FlatNode], selected: &str) -> Vec<FlatNode> {
    if selected.is_empty() || !flat.iter().any(|node| node.id().as_str() == selected) {
        return flat.to_vec();
    }

    let ancestors = ancestors_of(flat, selected);
    let descendants = descendants_of(flat, selected);

    flat.iter()
        .filter(|node| {
            let id = node.id().as_str();
            id == selected || ancestors.contains(id) || descendants.contains(id)
        })
        .cloned()
        .collect()
}

/// Practices that depend on `selected`, found by rescanning until no new
/// dependent turns up.
fn ancestors_of<'a>(flat: &'a [FlatNode], selected: &'a str) -> HashSet<&'a str> {
    let mut related: HashSet<&str> = HashSet::from([selected]);
    let mut ancestors: HashSet<&str> = HashSet::new();

    loop {
        let mut changed = false;
        for node in flat {
            let id = node.id().as_str();
            if related.contains(id) {
                continue;
            }
            if node
                .dependencies
                .iter()
                .any(|dep| related.contains(dep.as_str()))
            {
                related.insert(id);
                ancestors.insert(id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    ancestors
}

/// Practices `selected` depends on, following dependency ids through the listing.
fn descendants_of<'a>(flat: &'a [FlatNode], selected: &str) -> HashSet<&'a str> {
    let by_id: HashMap<&str, &FlatNode> = flat
        .iter()
        .map(|node| (node.id().as_str(), node))
        .collect();

    let mut descendants: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&PracticeId> = by_id
        .get(selected)
        .copied()
        .map(|node| node.dependencies.iter().collect())
        .unwrap_or_default();

    while let Some(dep) = stack.pop() {
        let Some(node) = by_id.get(dep.as_str()).copied() else {
            continue;
        };
        let id = node.id().as_str();
        if id == selected || !descendants.insert(id) {
            continue;
        }
        stack.extend(node.dependencies.iter());
    }

    descendants
}
