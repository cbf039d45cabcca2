//! Recommendation Engine: what to adopt next, and how far along a team is.
//!
//! # Selection
//!
//! 1. Candidates are practices not in the adoption set.
//! 2. A candidate is eligible when every direct dependency is adopted.
//!    Practices without dependencies are always eligible.
//! 3. Eligible candidates are ordered by maturity tier (missing tier counts
//!    as 0), then by id, and the first one wins.
//!
//! Running out of candidates is not an error: [`Recommendation::Complete`]
//! means everything is adopted, [`Recommendation::Blocked`] means practices
//! remain but none has all of its dependencies adopted. Over an acyclic graph
//! some unadopted practice always has only adopted dependencies, so `Blocked`
//! is reported only if that invariant was somehow broken.

use crate::adoption::AdoptionSet;
use crate::domain::{AdoptionProgress, Practice, Recommendation};
use crate::graph::Graph;

/// Every eligible, unadopted practice, best first.
#[must_use]
pub fn eligible_candidates<'a>(graph: &'a Graph, adopted: &AdoptionSet) -> Vec<&'a Practice> {
    let mut eligible: Vec<&Practice> = graph
        .practices()
        .into_iter()
        .filter(|practice| !adopted.contains(practice.id.as_str()))
        .filter(|practice| {
            graph
                .dependency_ids(practice.id.as_str())
                .all(|dep| adopted.contains(dep.as_str()))
        })
        .collect();

    eligible.sort_by(|a, b| {
        a.maturity_level
            .unwrap_or(0)
            .cmp(&b.maturity_level.unwrap_or(0))
            .then_with(|| a.id.cmp(&b.id))
    });
    eligible
}

/// The single best practice to adopt next.
#[must_use]
pub fn next_recommendation(graph: &Graph, adopted: &AdoptionSet) -> Recommendation {
    if let Some(best) = eligible_candidates(graph, adopted).first() {
        return Recommendation::Next((*best).clone());
    }

    let remaining = graph
        .practices()
        .iter()
        .filter(|practice| !adopted.contains(practice.id.as_str()))
        .count();

    if remaining == 0 {
        Recommendation::Complete
    } else {
        tracing::debug!(remaining, "No eligible practice; every candidate has an unmet dependency");
        Recommendation::Blocked { remaining }
    }
}

/// Adoption progress over the whole graph.
///
/// Only adopted ids that resolve to practices in `graph` are counted. The
/// percentage is rounded to the nearest integer (halves round up) and is 0
/// for an empty graph.
#[must_use]
pub fn adoption_progress(graph: &Graph, adopted: &AdoptionSet) -> AdoptionProgress {
    let total = graph.len();
    let adopted = adopted.iter().filter(|id| graph.contains(id)).count();

    let percentage = if total == 0 {
        0
    } else {
        u8::try_from((adopted * 100 + total / 2) / total).unwrap_or(100)
    };

    AdoptionProgress {
        total,
        adopted,
        percentage,
    }
}
