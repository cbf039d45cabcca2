//! Per-query snapshot of adopted practices.
//!
//! Adoption state is owned by the host (typically persisted client-side) and
//! drifts from the catalog as practices are renamed or removed. The set is
//! therefore lenient on input: blank, duplicate, and non-string entries are
//! dropped instead of raising errors. Ids that do not resolve to a practice
//! are kept but ignored by every graph operation.

use serde_json::Value;
use std::collections::BTreeSet;

/// A read-only, deduplicated set of adopted practice ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdoptionSet {
    ids: BTreeSet<String>,
}

impl AdoptionSet {
    /// An empty adoption set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw id strings, trimming them and dropping blanks.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .filter_map(|id| normalize(id.as_ref()))
            .collect();
        Self { ids }
    }

    /// Build from an untyped JSON value, as stored by clients.
    ///
    /// Accepts an array whose entries are id strings or objects with a string
    /// `id` field. Anything else (numbers, nulls, nested arrays, a non-array
    /// top level) contributes nothing.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(entries) = value.as_array() else {
            tracing::debug!("Adoption state is not an array, treating as empty");
            return Self::new();
        };

        let mut dropped = 0usize;
        let ids = entries
            .iter()
            .filter_map(|entry| {
                let id = match entry {
                    Value::String(id) => normalize(id),
                    Value::Object(map) => map.get("id").and_then(Value::as_str).and_then(normalize),
                    _ => None,
                };
                if id.is_none() {
                    dropped += 1;
                }
                id
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(dropped, "Dropped unusable adoption entries");
        }

        Self { ids }
    }

    /// Whether `id` is adopted.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct ids, including ids unknown to any graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AdoptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

fn normalize(id: &str) -> Option<String> {
    let trimmed = id.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
