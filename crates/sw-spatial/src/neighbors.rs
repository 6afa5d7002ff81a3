//! Per-agent neighbor lists produced by the proximity index.

use std::collections::BTreeMap;

use sw_core::AgentId;

/// Another agent within reach, annotated with its distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id: AgentId,
    pub distance: f32,
}

/// `source → [neighbors within source's radius]`, sorted by id at both levels.
///
/// Every indexed agent has an entry, possibly empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborSets {
    sets: BTreeMap<AgentId, Vec<Neighbor>>,
}

impl NeighborSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the neighbors of `source`, sorting them by id.
    pub fn insert(&mut self, source: AgentId, mut neighbors: Vec<Neighbor>) {
        neighbors.sort_by_key(|n| n.id);
        self.sets.insert(source, neighbors);
    }

    /// Neighbors of `source`; empty if `source` was not indexed.
    pub fn get(&self, source: AgentId) -> &[Neighbor] {
        self.sets.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All `(source, neighbor)` pairs in ascending source, then neighbor, order.
    pub fn pairs(&self) -> impl Iterator<Item = (AgentId, &Neighbor)> {
        self.sets
            .iter()
            .flat_map(|(&source, list)| list.iter().map(move |n| (source, n)))
    }

    /// Sources in ascending id order.
    pub fn sources(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.sets.keys().copied()
    }

    /// Total number of ordered pairs.
    pub fn pair_count(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    /// Number of indexed sources.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
