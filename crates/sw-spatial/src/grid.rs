//! Uniform-grid proximity index.
//!
//! # Data layout
//!
//! The plane is cut into square cells sized to the largest influence radius
//! among the indexed agents.  Each agent is bucketed by the cell that
//! contains it:
//!
//! ```text
//! cells: (cx, cy) → [entry index, …]
//! ```
//!
//! A query for radius `r <= cell_size` only has to look at the 3×3 block of
//! cells around the query point; larger radii widen the ring.  Building is one
//! O(N) pass and a full neighbor sweep costs O(N · k) for k agents per block,
//! instead of the O(N²) all-pairs scan in [`neighbors_brute_force`].

use rustc_hash::FxHashMap;

use sw_agent::{AgentRegistry, RoleTable};
use sw_core::{AgentId, Point};

use crate::{Neighbor, NeighborSets};

/// Cell side relative to the largest indexed radius.
const CELL_MARGIN: f32 = 1.001;

/// Snapshot of one indexed agent.
#[derive(Copy, Clone, Debug)]
struct Entry {
    id: AgentId,
    position: Point,
    radius: f32,
}

/// Spatial hash of agent positions for one tick.
///
/// Rebuild every tick after the host has pushed position updates; the index
/// holds copies, not references, so the registry stays free to change.
pub struct ProximityIndex {
    cell_size: f32,
    /// Indexed agents in ascending id order.
    entries: Vec<Entry>,
    cells: FxHashMap<(i32, i32), Vec<u32>>,
}

impl ProximityIndex {
    /// Index every agent in `registry` with a finite position, using each
    /// agent's role radius from `roles`.
    pub fn build(registry: &AgentRegistry, roles: &RoleTable) -> Self {
        let entries: Vec<Entry> = registry
            .iter()
            .filter(|a| a.position.is_finite())
            .map(|a| Entry {
                id: a.id,
                position: a.position,
                radius: roles.radius(a.role),
            })
            .collect();

        let max_radius = entries.iter().map(|e| e.radius).fold(0.0_f32, f32::max);
        // Cells are a hair wider than the largest radius so f32 rounding in
        // the distance check can never accept a pair two cells apart.  A
        // zero-radius population still needs a positive cell; only exact
        // co-location counts then, and co-located points share a cell.
        let cell_size = if max_radius > 0.0 { max_radius * CELL_MARGIN } else { 1.0 };

        let mut cells: FxHashMap<(i32, i32), Vec<u32>> = FxHashMap::default();
        for (i, e) in entries.iter().enumerate() {
            cells.entry(e.position.cell(cell_size)).or_default().push(i as u32);
        }

        Self { cell_size, entries, cells }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of indexed agents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed agents within `radius` of `center` (inclusive), excluding
    /// `exclude`, sorted by id.
    pub fn within(&self, center: Point, radius: f32, exclude: Option<AgentId>) -> Vec<Neighbor> {
        if !center.is_finite() || !(radius >= 0.0) {
            return vec![];
        }
        let ring = ((radius / self.cell_size).ceil() as i32).max(1);
        let block = (2 * ring as u64 + 1).saturating_mul(2 * ring as u64 + 1);

        let mut found = Vec::new();
        if block > self.entries.len() as u64 {
            // Scanning the block would visit more cells than there are agents.
            for e in &self.entries {
                if Some(e.id) == exclude {
                    continue;
                }
                let distance = center.distance(e.position);
                if distance <= radius {
                    found.push(Neighbor { id: e.id, distance });
                }
            }
            return found;
        }

        let (cx, cy) = center.cell(self.cell_size);
        for dx in -ring..=ring {
            for dy in -ring..=ring {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                let Some(bucket) = self.cells.get(&key) else {
                    continue;
                };
                for &i in bucket {
                    let e = &self.entries[i as usize];
                    if Some(e.id) == exclude {
                        continue;
                    }
                    let distance = center.distance(e.position);
                    if distance <= radius {
                        found.push(Neighbor { id: e.id, distance });
                    }
                }
            }
        }
        // Saturated cell keys can repeat near the i32 edge; sort + dedup keeps
        // the result exact there too.
        found.sort_by_key(|n| n.id);
        found.dedup_by_key(|n| n.id);
        found
    }

    /// Neighbors of one indexed agent; empty if `id` is not indexed.
    pub fn neighbors_of(&self, id: AgentId) -> Vec<Neighbor> {
        match self.entries.binary_search_by_key(&id, |e| e.id) {
            Ok(i) => {
                let e = self.entries[i];
                self.within(e.position, e.radius, Some(e.id))
            }
            Err(_) => vec![],
        }
    }

    /// Neighbor lists for every indexed agent.
    pub fn neighbor_sets(&self) -> NeighborSets {
        let mut sets = NeighborSets::new();
        for e in &self.entries {
            sets.insert(e.id, self.within(e.position, e.radius, Some(e.id)));
        }
        sets
    }
}

/// O(N²) reference implementation of [`ProximityIndex::neighbor_sets`].
///
/// Kept for verification; the grid must agree with it exactly.
pub fn neighbors_brute_force(registry: &AgentRegistry, roles: &RoleTable) -> NeighborSets {
    let mut sets = NeighborSets::new();
    for source in registry.iter().filter(|a| a.position.is_finite()) {
        let radius = roles.radius(source.role);
        let list = registry
            .iter()
            .filter(|t| t.id != source.id && t.position.is_finite())
            .filter_map(|t| {
                let distance = source.position.distance(t.position);
                (distance <= radius).then_some(Neighbor { id: t.id, distance })
            })
            .collect();
        sets.insert(source.id, list);
    }
    sets
}
