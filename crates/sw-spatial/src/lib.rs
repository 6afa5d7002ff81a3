//! `sw-spatial` — which agents are close enough to influence each other.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`neighbors`] | `Neighbor`, `NeighborSets`                                |
//! | [`grid`]      | `ProximityIndex` (uniform grid), `neighbors_brute_force`  |
//!
//! # Membership rule
//!
//! Agent B is a neighbor of agent A when
//! `distance(A, B) <= radius(A.role)`.  The relation is directional: a
//! long-reaching leader may list a worker that does not list it back.
//! Agents whose position is not finite take no part.
//!
//! The grid is an optimization only; its output must equal
//! [`neighbors_brute_force`] for every input.

pub mod grid;
pub mod neighbors;


pub use grid::{neighbors_brute_force, ProximityIndex};
pub use neighbors::{Neighbor, NeighborSets};
