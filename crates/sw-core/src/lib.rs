//! `sw-core` — foundational types for the `rust_swarm` behavior engine.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no `sw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `TransitionId`, `SubscriptionId`                |
//! | [`geo`]    | `Point` (2-D plane coordinate), Euclidean distance         |
//! | [`time`]   | `Millis`, `Tick`, `FrameClock`                             |
//! | [`config`] | `EngineConfig`                                             |
//! | [`rng`]    | `SimRng` (seeded, reproducible layouts)                    |
//! | [`error`]  | `SwarmError`, `SwarmResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{SwarmError, SwarmResult};
pub use geo::Point;
pub use ids::{AgentId, SubscriptionId, TransitionId};
pub use rng::SimRng;
pub use time::{FrameClock, Millis, Tick};
