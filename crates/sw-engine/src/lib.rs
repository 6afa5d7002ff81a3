//! `sw-engine` — tick loop orchestrator for the rust_swarm behavior engine.
//!
//! # Tick loop
//!
//! ```text
//! Swarm::tick(now):
//!   ① Frame     — step every transition due this frame (requests made in
//!                 earlier ticks); write interpolated intents; publish
//!                 Progress / Completed.
//!   ② Proximity — rebuild the grid index from current positions and derive
//!                 neighbor sets.
//!   ③ Contagion — compute candidates (parallel with the `parallel` feature),
//!                 then request transitions in ascending AgentId order.  New
//!                 requests are stepped from the next tick.
//! ```
//!
//! The host owns time: it calls `tick(now)` from its own frame loop, or uses
//! [`Swarm::run_ticks`] to let the internal `FrameClock` supply timestamps.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs contagion candidate computation on Rayon's pool.  |
//! | `serde`    | Serde derives on config and data types.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_agent::{AgentSpec, Role};
//! use sw_core::{EngineConfig, Point};
//! use sw_engine::{NoopObserver, SwarmBuilder};
//!
//! let mut swarm = SwarmBuilder::new(EngineConfig::default())
//!     .agent(AgentSpec::new(Role::Leader, Point::new(0.0, 0.0)))
//!     .build()?;
//! swarm.run_ticks(120, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod swarm;


pub use builder::SwarmBuilder;
pub use error::{EngineError, EngineResult};
pub use observer::{NoopObserver, SwarmObserver};
pub use report::{SwarmStatus, TickReport};
pub use swarm::Swarm;
