//! `sw-transition` — moves an agent's live intent toward a requested target.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`scheduler`]  | `FrameScheduler` trait, `FrameQueue` (`BTreeMap<Tick, Vec<AgentId>>`) |
//! | [`validate`]   | `JumpLimits`, `validate_jump`, `validate_bounds`              |
//! | [`transition`] | `Transition`, `TransitionRequest`, `TransitionOptions`       |
//! | [`manager`]    | `TransitionManager` — request / step / cancel                |
//! | [`error`]      | `TransitionError`, `ValidationError`, `TransitionResult<T>`  |
//!
//! # Per-agent state machine
//!
//! ```text
//! Idle ──request(valid)──▶ Transitioning ──raw ≥ 1──▶ Idle   (Completed)
//!                              │  ▲
//!                              │  └── request(valid): old one Cancelled{Superseded}
//!                              └──── cancel / remove / cleanup ──▶ Idle (Cancelled)
//! ```
//!
//! A request is only stepped from the frame *after* the one in which it was
//! made, so the first `Progress` (or `Completed`) always follows `Started`.

pub mod error;
pub mod manager;
pub mod scheduler;
pub mod transition;
pub mod validate;

#[cfg(test)]
mod tests;

pub use error::{TransitionError, TransitionResult, ValidationError};
pub use manager::{StepReport, TransitionManager};
pub use scheduler::{FrameQueue, FrameScheduler};
pub use transition::{Transition, TransitionOptions, TransitionRequest};
pub use validate::{range_violations, validate_bounds, validate_jump, JumpLimits, JUMP_TOLERANCE};
