//! `sw-agent` — the authoritative set of active agents.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`role`]     | `Role`, `RoleProfile`, `ThresholdTier`, `RoleTable`        |
//! | [`history`]  | `EmotionalHistory` — bounded ring of recent labels         |
//! | [`registry`] | `Agent`, `AgentSpec`, `AgentRegistry`                      |
//!
//! # Ownership rules
//!
//! The registry is the single source of truth for agent existence and
//! position.  Positions are written only through
//! [`AgentRegistry::update_position`] (driven by the host), and
//! `current_intent` only through [`AgentRegistry::set_current_intent`]
//! (driven by the transition manager).

pub mod history;
pub mod registry;
pub mod role;


pub use history::EmotionalHistory;
pub use registry::{Agent, AgentRegistry, AgentSpec};
pub use role::{Role, RoleProfile, RoleTable, ThresholdTier};
