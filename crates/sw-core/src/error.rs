//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums; `EngineError` wraps this one via
//! `From` so `?` works across the orchestrator.

use thiserror::Error;

use crate::AgentId;

/// The base error type shared by the `sw-*` crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwarmError {
    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sw-core` and the registry.
pub type SwarmResult<T> = Result<T, SwarmError>;
