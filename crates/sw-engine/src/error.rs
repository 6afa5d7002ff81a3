use sw_core::{AgentId, SwarmError};
use sw_transition::TransitionError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error("transition error: {0}")]
    Transition(#[from] TransitionError),
}

impl From<SwarmError> for EngineError {
    fn from(e: SwarmError) -> Self {
        match e {
            SwarmError::UnknownAgent(id)   => EngineError::UnknownAgent(id),
            SwarmError::DuplicateAgent(id) => EngineError::DuplicateAgent(id),
            SwarmError::Config(msg)        => EngineError::Config(msg),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
