use std::fmt;

use sw_core::AgentId;
use sw_events::FieldViolation;
use thiserror::Error;

/// A requested jump that exceeded the max-jump rule on at least one field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub agent:      AgentId,
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intent jump rejected for {}:", self.agent)?;
        for v in &self.violations {
            write!(f, " {v};")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),
}

pub type TransitionResult<T> = Result<T, TransitionError>;
