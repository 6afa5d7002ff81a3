//! Event payloads.
//!
//! Every event carries the agent id, the relevant intent snapshot(s) and the
//! host timestamp, so an observer can rebuild an agent's full intent history
//! without querying the engine.

use std::fmt;

use sw_core::{AgentId, Millis, TransitionId};
use sw_intent::{BoundedField, Easing, Intent};

/// Names of the event variants, used to filter subscriptions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Started,
    Progress,
    Rejected,
    Cancelled,
    Completed,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Started,
        EventKind::Progress,
        EventKind::Rejected,
        EventKind::Cancelled,
        EventKind::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Started   => "started",
            EventKind::Progress  => "progress",
            EventKind::Rejected  => "rejected",
            EventKind::Cancelled => "cancelled",
            EventKind::Completed => "completed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a transition stopped before completing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelReason {
    /// A newer request for the same agent replaced it.
    Superseded { by: TransitionId },
    /// The agent was removed from the registry.
    AgentRemoved,
    /// The host cancelled it directly.
    Explicit,
    /// Engine teardown.
    Cleanup,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Superseded { by } => write!(f, "superseded by {by}"),
            CancelReason::AgentRemoved      => f.write_str("agent removed"),
            CancelReason::Explicit          => f.write_str("cancelled"),
            CancelReason::Cleanup           => f.write_str("cleanup"),
        }
    }
}

/// One bounded field that made a requested intent unacceptable.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldViolation {
    /// The requested change exceeded the allowed maximum.
    Jump {
        field:     BoundedField,
        /// Absolute requested change.
        delta:     f32,
        /// Largest change that would have been accepted.
        threshold: f32,
    },
    /// The value lies outside `[0, 1]` or is not a number.
    OutOfRange { field: BoundedField, value: f32 },
}

impl FieldViolation {
    pub fn field(&self) -> BoundedField {
        match *self {
            FieldViolation::Jump { field, .. } | FieldViolation::OutOfRange { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldViolation::Jump { field, delta, threshold } => {
                write!(f, "{field} jump {delta:.3} > {threshold:.3}")
            }
            FieldViolation::OutOfRange { field, value } => {
                write!(f, "{field} value {value:.3} outside [0, 1]")
            }
        }
    }
}

/// Everything the engine publishes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwarmEvent {
    /// A transition was accepted and will be stepped from the next frame.
    Started {
        transition:  TransitionId,
        agent:       AgentId,
        from:        Intent,
        to:          Intent,
        duration_ms: u64,
        easing:      Easing,
        at:          Millis,
    },

    /// One animation step of a running transition.
    Progress {
        transition: TransitionId,
        agent:      AgentId,
        /// `elapsed / duration`, in `[0, 1)`.
        raw:        f32,
        eased:      f32,
        /// The interpolated intent now live on the agent.
        intent:     Intent,
        at:         Millis,
    },

    /// A request failed validation; nothing changed.
    Rejected {
        agent:      AgentId,
        from:       Intent,
        to:         Intent,
        violations: Vec<FieldViolation>,
        at:         Millis,
    },

    /// A transition stopped early.  `intent` is what the agent was left with.
    Cancelled {
        transition: TransitionId,
        agent:      AgentId,
        reason:     CancelReason,
        intent:     Intent,
        at:         Millis,
    },

    /// A transition reached its target; `intent` equals the requested target.
    Completed {
        transition: TransitionId,
        agent:      AgentId,
        intent:     Intent,
        at:         Millis,
    },
}

impl SwarmEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SwarmEvent::Started { .. }   => EventKind::Started,
            SwarmEvent::Progress { .. }  => EventKind::Progress,
            SwarmEvent::Rejected { .. }  => EventKind::Rejected,
            SwarmEvent::Cancelled { .. } => EventKind::Cancelled,
            SwarmEvent::Completed { .. } => EventKind::Completed,
        }
    }

    pub fn agent(&self) -> AgentId {
        match self {
            SwarmEvent::Started { agent, .. }
            | SwarmEvent::Progress { agent, .. }
            | SwarmEvent::Rejected { agent, .. }
            | SwarmEvent::Cancelled { agent, .. }
            | SwarmEvent::Completed { agent, .. } => *agent,
        }
    }

    /// The transition this event belongs to; `None` for rejections, which
    /// never create one.
    pub fn transition(&self) -> Option<TransitionId> {
        match self {
            SwarmEvent::Started { transition, .. }
            | SwarmEvent::Progress { transition, .. }
            | SwarmEvent::Cancelled { transition, .. }
            | SwarmEvent::Completed { transition, .. } => Some(*transition),
            SwarmEvent::Rejected { .. } => None,
        }
    }

    pub fn at(&self) -> Millis {
        match self {
            SwarmEvent::Started { at, .. }
            | SwarmEvent::Progress { at, .. }
            | SwarmEvent::Rejected { at, .. }
            | SwarmEvent::Cancelled { at, .. }
            | SwarmEvent::Completed { at, .. } => *at,
        }
    }

    /// `true` for the two events that end a transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwarmEvent::Cancelled { .. } | SwarmEvent::Completed { .. })
    }
}
