use std::fmt;

use sw_core::{Millis, Tick};
use sw_intent::EmotionalState;

/// What one [`Swarm::tick`][crate::Swarm::tick] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:                  Tick,
    pub now:                   Millis,
    /// Transitions advanced this frame, including completions.
    pub frames_stepped:        usize,
    pub completed:             usize,
    /// Influences with a positive adjusted magnitude.
    pub influences:            usize,
    pub transitions_requested: usize,
    /// Contagion candidates the transition manager refused.
    pub transitions_rejected:  usize,
}

/// Point-in-time summary of the swarm.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwarmStatus {
    pub agent_count:        usize,
    pub active_transitions: usize,
    /// From the most recent tick.
    pub active_influences:  usize,
    /// Most common live emotional state; ties go to the lowest ordinal.
    /// `None` when the swarm is empty.
    pub dominant_emotion:   Option<EmotionalState>,
    /// Ticks processed so far.
    pub tick:               Tick,
}

impl fmt::Display for SwarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} agents, {} transitions, {} influences, mood {}",
            self.tick,
            self.agent_count,
            self.active_transitions,
            self.active_influences,
            self.dominant_emotion.map_or("-", EmotionalState::as_str),
        )
    }
}
