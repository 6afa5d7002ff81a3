//! `AgentRegistry` — who exists, where they are, and what they intend.
//!
//! Agents live in a `BTreeMap` keyed by `AgentId` so every walk over the
//! population happens in ascending id order, independent of the order in
//! which the host registered or moved them.

use std::collections::BTreeMap;

use sw_core::{AgentId, Millis, Point, SwarmError, SwarmResult};
use sw_intent::{EmotionalState, Intent};

use crate::{EmotionalHistory, Role};

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One registered unit.
///
/// Fields are readable by anyone holding `&Agent`; mutation goes through the
/// registry so the ownership rules in the crate docs hold.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    /// Owned by the host's presentation/physics layer.
    pub position: Point,
    pub role: Role,
    /// The live intent, interpolated while a transition is running.
    pub current_intent: Intent,
    pub history: EmotionalHistory,
    /// When the agent was registered.
    pub registered_at: Millis,
}

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Everything the host supplies when registering a unit.
#[derive(Clone, Debug, Default)]
pub struct AgentSpec {
    pub position: Point,
    pub role: Role,
    pub intent: Intent,
}

impl AgentSpec {
    pub fn new(role: Role, position: Point) -> Self {
        Self {
            position,
            role,
            intent: Intent::default(),
        }
    }

    pub fn intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }
}

// ── AgentRegistry ─────────────────────────────────────────────────────────────

/// Authoritative set of active agents.
#[derive(Clone, Debug)]
pub struct AgentRegistry {
    agents:           BTreeMap<AgentId, Agent>,
    next_id:          AgentId,
    history_capacity: usize,
}

impl AgentRegistry {
    /// An empty registry whose agents keep `history_capacity` history entries.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            agents: BTreeMap::new(),
            next_id: AgentId(0),
            history_capacity,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Register a new agent under a freshly allocated id.
    ///
    /// The history is seeded with the initial emotional state at `now`.
    pub fn register(&mut self, spec: AgentSpec, now: Millis) -> AgentId {
        let mut id = self.next_id;
        while self.agents.contains_key(&id) {
            id = id.next();
        }
        self.insert(id, spec, now);
        self.next_id = id.next();
        id
    }

    /// Register an agent under a host-chosen id.
    ///
    /// # Errors
    ///
    /// `DuplicateAgent` if the id is taken, `Config` for `AgentId::INVALID`.
    pub fn register_with_id(&mut self, id: AgentId, spec: AgentSpec, now: Millis) -> SwarmResult<()> {
        if id == AgentId::INVALID {
            return Err(SwarmError::Config("AgentId::INVALID cannot be registered".into()));
        }
        if self.agents.contains_key(&id) {
            return Err(SwarmError::DuplicateAgent(id));
        }
        self.insert(id, spec, now);
        if id >= self.next_id {
            self.next_id = id.next();
        }
        Ok(())
    }

    fn insert(&mut self, id: AgentId, spec: AgentSpec, now: Millis) {
        let mut history = EmotionalHistory::new(self.history_capacity);
        history.push(spec.intent.emotional_state, now);
        self.agents.insert(id, Agent {
            id,
            position: spec.position,
            role: spec.role,
            current_intent: spec.intent,
            history,
            registered_at: now,
        });
    }

    /// Remove an agent, discarding its history.  `None` if it was not present.
    ///
    /// Callers that run transitions must cancel them as well; the engine's
    /// `Swarm::remove_agent` does both.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    // ── Host-owned attributes ─────────────────────────────────────────────

    pub fn update_position(&mut self, id: AgentId, position: Point) -> SwarmResult<()> {
        self.agent_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_role(&mut self, id: AgentId, role: Role) -> SwarmResult<()> {
        self.agent_mut(id)?.role = role;
        Ok(())
    }

    // ── Engine-owned attributes ───────────────────────────────────────────

    /// Replace the live intent.  Reserved for the transition manager.
    pub fn set_current_intent(&mut self, id: AgentId, intent: Intent) -> SwarmResult<()> {
        self.agent_mut(id)?.current_intent = intent;
        Ok(())
    }

    /// Append a label to the agent's emotional history.
    pub fn record_emotion(&mut self, id: AgentId, label: EmotionalState, at: Millis) -> SwarmResult<()> {
        self.agent_mut(id)?.history.push(label, at);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Like [`get`](Self::get) but reports a missing agent as an error.
    pub fn require(&self, id: AgentId) -> SwarmResult<&Agent> {
        self.agents.get(&id).ok_or(SwarmError::UnknownAgent(id))
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    fn agent_mut(&mut self, id: AgentId) -> SwarmResult<&mut Agent> {
        self.agents.get_mut(&id).ok_or(SwarmError::UnknownAgent(id))
    }
}
