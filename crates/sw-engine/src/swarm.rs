//! The `Swarm` struct and its tick loop.

use sw_agent::{Agent, AgentRegistry, AgentSpec, Role, RoleTable};
use sw_contagion::{ContagionEngine, ContagionOutcome, Impulse};
use sw_core::{AgentId, EngineConfig, FrameClock, Millis, Point, SubscriptionId, TransitionId};
use sw_events::{CancelReason, EventChannel, EventKind, SubscriberError, SwarmEvent};
use sw_intent::{EmotionalState, Intent};
use sw_spatial::{NeighborSets, ProximityIndex};
use sw_transition::{FrameQueue, FrameScheduler, TransitionManager, TransitionOptions, TransitionRequest};
use tracing::{debug, info};

use crate::{EngineResult, SwarmObserver, SwarmStatus, TickReport};

/// The engine.
///
/// `Swarm<S>` owns every piece of state and drives the three-phase tick
/// described in the crate docs.  The registry is the single source of truth
/// for which agents exist and where they are; only the transition manager
/// writes live intents after registration.
///
/// Create via [`SwarmBuilder`][crate::SwarmBuilder].
pub struct Swarm<S: FrameScheduler = FrameQueue> {
    pub(crate) config:      EngineConfig,
    pub(crate) clock:       FrameClock,
    pub(crate) registry:    AgentRegistry,
    pub(crate) roles:       RoleTable,
    pub(crate) transitions: TransitionManager<S>,
    pub(crate) contagion:   ContagionEngine,
    pub(crate) events:      EventChannel,
    /// Neighbor sets from the most recent tick.
    pub(crate) neighbors:   NeighborSets,
    /// Latest timestamp seen; used for events raised outside `tick`.
    pub(crate) last_now:    Millis,
    pub(crate) influences:  usize,
}

impl<S: FrameScheduler> Swarm<S> {
    // ── Roster (driven by the host) ───────────────────────────────────────────

    pub fn add_agent(&mut self, spec: AgentSpec) -> AgentId {
        let id = self.registry.register(spec, self.last_now);
        debug!(agent = %id, "agent added");
        id
    }

    pub fn add_agent_with_id(&mut self, id: AgentId, spec: AgentSpec) -> EngineResult<()> {
        self.registry.register_with_id(id, spec, self.last_now)?;
        debug!(agent = %id, "agent added");
        Ok(())
    }

    /// Remove an agent, cancelling its transition first.  Returns `None` if
    /// it was not registered, so removing twice is harmless.
    pub fn remove_agent(&mut self, id: AgentId) -> Option<Agent> {
        self.transitions
            .cancel(&mut self.events, id, CancelReason::AgentRemoved, self.last_now);
        let agent = self.registry.remove(id)?;
        debug!(agent = %id, "agent removed");
        Some(agent)
    }

    pub fn update_position(&mut self, id: AgentId, position: Point) -> EngineResult<()> {
        Ok(self.registry.update_position(id, position)?)
    }

    pub fn set_role(&mut self, id: AgentId, role: Role) -> EngineResult<()> {
        Ok(self.registry.set_role(id, role)?)
    }

    // ── Time ──────────────────────────────────────────────────────────────────

    /// Process one frame at host time `now`.
    pub fn tick(&mut self, now: Millis) -> TickReport {
        let tick = self.clock.current_tick;
        self.last_now = now;

        // ── Phase 1: animation frame ──────────────────────────────────────────
        let frame = self.transitions.step(&mut self.registry, &mut self.events, now);

        // ── Phase 2: proximity ────────────────────────────────────────────────
        self.neighbors = ProximityIndex::build(&self.registry, &self.roles).neighbor_sets();

        // ── Phase 3: contagion ────────────────────────────────────────────────
        let contagion = self.contagion.run(
            &mut self.registry,
            &self.roles,
            &self.neighbors,
            &mut self.transitions,
            &mut self.events,
            now,
        );
        self.influences = contagion.influences;
        self.clock.advance();

        TickReport {
            tick,
            now,
            frames_stepped:        frame.stepped(),
            completed:             frame.completed,
            influences:            contagion.influences,
            transitions_requested: contagion.requested,
            transitions_rejected:  contagion.rejected,
        }
    }

    /// Run `n` ticks with timestamps from the internal `FrameClock`.
    ///
    /// Useful for tests and headless hosts.
    pub fn run_ticks<O: SwarmObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let tick = self.clock.current_tick;
            let now = self.clock.now();
            observer.on_tick_start(tick);
            let report = self.tick(now);
            observer.on_tick_end(tick, &report);
        }
    }

    /// Cancel every transition (reason `Cleanup`) and release every frame.
    /// The roster is kept.  Returns the number of transitions cancelled.
    pub fn cleanup(&mut self) -> usize {
        let cancelled = self
            .transitions
            .cancel_all(&mut self.events, CancelReason::Cleanup, self.last_now);
        info!(cancelled, agents = self.registry.len(), "swarm cleaned up");
        cancelled
    }

    /// [`cleanup`](Self::cleanup), then notify `observer`.
    pub fn shutdown<O: SwarmObserver>(&mut self, observer: &mut O) -> usize {
        let cancelled = self.cleanup();
        observer.on_cleanup(cancelled);
        cancelled
    }

    // ── Direct control ────────────────────────────────────────────────────────

    /// Start a validated transition from the agent's live intent.
    pub fn request_transition(
        &mut self,
        agent:   AgentId,
        to:      Intent,
        options: TransitionOptions,
        now:     Millis,
    ) -> EngineResult<TransitionId> {
        self.last_now = self.last_now.max(now);
        let request = TransitionRequest::new(agent, to).options(options);
        Ok(self
            .transitions
            .request(&self.registry, &self.roles, &mut self.events, request, now)?)
    }

    /// Idempotent: `None` when the agent had nothing running.
    pub fn cancel_transition(&mut self, agent: AgentId) -> Option<TransitionId> {
        self.transitions
            .cancel(&mut self.events, agent, CancelReason::Explicit, self.last_now)
    }

    /// Push an impulse at `target` outside the proximity model.
    pub fn inject_wave(&mut self, target: AgentId, impulse: Impulse, now: Millis) -> EngineResult<ContagionOutcome> {
        self.last_now = self.last_now.max(now);
        Ok(self.contagion.inject_wave(
            target,
            &impulse,
            &mut self.registry,
            &self.roles,
            &mut self.transitions,
            &mut self.events,
            now,
        )?)
    }

    // ── Events ────────────────────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&SwarmEvent) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&SwarmEvent) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn events_mut(&mut self) -> &mut EventChannel {
        &mut self.events
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Live intent of `agent`.
    pub fn intent(&self, agent: AgentId) -> Option<&Intent> {
        self.registry.get(agent).map(|a| &a.current_intent)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.registry.get(id)
    }

    pub fn status(&self) -> SwarmStatus {
        let mut counts = [0.0_f32; EmotionalState::COUNT];
        for agent in self.registry.iter() {
            counts[agent.current_intent.emotional_state.ordinal()] += 1.0;
        }
        SwarmStatus {
            agent_count:        self.registry.len(),
            active_transitions: self.transitions.active_count(),
            active_influences:  self.influences,
            dominant_emotion:   EmotionalState::dominant(&counts),
            tick:               self.clock.current_tick,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transitions(&self) -> &TransitionManager<S> {
        &self.transitions
    }

    /// Neighbor sets computed by the most recent tick.
    pub fn neighbors(&self) -> &NeighborSets {
        &self.neighbors
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<S: FrameScheduler> Drop for Swarm<S> {
    fn drop(&mut self) {
        if self.transitions.active_count() > 0 {
            self.cleanup();
        }
    }
}

