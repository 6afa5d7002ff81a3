//! Fluent builder for constructing a [`Swarm`].

use sw_agent::{AgentRegistry, AgentSpec, RoleTable};
use sw_contagion::ContagionEngine;
use sw_core::{AgentId, EngineConfig, Millis};
use sw_events::EventChannel;
use sw_spatial::NeighborSets;
use sw_transition::{FrameQueue, FrameScheduler, TransitionManager};
use tracing::info;

use crate::{EngineResult, Swarm};

/// Fluent builder for [`Swarm<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                    |
/// |----------------------|----------------------------|
/// | `.roles(t)`          | `RoleTable::standard()`    |
/// | `.scheduler(s)`      | `FrameQueue`               |
/// | `.agent(spec)`       | empty roster               |
/// | `.agent_with_id(..)` | empty roster               |
/// | `.events(ch)`        | fresh `EventChannel`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut swarm = SwarmBuilder::new(config)
///     .roles(roles)
///     .agent(AgentSpec::new(Role::Leader, Point::new(0.0, 0.0)))
///     .build()?;
/// ```
pub struct SwarmBuilder<S: FrameScheduler = FrameQueue> {
    config:    EngineConfig,
    roles:     Option<RoleTable>,
    scheduler: S,
    events:    Option<EventChannel>,
    roster:    Vec<(Option<AgentId>, AgentSpec)>,
}

impl SwarmBuilder<FrameQueue> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            roles:     None,
            scheduler: FrameQueue::new(),
            events:    None,
            roster:    Vec::new(),
        }
    }
}

impl<S: FrameScheduler> SwarmBuilder<S> {
    /// Replace the role table.  Tune profiles before building; the engine
    /// treats the table as fixed afterwards.
    pub fn roles(mut self, roles: RoleTable) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Drive transitions from a host-supplied frame scheduler.
    pub fn scheduler<T: FrameScheduler>(self, scheduler: T) -> SwarmBuilder<T> {
        SwarmBuilder {
            config: self.config,
            roles: self.roles,
            scheduler,
            events: self.events,
            roster: self.roster,
        }
    }

    /// Use a channel that already has subscribers attached.
    pub fn events(mut self, events: EventChannel) -> Self {
        self.events = Some(events);
        self
    }

    /// Register an agent with the next free id.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.roster.push((None, spec));
        self
    }

    pub fn agent_with_id(mut self, id: AgentId, spec: AgentSpec) -> Self {
        self.roster.push((Some(id), spec));
        self
    }

    /// Validate the config, register the initial roster and return a
    /// ready-to-tick [`Swarm`].
    pub fn build(self) -> EngineResult<Swarm<S>> {
        self.config.validate()?;

        let start: Millis = self.config.start_ms;
        let mut registry = AgentRegistry::new(self.config.history_capacity);
        // Explicit ids first so auto-assigned ones never collide with them.
        for (id, spec) in self.roster.iter().filter(|(id, _)| id.is_some()) {
            if let Some(id) = *id {
                registry.register_with_id(id, spec.clone(), start)?;
            }
        }
        for (_, spec) in self.roster.into_iter().filter(|(id, _)| id.is_none()) {
            registry.register(spec, start);
        }

        let roles = self.roles.unwrap_or_default();
        info!(
            agents = registry.len(),
            frame_interval_ms = self.config.frame_interval_ms,
            "swarm engine built"
        );

        Ok(Swarm {
            clock:       self.config.make_clock(),
            transitions: TransitionManager::with_scheduler(&self.config, self.scheduler),
            contagion:   ContagionEngine::new(&self.config),
            events:      self.events.unwrap_or_default(),
            neighbors:   NeighborSets::new(),
            last_now:    start,
            influences:  0,
            config:      self.config,
            registry,
            roles,
        })
    }
}
