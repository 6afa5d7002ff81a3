//! `ContagionEngine` — one contagion pass per tick, plus injected waves.

use std::collections::BTreeMap;

use sw_agent::{Agent, AgentRegistry, RoleTable};
use sw_core::{AgentId, EngineConfig, Millis, SwarmError, SwarmResult, TransitionId};
use sw_events::EventChannel;
use sw_intent::{EmotionalState, Intent};
use sw_spatial::NeighborSets;
use sw_transition::{FrameScheduler, JumpLimits, TransitionManager, TransitionRequest};
use tracing::debug;

use crate::{momentum, Blend, Impulse, Influence, InfluenceSource};

/// What contagion did to one target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContagionOutcome {
    /// Every influence decayed to zero.
    NoInfluence,
    /// The candidate was within `change_epsilon` of the current intent.
    Unchanged,
    /// A running transition already heads for the voted label.
    InFlight,
    Requested(TransitionId),
    /// The transition manager refused the candidate; contained and logged.
    Rejected,
}

/// Totals for one [`ContagionEngine::run`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContagionReport {
    /// Influences with a positive adjusted magnitude.
    pub influences: usize,
    /// Targets with at least one influence.
    pub evaluated:  usize,
    pub requested:  usize,
    pub rejected:   usize,
    pub unchanged:  usize,
    pub in_flight:  usize,
}

impl ContagionReport {
    fn record(&mut self, outcome: ContagionOutcome) {
        match outcome {
            ContagionOutcome::NoInfluence  => {}
            ContagionOutcome::Unchanged    => self.unchanged += 1,
            ContagionOutcome::InFlight     => self.in_flight += 1,
            ContagionOutcome::Requested(_) => self.requested += 1,
            ContagionOutcome::Rejected     => self.rejected += 1,
        }
    }
}

/// Config-driven contagion rules.  Holds no per-agent state: everything it
/// needs lives in the registry and the transition manager.
#[derive(Clone, Debug, PartialEq)]
pub struct ContagionEngine {
    half_life_ms:   f32,
    change_epsilon: f32,
    limits:         JumpLimits,
}

impl ContagionEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            half_life_ms:   config.momentum_half_life_ms,
            change_epsilon: config.change_epsilon,
            limits:         JumpLimits::from_config(config),
        }
    }

    // ── Influences ────────────────────────────────────────────────────────────

    /// Every directed influence implied by `neighbors`, grouped by target.
    ///
    /// Pairs that name an agent no longer in the registry are skipped.
    pub fn influences(
        &self,
        registry:  &AgentRegistry,
        roles:     &RoleTable,
        neighbors: &NeighborSets,
    ) -> BTreeMap<AgentId, Vec<Influence>> {
        let mut by_target: BTreeMap<AgentId, Vec<Influence>> = BTreeMap::new();
        for (source_id, n) in neighbors.pairs() {
            let (Some(source), Some(target)) = (registry.get(source_id), registry.get(n.id)) else {
                continue;
            };
            let profile = roles.get(source.role);
            by_target.entry(n.id).or_default().push(Influence::new(
                InfluenceSource::Agent(source_id),
                n.id,
                profile.influence_weight,
                n.distance,
                profile.radius,
                roles.resistance(target.role),
            ));
        }
        by_target
    }

    // ── Per-tick pass ─────────────────────────────────────────────────────────

    /// Compute every target's candidate from a frozen view of the registry,
    /// then request transitions in ascending target order.
    pub fn run<S: FrameScheduler>(
        &self,
        registry:    &mut AgentRegistry,
        roles:       &RoleTable,
        neighbors:   &NeighborSets,
        transitions: &mut TransitionManager<S>,
        events:      &mut EventChannel,
        now:         Millis,
    ) -> ContagionReport {
        let by_target = self.influences(registry, roles, neighbors);
        let mut report = ContagionReport {
            influences: by_target.values().flatten().filter(|i| i.is_active()).count(),
            ..ContagionReport::default()
        };

        let headings: BTreeMap<AgentId, EmotionalState> = transitions
            .iter()
            .map(|t| (t.agent, t.to.emotional_state))
            .collect();
        let candidates = self.candidates(registry, roles, &by_target, &headings, now);

        for (target, candidate) in candidates {
            let outcome = match candidate {
                Some(c) => {
                    report.evaluated += 1;
                    self.apply(target, c, registry, roles, transitions, events, now)
                }
                None => ContagionOutcome::NoInfluence,
            };
            report.record(outcome);
        }
        report
    }

    /// Push one [`Impulse`] at `target`, bypassing proximity.
    ///
    /// Returns `UnknownAgent` if `target` is not registered.  A source agent
    /// that has since been removed does not matter: the impulse carries its
    /// own intent.
    #[allow(clippy::too_many_arguments)]
    pub fn inject_wave<S: FrameScheduler>(
        &self,
        target:      AgentId,
        impulse:     &Impulse,
        registry:    &mut AgentRegistry,
        roles:       &RoleTable,
        transitions: &mut TransitionManager<S>,
        events:      &mut EventChannel,
        now:         Millis,
    ) -> SwarmResult<ContagionOutcome> {
        let agent = registry.get(target).ok_or(SwarmError::UnknownAgent(target))?;
        let influence = Influence::new(
            impulse.source,
            target,
            impulse.weight,
            impulse.distance,
            impulse.radius,
            roles.resistance(agent.role),
        );

        let mut blend = Blend::new();
        blend.add(&impulse.intent, influence.adjusted);
        let committed = committed_label(agent, transitions.target_of(target));
        let Some(candidate) = self.resolve(agent, committed, &blend, roles, now) else {
            return Ok(ContagionOutcome::NoInfluence);
        };
        Ok(self.apply(target, candidate, registry, roles, transitions, events, now))
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Read-only phase.  With the `parallel` feature this runs on Rayon's
    /// pool; output order is ascending target id either way.
    fn candidates(
        &self,
        registry:  &AgentRegistry,
        roles:     &RoleTable,
        by_target: &BTreeMap<AgentId, Vec<Influence>>,
        headings:  &BTreeMap<AgentId, EmotionalState>,
        now:       Millis,
    ) -> Vec<(AgentId, Option<Intent>)> {
        let evaluate = |(&target, influences): (&AgentId, &Vec<Influence>)| {
            let candidate = registry.get(target).and_then(|agent| {
                let mut blend = Blend::new();
                for inf in influences {
                    if let InfluenceSource::Agent(src) = inf.source {
                        if let Some(source) = registry.get(src) {
                            blend.add(&source.current_intent, inf.adjusted);
                        }
                    }
                }
                let committed = headings
                    .get(&target)
                    .copied()
                    .unwrap_or(agent.current_intent.emotional_state);
                self.resolve(agent, committed, &blend, roles, now)
            });
            (target, candidate)
        };

        #[cfg(not(feature = "parallel"))]
        {
            by_target.iter().map(evaluate).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let pending: Vec<_> = by_target.iter().collect();
            pending.into_par_iter().map(evaluate).collect()
        }
    }

    /// `None` when nothing reached the agent.
    ///
    /// The momentum self-vote goes to `committed`, the label the agent is
    /// settled on or heading for, not the interpolated label it shows mid-way.
    fn resolve(
        &self,
        agent:     &Agent,
        committed: EmotionalState,
        blend:     &Blend,
        roles:     &RoleTable,
        now:       Millis,
    ) -> Option<Intent> {
        if blend.is_empty() {
            return None;
        }
        let m = momentum(&agent.history, now, self.half_life_ms);
        let current = &agent.current_intent;
        // Discrete fields other than the label never change here, so the
        // applicable threshold is the one for `current → current`.
        let max_jump = self.limits.threshold(current, current, roles.get(agent.role).threshold_tier);
        let base = current.clone().with_emotion(committed);
        Some(blend.resolve(&base, m, max_jump))
    }

    /// Sequential phase: request `candidate` if it is worth a transition,
    /// then append the label the agent ends up committed to onto its
    /// history.  Failures are logged and contained.
    #[allow(clippy::too_many_arguments)]
    fn apply<S: FrameScheduler>(
        &self,
        target:      AgentId,
        candidate:   Intent,
        registry:    &mut AgentRegistry,
        roles:       &RoleTable,
        transitions: &mut TransitionManager<S>,
        events:      &mut EventChannel,
        now:         Millis,
    ) -> ContagionOutcome {
        let outcome = self.request(target, candidate, registry, roles, transitions, events, now);
        if outcome == ContagionOutcome::NoInfluence {
            return outcome;
        }
        let Some(agent) = registry.get(target) else {
            return outcome;
        };
        let label = committed_label(agent, transitions.target_of(target));
        if let Err(e) = registry.record_emotion(target, label, now) {
            debug!(%target, error = %e, "could not record emotional state");
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn request<S: FrameScheduler>(
        &self,
        target:      AgentId,
        candidate:   Intent,
        registry:    &AgentRegistry,
        roles:       &RoleTable,
        transitions: &mut TransitionManager<S>,
        events:      &mut EventChannel,
        now:         Millis,
    ) -> ContagionOutcome {
        let Some(agent) = registry.get(target) else {
            return ContagionOutcome::NoInfluence;
        };
        if !candidate.differs_from(&agent.current_intent, self.change_epsilon) {
            return ContagionOutcome::Unchanged;
        }
        if let Some(heading) = transitions.target_of(target) {
            if heading.emotional_state == candidate.emotional_state {
                return ContagionOutcome::InFlight;
            }
        }

        match transitions.request(registry, roles, events, TransitionRequest::new(target, candidate), now) {
            Ok(id) => ContagionOutcome::Requested(id),
            Err(e) => {
                debug!(%target, error = %e, "contagion transition refused");
                ContagionOutcome::Rejected
            }
        }
    }
}

/// The label `agent` is heading for, or showing when idle.
fn committed_label(agent: &Agent, heading: Option<&Intent>) -> EmotionalState {
    heading.map_or(agent.current_intent.emotional_state, |to| to.emotional_state)
}
