//! `TransitionManager` — owns every active transition and the frame queue.

use std::collections::BTreeMap;

use sw_agent::{AgentRegistry, RoleTable};
use sw_core::{AgentId, EngineConfig, Millis, Tick, TransitionId};
use sw_events::{CancelReason, EventChannel, FieldViolation, SwarmEvent};
use sw_intent::{Intent, interpolate};
use tracing::debug;

use crate::{
    FrameQueue, FrameScheduler, JumpLimits, Transition, TransitionError, TransitionRequest,
    TransitionResult, ValidationError, range_violations, validate_jump,
};

/// What one [`TransitionManager::step`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Transitions advanced without finishing.
    pub progressed: usize,
    pub completed:  usize,
}

impl StepReport {
    pub fn stepped(&self) -> usize {
        self.progressed + self.completed
    }
}

/// Holds at most one active transition per agent.
///
/// The manager is the only writer of `Agent::current_intent` after
/// registration: each step writes the interpolated intent, and completion
/// writes the target exactly.
pub struct TransitionManager<S: FrameScheduler = FrameQueue> {
    active:              BTreeMap<AgentId, Transition>,
    scheduler:           S,
    limits:              JumpLimits,
    default_duration_ms: u64,
    /// Frames stepped so far; requests are scheduled for `frame + 1`.
    frame:               Tick,
    next_id:             TransitionId,
}

impl TransitionManager<FrameQueue> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_scheduler(config, FrameQueue::new())
    }
}

impl<S: FrameScheduler> TransitionManager<S> {
    pub fn with_scheduler(config: &EngineConfig, scheduler: S) -> Self {
        Self {
            active: BTreeMap::new(),
            scheduler,
            limits: JumpLimits::from_config(config),
            default_duration_ms: config.default_duration_ms,
            frame: Tick::ZERO,
            next_id: TransitionId(0),
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    /// Validate and start a transition.
    ///
    /// On success any running transition for the agent is cancelled with
    /// `Superseded` and the new one continues from the live intent.  On
    /// rejection a `Rejected` event is published and nothing else changes.
    pub fn request(
        &mut self,
        registry: &AgentRegistry,
        roles:    &RoleTable,
        events:   &mut EventChannel,
        request:  TransitionRequest,
        now:      Millis,
    ) -> TransitionResult<TransitionId> {
        let TransitionRequest { agent, from, to, options } = request;
        let record = registry.get(agent).ok_or(TransitionError::UnknownAgent(agent))?;

        let start = match (&from, self.active.contains_key(&agent)) {
            (Some(explicit), false) => explicit.clone(),
            _ => record.current_intent.clone(),
        };

        // Out-of-range endpoints are refused even for unvalidated requests.
        let mut violations: Vec<FieldViolation> = range_violations(&to).collect();
        if let Some(explicit) = &from {
            violations.extend(range_violations(explicit));
        }
        if violations.is_empty() && options.validate {
            let tier = roles.get(record.role).threshold_tier;
            if let Err(err) = validate_jump(agent, &start, &to, tier, &self.limits) {
                violations = err.violations;
            }
        }
        if !violations.is_empty() {
            debug!(%agent, violations = violations.len(), "transition rejected");
            events.publish(&SwarmEvent::Rejected {
                agent,
                from: start,
                to,
                violations: violations.clone(),
                at: now,
            });
            return Err(ValidationError { agent, violations }.into());
        }

        let id = self.next_id;
        self.next_id = id.next();

        if let Some(old) = self.active.remove(&agent) {
            debug!(%agent, old = %old.id, new = %id, "transition superseded");
            events.publish(&SwarmEvent::Cancelled {
                transition: old.id,
                agent,
                reason: CancelReason::Superseded { by: id },
                intent: old.live,
                at: now,
            });
        }

        let duration_ms = options.duration_ms.unwrap_or(self.default_duration_ms);
        let frame = self.frame.offset(1);
        self.scheduler.request_frame(frame, agent);

        events.publish(&SwarmEvent::Started {
            transition: id,
            agent,
            from: start.clone(),
            to: to.clone(),
            duration_ms,
            easing: options.easing,
            at: now,
        });
        debug!(%agent, transition = %id, duration_ms, easing = %options.easing, "transition started");

        self.active.insert(agent, Transition {
            id,
            agent,
            live: start.clone(),
            from: start,
            to,
            duration_ms,
            easing: options.easing,
            started_at: now,
            progress: 0.0,
            valid: options.validate,
            frame,
        });
        Ok(id)
    }

    // ── Frame stepping ────────────────────────────────────────────────────────

    /// Advance one animation frame: every transition due on it is
    /// interpolated to `now`, written to the registry and either rescheduled
    /// or completed.
    pub fn step(
        &mut self,
        registry: &mut AgentRegistry,
        events:   &mut EventChannel,
        now:      Millis,
    ) -> StepReport {
        self.frame = self.frame.offset(1);
        let next = self.frame.offset(1);
        let mut report = StepReport::default();

        for agent in self.scheduler.drain_due(self.frame) {
            let Some(t) = self.active.get_mut(&agent) else { continue };
            let raw = t.raw_progress(now);
            t.progress = raw;

            if raw >= 1.0 {
                let Some(done) = self.active.remove(&agent) else { continue };
                if registry.set_current_intent(agent, done.to.clone()).is_err() {
                    Self::vanished(events, done, now);
                    continue;
                }
                events.publish(&SwarmEvent::Completed {
                    transition: done.id,
                    agent,
                    intent: done.to,
                    at: now,
                });
                debug!(%agent, transition = %done.id, "transition completed");
                report.completed += 1;
            } else {
                let eased = t.easing.apply(raw);
                let intent = interpolate(&t.from, &t.to, eased);
                if registry.set_current_intent(agent, intent.clone()).is_err() {
                    if let Some(gone) = self.active.remove(&agent) {
                        Self::vanished(events, gone, now);
                    }
                    continue;
                }
                t.live = intent.clone();
                t.frame = next;
                events.publish(&SwarmEvent::Progress {
                    transition: t.id,
                    agent,
                    raw,
                    eased,
                    intent,
                    at: now,
                });
                self.scheduler.request_frame(next, agent);
                report.progressed += 1;
            }
        }
        report
    }

    /// Close out a transition whose agent is no longer registered.
    fn vanished(events: &mut EventChannel, t: Transition, now: Millis) {
        debug!(agent = %t.agent, transition = %t.id, "agent vanished mid-transition");
        events.publish(&SwarmEvent::Cancelled {
            transition: t.id,
            agent: t.agent,
            reason: CancelReason::AgentRemoved,
            intent: t.live,
            at: now,
        });
    }

    // ── Cancellation ──────────────────────────────────────────────────────────

    /// Stop `agent`'s transition, leaving it at its last interpolated intent.
    /// Idempotent: returns `None` and publishes nothing when idle.
    pub fn cancel(
        &mut self,
        events: &mut EventChannel,
        agent:  AgentId,
        reason: CancelReason,
        now:    Millis,
    ) -> Option<TransitionId> {
        let t = self.active.remove(&agent)?;
        self.scheduler.cancel_frame(agent);
        debug!(%agent, transition = %t.id, %reason, "transition cancelled");
        events.publish(&SwarmEvent::Cancelled {
            transition: t.id,
            agent,
            reason,
            intent: t.live,
            at: now,
        });
        Some(t.id)
    }

    /// Cancel everything and release every scheduled frame.  Returns the
    /// number of transitions cancelled.
    pub fn cancel_all(&mut self, events: &mut EventChannel, reason: CancelReason, now: Millis) -> usize {
        let active = std::mem::take(&mut self.active);
        self.scheduler.clear();
        let n = active.len();
        for (agent, t) in active {
            events.publish(&SwarmEvent::Cancelled {
                transition: t.id,
                agent,
                reason,
                intent: t.live,
                at: now,
            });
        }
        n
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn get(&self, agent: AgentId) -> Option<&Transition> {
        self.active.get(&agent)
    }

    pub fn is_active(&self, agent: AgentId) -> bool {
        self.active.contains_key(&agent)
    }

    /// Target of `agent`'s running transition.
    pub fn target_of(&self, agent: AgentId) -> Option<&Intent> {
        self.active.get(&agent).map(|t| &t.to)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.active.values()
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> Tick {
        self.frame
    }

    pub fn limits(&self) -> &JumpLimits {
        &self.limits
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
