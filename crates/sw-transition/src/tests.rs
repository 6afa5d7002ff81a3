//! Unit tests for sw-transition.

use sw_agent::{AgentRegistry, AgentSpec, Role, RoleTable};
use sw_core::{AgentId, EngineConfig, Millis, Point, Tick};
use sw_events::{CancelReason, EventChannel, EventKind, EventLog, SwarmEvent};
use sw_intent::{CollaborationMode, Easing, EmotionalState, Intent};

use crate::{FrameScheduler, TransitionError, TransitionManager, TransitionOptions, TransitionRequest};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Rig {
    registry: AgentRegistry,
    roles:    RoleTable,
    events:   EventChannel,
    log:      EventLog,
    manager:  TransitionManager,
}

impl Rig {
    fn new() -> Self {
        let config = EngineConfig::default();
        let mut events = EventChannel::new();
        let log = EventLog::new();
        log.attach(&mut events);
        Self {
            registry: AgentRegistry::new(config.history_capacity),
            roles: RoleTable::standard(),
            events,
            log,
            manager: TransitionManager::new(&config),
        }
    }

    fn agent(&mut self, role: Role, intent: Intent) -> AgentId {
        self.registry
            .register(AgentSpec::new(role, Point::ORIGIN).intent(intent), Millis::ZERO)
    }

    fn request(&mut self, req: TransitionRequest, now: u64) -> Result<sw_core::TransitionId, TransitionError> {
        self.manager
            .request(&self.registry, &self.roles, &mut self.events, req, Millis(now))
    }

    fn step(&mut self, now: u64) -> crate::StepReport {
        self.manager.step(&mut self.registry, &mut self.events, Millis(now))
    }

    fn intent(&self, id: AgentId) -> Intent {
        self.registry.get(id).unwrap().current_intent.clone()
    }
}

fn calm() -> Intent {
    Intent::default().with_activity(0.2).with_focus(0.5).with_social(0.5)
}

// ── FrameQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame_queue {
    use crate::{FrameQueue, FrameScheduler};
    use sw_core::{AgentId, Tick};

    #[test]
    fn drains_due_frames_in_id_order() {
        let mut q = FrameQueue::new();
        q.request_frame(Tick(2), AgentId(7));
        q.request_frame(Tick(1), AgentId(3));
        q.request_frame(Tick(2), AgentId(1));
        q.request_frame(Tick(5), AgentId(0));

        assert_eq!(q.pending(), 4);
        assert_eq!(q.drain_due(Tick(2)), vec![AgentId(1), AgentId(3), AgentId(7)]);
        assert_eq!(q.pending(), 1);
        assert_eq!(q.next_frame(), Some(Tick(5)));
        assert!(q.drain_due(Tick(4)).is_empty());
    }

    #[test]
    fn rerequest_moves_the_pending_frame() {
        let mut q = FrameQueue::new();
        q.request_frame(Tick(1), AgentId(1));
        q.request_frame(Tick(3), AgentId(1));
        assert_eq!(q.pending(), 1);
        assert_eq!(q.frame_of(AgentId(1)), Some(Tick(3)));
        assert!(q.drain_due(Tick(1)).is_empty());
        assert_eq!(q.drain_due(Tick(3)), vec![AgentId(1)]);
    }

    #[test]
    fn cancel_releases_frame() {
        let mut q = FrameQueue::new();
        q.request_frame(Tick(1), AgentId(1));
        assert!(q.cancel_frame(AgentId(1)));
        assert!(!q.cancel_frame(AgentId(1)));
        assert_eq!(q.pending(), 0);
        assert_eq!(q.next_frame(), None);
    }

    #[test]
    fn clear_empties_everything() {
        let mut q = FrameQueue::new();
        for i in 0..5 {
            q.request_frame(Tick(i), AgentId(i as u32));
        }
        q.clear();
        assert_eq!(q.pending(), 0);
        assert!(q.drain_due(Tick(10)).is_empty());
    }
}

// ── Validation boundary ───────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;
    use crate::{validate_bounds, validate_jump, JumpLimits};
    use sw_agent::ThresholdTier;
    use sw_events::FieldViolation;
    use sw_intent::BoundedField;

    #[test]
    fn standard_threshold_is_inclusive() {
        let limits = JumpLimits::default();
        let from = calm();
        assert!(validate_jump(AgentId(0), &from, &from.clone().with_activity(0.7), ThresholdTier::Standard, &limits).is_ok());
        let err = validate_jump(AgentId(0), &from, &from.clone().with_activity(0.71), ThresholdTier::Standard, &limits)
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(matches!(
            err.violations[0],
            FieldViolation::Jump { field: BoundedField::ActivityLevel, threshold, .. } if threshold == 0.5
        ));
    }

    #[test]
    fn transcendent_endpoint_loosens_threshold() {
        let limits = JumpLimits::default();
        let from = calm().with_activity(0.1);
        let to = from.clone().with_activity(0.8).with_mode(CollaborationMode::Transcendent);
        assert!(validate_jump(AgentId(0), &from, &to, ThresholdTier::Standard, &limits).is_ok());

        let too_far = to.clone().with_activity(0.81);
        assert!(validate_jump(AgentId(0), &from, &too_far, ThresholdTier::Standard, &limits).is_err());

        // Transcendent on the starting side counts too.
        let back = from.clone().with_mode(CollaborationMode::Individual);
        let start = to.clone();
        assert!(validate_jump(AgentId(0), &start, &back, ThresholdTier::Standard, &limits).is_ok());
    }

    #[test]
    fn elevated_tier_uses_loose_threshold() {
        let limits = JumpLimits::default();
        let from = calm().with_focus(0.1);
        let to = from.clone().with_focus(0.8);
        assert!(validate_jump(AgentId(0), &from, &to, ThresholdTier::Standard, &limits).is_err());
        assert!(validate_jump(AgentId(0), &from, &to, ThresholdTier::Elevated, &limits).is_ok());
    }

    #[test]
    fn reports_every_offending_field() {
        let limits = JumpLimits::default();
        let from = Intent::default().with_activity(0.0).with_focus(0.0).with_social(0.0);
        let to = Intent::default().with_activity(1.0).with_focus(1.0).with_social(0.4);
        let err = validate_jump(AgentId(3), &from, &to, ThresholdTier::Standard, &limits).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec![BoundedField::ActivityLevel, BoundedField::FocusIntensity]);
        assert_eq!(err.agent, AgentId(3));
    }

    #[test]
    fn rejection_publishes_one_event_and_changes_nothing() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let before = rig.intent(a);

        let err = rig.request(TransitionRequest::new(a, calm().with_activity(0.9)), 0).unwrap_err();
        assert!(matches!(err, TransitionError::Validation(_)));
        assert_eq!(rig.log.count(EventKind::Rejected), 1);
        assert_eq!(rig.log.len(), 1);
        assert!(!rig.manager.is_active(a));

        rig.step(16);
        assert_eq!(rig.intent(a), before);
    }

    #[test]
    fn rejection_leaves_running_transition_alone() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let first = rig.request(TransitionRequest::new(a, calm().with_activity(0.6)), 0).unwrap();
        rig.step(100);

        // Live activity is still near 0.2, so 1.0 is too far.
        assert!(rig.request(TransitionRequest::new(a, calm().with_activity(1.0)), 100).is_err());
        assert_eq!(rig.manager.get(a).map(|t| t.id), Some(first));
        assert_eq!(rig.log.count(EventKind::Cancelled), 0);
    }

    #[test]
    fn unvalidated_request_skips_rule() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let opts = TransitionOptions::default().unvalidated();
        let id = rig.request(TransitionRequest::new(a, calm().with_activity(1.0)).options(opts), 0);
        assert!(id.is_ok());
        assert!(!rig.manager.get(a).unwrap().valid);
    }

    #[test]
    fn nan_delta_never_passes() {
        let limits = JumpLimits::default();
        let mut to = calm();
        to.activity_level = f32::NAN;
        let err = validate_jump(AgentId(0), &calm(), &to, ThresholdTier::Elevated, &limits).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field(), BoundedField::ActivityLevel);
    }

    #[test]
    fn bounds_reject_out_of_range_and_nan() {
        let mut over = calm();
        over.activity_level = 1.3;
        over.social_alignment = -0.1;
        let err = validate_bounds(AgentId(2), &over).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec![BoundedField::ActivityLevel, BoundedField::SocialAlignment]);
        assert!(matches!(err.violations[0], FieldViolation::OutOfRange { value, .. } if value == 1.3));

        let mut nan = calm();
        nan.focus_intensity = f32::NAN;
        assert!(validate_bounds(AgentId(2), &nan).is_err());
        assert!(validate_bounds(AgentId(2), &Intent::default().with_activity(1.0)).is_ok());
    }

    #[test]
    fn out_of_range_target_is_rejected_before_any_write() {
        for bad in [1.3_f32, f32::NAN] {
            let mut rig = Rig::new();
            let a = rig.agent(Role::Worker, calm().with_activity(0.9));
            let before = rig.intent(a);
            let mut to = rig.intent(a);
            to.activity_level = bad;

            let opts = TransitionOptions::default().duration(0);
            let err = rig.request(TransitionRequest::new(a, to).options(opts), 0).unwrap_err();
            assert!(matches!(err, TransitionError::Validation(_)));
            assert_eq!(rig.log.count(EventKind::Rejected), 1);
            assert!(!rig.manager.is_active(a));

            rig.step(16);
            assert_eq!(rig.intent(a), before);
            assert!(rig.intent(a).is_bounded());
        }
    }

    #[test]
    fn unvalidated_request_still_checks_bounds() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let mut to = calm();
        to.focus_intensity = 2.0;
        let opts = TransitionOptions::default().unvalidated();
        assert!(rig.request(TransitionRequest::new(a, to).options(opts), 0).is_err());
        assert_eq!(rig.log.count(EventKind::Rejected), 1);
    }

    #[test]
    fn out_of_range_explicit_start_is_rejected() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let mut from = calm();
        from.activity_level = f32::NAN;
        assert!(rig.request(TransitionRequest::new(a, calm()).from(from), 0).is_err());
        assert!(!rig.manager.is_active(a));
    }

    #[test]
    fn unknown_agent_is_an_error() {
        let mut rig = Rig::new();
        let err = rig.request(TransitionRequest::new(AgentId(99), calm()), 0).unwrap_err();
        assert_eq!(err, TransitionError::UnknownAgent(AgentId(99)));
        assert!(rig.log.is_empty());
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn started_progress_completed_in_order() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let target = calm()
            .with_activity(0.6)
            .with_emotion(EmotionalState::Excited)
            .with_purpose("explore");
        rig.request(TransitionRequest::new(a, target.clone()), 0).unwrap();

        let mut now = 0;
        while rig.manager.is_active(a) {
            now += 16;
            rig.step(now);
            assert!(now < 2_000, "transition never completed");
        }

        assert_eq!(rig.intent(a), target);
        let kinds: Vec<_> = rig.log.for_agent(a).iter().map(SwarmEvent::kind).collect();
        assert_eq!(kinds.first(), Some(&EventKind::Started));
        assert_eq!(kinds.last(), Some(&EventKind::Completed));
        assert!(kinds[1..kinds.len() - 1].iter().all(|&k| k == EventKind::Progress));
        assert_eq!(rig.manager.scheduler().pending(), 0);
    }

    #[test]
    fn completion_writes_target_exactly() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let target = calm().with_activity(0.333_333).with_social(0.123_456);
        rig.request(TransitionRequest::new(a, target.clone()).options(TransitionOptions::default().duration(100)), 0)
            .unwrap();
        for now in [16, 48, 80, 112] {
            rig.step(now);
        }
        assert_eq!(rig.intent(a), target);
        match rig.log.events().last() {
            Some(SwarmEvent::Completed { intent, .. }) => assert_eq!(intent, &target),
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn sub_frame_duration_completes_every_switch_at_once() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let target = calm()
            .with_mode(CollaborationMode::Collective)
            .with_emotion(EmotionalState::Focused)
            .with_purpose("debug");
        let opts = TransitionOptions::default().duration(5).easing(Easing::Linear);
        rig.request(TransitionRequest::new(a, target.clone()).options(opts), 0).unwrap();

        let report = rig.step(16);
        assert_eq!(report.completed, 1);
        assert_eq!(rig.log.count_for(a, EventKind::Progress), 0);
        assert_eq!(rig.intent(a), target);
    }

    #[test]
    fn request_is_stepped_on_the_following_frame() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        rig.step(0);
        rig.request(TransitionRequest::new(a, calm().with_activity(0.4)), 0).unwrap();
        assert_eq!(rig.manager.get(a).unwrap().frame, Tick(2));
        assert_eq!(rig.log.count(EventKind::Progress), 0);
        rig.step(16);
        assert_eq!(rig.log.count(EventKind::Progress), 1);
    }

    #[test]
    fn fields_stay_bounded_and_monotone_for_every_easing() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::Smooth] {
            let mut rig = Rig::new();
            let a = rig.agent(Role::Worker, calm().with_activity(0.0).with_focus(1.0));
            let target = calm().with_activity(0.5).with_focus(0.5);
            let opts = TransitionOptions::default().duration(400).easing(easing);
            rig.request(TransitionRequest::new(a, target.clone()).options(opts), 0).unwrap();

            let mut last = 0.0_f32;
            for now in (10..=420).step_by(10) {
                rig.step(now);
                let i = rig.intent(a);
                assert!(i.is_bounded(), "{easing}: {i}");
                assert!((0.0..=0.5).contains(&i.activity_level), "{easing} overshoot: {i}");
                assert!((0.5..=1.0).contains(&i.focus_intensity), "{easing} overshoot: {i}");
                assert!(i.activity_level >= last, "{easing} went backwards");
                last = i.activity_level;
            }
            assert_eq!(rig.intent(a), target);
        }
    }
}

// ── Single active transition ──────────────────────────────────────────────────

#[cfg(test)]
mod supersede {
    use super::*;

    #[test]
    fn newest_request_wins_from_live_intent() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let first = rig.request(TransitionRequest::new(a, calm().with_activity(0.6)), 0).unwrap();
        rig.step(16);
        rig.step(400);
        let live = rig.intent(a);
        assert!(live.activity_level > 0.2 && live.activity_level < 0.6);

        let second_target = calm().with_activity(0.3).with_emotion(EmotionalState::Protective);
        let second = rig.request(TransitionRequest::new(a, second_target.clone()), 400).unwrap();
        assert_ne!(first, second);
        assert_eq!(rig.manager.active_count(), 1);
        assert_eq!(rig.manager.get(a).unwrap().from, live);

        let cancelled: Vec<_> = rig
            .log
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SwarmEvent::Cancelled { transition, reason, intent, .. } => Some((transition, reason, intent)),
                _ => None,
            })
            .collect();
        assert_eq!(cancelled, vec![(first, CancelReason::Superseded { by: second }, live)]);

        let mut now = 400;
        while rig.manager.is_active(a) {
            now += 16;
            rig.step(now);
        }
        assert_eq!(rig.log.count_for(a, EventKind::Started), 2);
        assert_eq!(rig.log.count_for(a, EventKind::Cancelled), 1);
        assert_eq!(rig.log.count_for(a, EventKind::Completed), 1);
        assert_eq!(rig.intent(a), second_target);
    }

    #[test]
    fn supersede_validates_against_live_intent() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm().with_activity(0.0));
        let opts = TransitionOptions::default().duration(100).easing(Easing::Linear);
        rig.request(TransitionRequest::new(a, calm().with_activity(0.5)).options(opts), 0).unwrap();
        rig.step(16);
        rig.step(50);
        // Live activity is 0.25; 0.9 is within 0.5 of the original 0.5 target
        // but not of where the agent actually is.
        assert!(rig.request(TransitionRequest::new(a, calm().with_activity(0.9)), 50).is_err());
        assert!(rig.request(TransitionRequest::new(a, calm().with_activity(0.7)), 50).is_ok());
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let id = rig.request(TransitionRequest::new(a, calm().with_activity(0.6)), 0).unwrap();
        rig.step(16);

        let now = Millis(20);
        assert_eq!(rig.manager.cancel(&mut rig.events, a, CancelReason::Explicit, now), Some(id));
        assert_eq!(rig.manager.cancel(&mut rig.events, a, CancelReason::Explicit, now), None);
        assert_eq!(rig.log.count(EventKind::Cancelled), 1);
        assert_eq!(rig.manager.scheduler().pending(), 0);

        // The agent keeps its last interpolated intent.
        let left = rig.intent(a);
        rig.step(32);
        assert_eq!(rig.intent(a), left);
    }

    #[test]
    fn cancel_idle_agent_publishes_nothing() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Scout, calm());
        assert_eq!(rig.manager.cancel(&mut rig.events, a, CancelReason::Explicit, Millis(0)), None);
        assert!(rig.log.is_empty());
    }

    #[test]
    fn cancel_all_clears_frames() {
        let mut rig = Rig::new();
        let ids: Vec<_> = (0..4).map(|_| rig.agent(Role::Worker, calm())).collect();
        for &a in &ids {
            rig.request(TransitionRequest::new(a, calm().with_activity(0.5)), 0).unwrap();
        }
        assert_eq!(rig.manager.cancel_all(&mut rig.events, CancelReason::Cleanup, Millis(1)), 4);
        assert_eq!(rig.manager.active_count(), 0);
        assert_eq!(rig.manager.scheduler().pending(), 0);
        assert_eq!(rig.log.count(EventKind::Cancelled), 4);
        assert_eq!(rig.manager.cancel_all(&mut rig.events, CancelReason::Cleanup, Millis(2)), 0);
    }

    #[test]
    fn removed_agent_is_cancelled_on_step() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let id = rig.request(TransitionRequest::new(a, calm().with_activity(0.5)), 0).unwrap();
        rig.registry.remove(a);
        let report = rig.step(16);
        assert_eq!(report.stepped(), 0);
        assert!(!rig.manager.is_active(a));

        let cancelled: Vec<_> = rig
            .log
            .for_agent(a)
            .into_iter()
            .filter(|e| e.kind() == EventKind::Cancelled)
            .collect();
        assert_eq!(cancelled.len(), 1);
        assert!(matches!(
            cancelled[0],
            SwarmEvent::Cancelled { transition, reason: CancelReason::AgentRemoved, .. } if transition == id
        ));
        assert_eq!(rig.log.count_for(a, EventKind::Completed), 0);
    }

    #[test]
    fn removed_agent_due_to_complete_is_cancelled() {
        let mut rig = Rig::new();
        let a = rig.agent(Role::Worker, calm());
        let opts = TransitionOptions::default().duration(0);
        rig.request(TransitionRequest::new(a, calm().with_activity(0.5)).options(opts), 0).unwrap();
        rig.registry.remove(a);
        let report = rig.step(16);
        assert_eq!(report.completed, 0);
        assert_eq!(rig.log.count_for(a, EventKind::Cancelled), 1);
        assert_eq!(rig.log.count_for(a, EventKind::Completed), 0);
    }
}
