//! Unit tests for sw-events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sw_core::{AgentId, Millis, TransitionId};
use sw_intent::{Easing, EmotionalState, Intent};

use crate::{CancelReason, EventChannel, EventKind, EventLog, SwarmEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn started(agent: u32, transition: u64) -> SwarmEvent {
    SwarmEvent::Started {
        transition:  TransitionId(transition),
        agent:       AgentId(agent),
        from:        Intent::default(),
        to:          Intent::default().with_emotion(EmotionalState::Excited),
        duration_ms: 800,
        easing:      Easing::Smooth,
        at:          Millis(0),
    }
}

fn completed(agent: u32, transition: u64) -> SwarmEvent {
    SwarmEvent::Completed {
        transition: TransitionId(transition),
        agent:      AgentId(agent),
        intent:     Intent::default().with_emotion(EmotionalState::Excited),
        at:         Millis(800),
    }
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Arc<AtomicUsize>) {
    let c = Arc::new(AtomicUsize::new(0));
    let c2 = c.clone();
    (c, move || c2.clone())
}

// ── SwarmEvent accessors ──────────────────────────────────────────────────────

#[cfg(test)]
mod event {
    use super::*;

    #[test]
    fn accessors_report_payload() {
        let e = started(4, 9);
        assert_eq!(e.kind(), EventKind::Started);
        assert_eq!(e.agent(), AgentId(4));
        assert_eq!(e.transition(), Some(TransitionId(9)));
        assert!(!e.is_terminal());
        assert!(completed(4, 9).is_terminal());
    }

    #[test]
    fn rejected_has_no_transition() {
        let e = SwarmEvent::Rejected {
            agent:      AgentId(1),
            from:       Intent::default(),
            to:         Intent::default().with_activity(1.0),
            violations: Vec::new(),
            at:         Millis(5),
        };
        assert_eq!(e.transition(), None);
        assert_eq!(e.at(), Millis(5));
    }

    #[test]
    fn cancel_reason_display() {
        let r = CancelReason::Superseded { by: TransitionId(3) };
        assert_eq!(r.to_string(), "superseded by TransitionId(3)");
        assert_eq!(CancelReason::Cleanup.to_string(), "cleanup");
    }
}

// ── EventChannel ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod channel {
    use super::*;

    #[test]
    fn kind_filter_applies() {
        let mut ch = EventChannel::new();
        let (hits, handle) = counter();
        let h = handle();
        ch.subscribe(EventKind::Completed, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        ch.publish(&started(1, 1));
        ch.publish(&completed(1, 1));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(ch.published(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut ch = EventChannel::new();
        let (hits, handle) = counter();
        let h = handle();
        let id = ch.subscribe_all(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        ch.publish(&started(1, 1));
        assert!(ch.unsubscribe(id));
        assert!(!ch.unsubscribe(id));
        ch.publish(&started(1, 2));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(ch.subscriber_count(), 0);
    }

    #[test]
    fn failing_subscriber_does_not_block_others() {
        let mut ch = EventChannel::new();
        let (hits, handle) = counter();

        let bad = ch.subscribe_all(|_| Err("disk full".into()));
        let h = handle();
        ch.subscribe_all(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let delivery = ch.publish(&started(1, 1));
        assert_eq!(delivery.delivered, 1);
        assert_eq!(delivery.failures.len(), 1);
        assert!(matches!(&delivery.failures[0], crate::DeliveryError::Failed(id, msg)
            if *id == bad && msg == "disk full"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_subscriber_is_isolated() {
        let mut ch = EventChannel::new();
        let (hits, handle) = counter();

        let h = handle();
        ch.subscribe_all(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let bad = ch.subscribe_all(|_| panic!("subscriber bug"));
        let h = handle();
        ch.subscribe_all(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let delivery = ch.publish(&started(1, 1));
        assert_eq!(delivery.delivered, 2);
        assert_eq!(delivery.failures, vec![crate::DeliveryError::Panicked(bad)]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        // Still subscribed, still isolated on the next publish.
        let again = ch.publish(&completed(1, 1));
        assert_eq!(again.delivered, 2);
        assert!(!again.is_clean());
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let mut ch = EventChannel::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        for tag in 0..3 {
            let o = order.clone();
            ch.subscribe_all(move |_| {
                o.lock().unwrap().push(tag);
                Ok(())
            });
        }
        ch.publish(&started(1, 1));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod log {
    use super::*;

    #[test]
    fn records_in_publication_order() {
        let mut ch = EventChannel::new();
        let log = EventLog::new();
        log.attach(&mut ch);

        ch.publish(&started(1, 1));
        ch.publish(&started(2, 2));
        ch.publish(&completed(1, 1));

        assert_eq!(log.len(), 3);
        let kinds: Vec<_> = log.for_agent(AgentId(1)).iter().map(SwarmEvent::kind).collect();
        assert_eq!(kinds, vec![EventKind::Started, EventKind::Completed]);
        assert_eq!(log.count(EventKind::Started), 2);
        assert_eq!(log.count_for(AgentId(2), EventKind::Completed), 0);
    }

    #[test]
    fn clones_share_buffer() {
        let mut ch = EventChannel::new();
        let log = EventLog::new();
        let view = log.clone();
        log.attach(&mut ch);

        ch.publish(&started(1, 1));
        assert_eq!(view.len(), 1);
        view.clear();
        assert!(log.is_empty());
    }
}
