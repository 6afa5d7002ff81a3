use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sw_core::{AgentId, SubscriptionId};

use crate::channel::EventChannel;
use crate::event::{EventKind, SwarmEvent};

/// Recording subscriber.  Clones share one buffer, so a test can keep a
/// handle while the channel owns the subscribed closure.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SwarmEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a recorder for every event kind.
    pub fn attach(&self, channel: &mut EventChannel) -> SubscriptionId {
        let sink = self.clone();
        channel.subscribe_all(move |event| {
            sink.lock().push(event.clone());
            Ok(())
        })
    }

    pub fn events(&self) -> Vec<SwarmEvent> {
        self.lock().clone()
    }

    /// Events for one agent, in publication order.
    pub fn for_agent(&self, agent: AgentId) -> Vec<SwarmEvent> {
        self.lock().iter().filter(|e| e.agent() == agent).cloned().collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn count_for(&self, agent: AgentId, kind: EventKind) -> usize {
        self.lock()
            .iter()
            .filter(|e| e.agent() == agent && e.kind() == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SwarmEvent>> {
        // A panicking reader cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
