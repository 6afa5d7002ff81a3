//! Synchronous fan-out to registered handlers.

use std::panic::{self, AssertUnwindSafe};

use sw_core::SubscriptionId;
use tracing::warn;

use crate::error::{DeliveryError, SubscriberError};
use crate::event::{EventKind, SwarmEvent};

type Handler = Box<dyn FnMut(&SwarmEvent) -> Result<(), SubscriberError> + Send>;

struct Subscription {
    id:      SubscriptionId,
    /// `None` receives every kind.
    filter:  Option<EventKind>,
    handler: Handler,
}

/// Outcome of one [`EventChannel::publish`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delivery {
    /// Handlers that returned `Ok`.
    pub delivered: usize,
    pub failures:  Vec<DeliveryError>,
}

impl Delivery {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Typed publish/subscribe channel.
///
/// Handlers run in subscription order on the publishing thread.  A handler
/// that errors or panics is reported in the returned [`Delivery`] and logged;
/// it stays subscribed and the rest of the handlers still run.
#[derive(Default)]
pub struct EventChannel {
    subscriptions: Vec<Subscription>,
    next_id:       u64,
    published:     u64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive only events of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&SwarmEvent) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.insert(Some(kind), Box::new(handler))
    }

    /// Receive every event.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&SwarmEvent) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.insert(None, Box::new(handler))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn publish(&mut self, event: &SwarmEvent) -> Delivery {
        self.published += 1;
        let kind = event.kind();
        let mut delivery = Delivery::default();

        for sub in &mut self.subscriptions {
            if sub.filter.is_some_and(|f| f != kind) {
                continue;
            }
            let handler = &mut sub.handler;
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => delivery.delivered += 1,
                Ok(Err(e)) => {
                    warn!(subscription = %sub.id, kind = %kind, error = %e, "event subscriber failed");
                    delivery.failures.push(DeliveryError::Failed(sub.id, e.to_string()));
                }
                Err(_) => {
                    warn!(subscription = %sub.id, kind = %kind, "event subscriber panicked");
                    delivery.failures.push(DeliveryError::Panicked(sub.id));
                }
            }
        }
        delivery
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Total events published since construction.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    fn insert(&mut self, filter: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, filter, handler });
        id
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriptions.len())
            .field("published", &self.published)
            .finish()
    }
}
