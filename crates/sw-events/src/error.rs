use sw_core::SubscriptionId;
use thiserror::Error;

/// Error type returned by subscriber handlers.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single failed delivery, reported back from [`EventChannel::publish`][crate::EventChannel::publish].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("subscriber {0} failed: {1}")]
    Failed(SubscriptionId, String),

    #[error("subscriber {0} panicked")]
    Panicked(SubscriptionId),
}
