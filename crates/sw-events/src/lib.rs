//! `sw-events` — how the engine tells the outside world what happened.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`event`]   | `SwarmEvent`, `EventKind`, `CancelReason`, `FieldViolation`  |
//! | [`channel`] | `EventChannel` — subscribe / unsubscribe / publish           |
//! | [`log`]     | `EventLog` — recording subscriber for tests and tooling      |
//! | [`error`]   | `SubscriberError`, `DeliveryError`                           |
//!
//! # Delivery guarantees
//!
//! Publishing is synchronous and never fails: a subscriber that returns an
//! error or panics is logged and skipped, and the remaining subscribers still
//! receive the event.  For one agent's transition the sequence is always
//! `Started → Progress* → (Completed | Cancelled)`; no ordering is promised
//! between different agents.

pub mod channel;
pub mod error;
pub mod event;
pub mod log;

#[cfg(test)]
mod tests;

pub use channel::{Delivery, EventChannel};
pub use error::{DeliveryError, SubscriberError};
pub use event::{CancelReason, EventKind, FieldViolation, SwarmEvent};
pub use log::EventLog;
