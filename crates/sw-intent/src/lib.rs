//! `sw-intent` — the multi-dimensional behavioral descriptor each agent holds.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`intent`]      | `Intent`, `CollaborationMode`, `EmotionalState`, `BoundedField` |
//! | [`easing`]      | `Easing` curves (`Linear`, `EaseOut`, `Smooth`)            |
//! | [`interpolate`] | `interpolate` — eased blend with staggered discrete snaps  |
//!
//! # Design notes
//!
//! `Intent` is a value type: it is never mutated in place by the engine, only
//! replaced wholesale.  The three bounded numeric fields always stay within
//! `[0, 1]`; constructors and builder methods clamp, and interpolation never
//! leaves the segment between its endpoints.

pub mod easing;
pub mod intent;
pub mod interpolate;

#[cfg(test)]
mod tests;

pub use easing::{Easing, PHI};
pub use intent::{BoundedField, CollaborationMode, EmotionalState, Intent};
pub use interpolate::{interpolate, EMOTION_SWITCH_AT, MODE_SWITCH_AT, PURPOSE_SWITCH_AT};
