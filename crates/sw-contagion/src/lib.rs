//! `sw-contagion` — how agents sway each other's emotional state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`influence`] | `Influence`, `InfluenceSource`, `Impulse`, decay helpers   |
//! | [`blend`]     | `Blend` (weighted vote + average), `momentum`              |
//! | [`engine`]    | `ContagionEngine`, `ContagionReport`, `ContagionOutcome`   |
//!
//! # One contagion pass
//!
//! ```text
//! for every (source, target) pair from the neighbor sets:
//!     decayed  = weight(source) * max(0, 1 - distance / radius(source))
//!     adjusted = decayed * (1 - resistance(target))
//! for every influenced target:
//!     m      = exp(-Δt / half_life)          Δt since last recorded change
//!     label  = vote(adjusted per source label + m for own label)
//!     fields += min(Σadjusted, 1) * (1 - m) * (weighted avg - current),
//!               each step clamped to the max jump
//!     request a transition if the result differs from the current intent
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Candidate computation runs on Rayon's thread pool.     |

pub mod blend;
pub mod engine;
pub mod influence;


pub use blend::{momentum, Blend};
pub use engine::{ContagionEngine, ContagionOutcome, ContagionReport};
pub use influence::{adjusted_magnitude, decayed_magnitude, Impulse, Influence, InfluenceSource};
