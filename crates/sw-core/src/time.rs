//! Engine time model.
//!
//! # Design
//!
//! The host drives the engine with an external tick signal and tells it what
//! time it is.  Timestamps are `Millis` (milliseconds on the host's monotonic
//! clock); the engine never reads a wall clock itself.
//!
//! `Tick` counts how many times the host has ticked the engine.  For headless
//! runs and tests, `FrameClock` produces evenly spaced timestamps:
//!
//!   now = start_ms + tick * frame_interval_ms

use std::fmt;

// ── Millis ────────────────────────────────────────────────────────────────────

/// A host timestamp in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero when
    /// the host clock appears to run backwards.
    #[inline]
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of host ticks processed so far.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Fixed-rate clock used when the engine drives itself (`Swarm::run_ticks`).
///
/// `FrameClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Timestamp of tick 0.
    pub start_ms: Millis,
    /// Milliseconds between two ticks.  16 ≈ one 60 Hz animation frame.
    pub frame_interval_ms: u32,
    /// The current tick, advanced by `FrameClock::advance()`.
    pub current_tick: Tick,
}

impl FrameClock {
    pub fn new(start_ms: Millis, frame_interval_ms: u32) -> Self {
        Self {
            start_ms,
            frame_interval_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Milliseconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.frame_interval_ms as u64
    }

    /// Timestamp corresponding to `current_tick`.
    #[inline]
    pub fn now(&self) -> Millis {
        self.start_ms + self.elapsed_ms()
    }

    /// How many ticks span `ms` milliseconds (rounds up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.frame_interval_ms.max(1) as u64)
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.current_tick, self.now())
    }
}
