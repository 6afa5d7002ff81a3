//! Top-level engine configuration.

use crate::{FrameClock, Millis, SwarmError, SwarmResult};

/// Tunables for the whole engine.
///
/// Typically built in code via `EngineConfig::default()` plus overrides, or
/// loaded from JSON by the host application (enable the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Timestamp of tick 0 for the internal `FrameClock`.
    pub start_ms: Millis,

    /// Milliseconds between host ticks when the engine drives itself.
    pub frame_interval_ms: u32,

    /// Transition duration used when a request does not name one.
    pub default_duration_ms: u64,

    /// Momentum time constant: `m = exp(-Δt / momentum_half_life_ms)`.
    pub momentum_half_life_ms: f32,

    /// Capacity of each agent's emotional history ring buffer.
    pub history_capacity: usize,

    /// Minimum intent change that is worth a transition.
    pub change_epsilon: f32,

    /// Largest accepted per-field jump for ordinary transitions.
    pub standard_max_jump: f32,

    /// Largest accepted per-field jump when a transcendent endpoint (or an
    /// elevated role) is involved.
    pub transcendent_max_jump: f32,

    /// Master RNG seed for generated layouts.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_ms:              Millis::ZERO,
            frame_interval_ms:     16,
            default_duration_ms:   800,
            momentum_half_life_ms: 1_500.0,
            history_capacity:      10,
            change_epsilon:        1e-3,
            standard_max_jump:     0.5,
            transcendent_max_jump: 0.7,
            seed:                  42,
        }
    }
}

impl EngineConfig {
    /// Construct a `FrameClock` pre-configured for this run.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.start_ms, self.frame_interval_ms)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(SwarmError::Config("frame_interval_ms must be > 0".into()));
        }
        if !(self.momentum_half_life_ms > 0.0) {
            return Err(SwarmError::Config("momentum_half_life_ms must be > 0".into()));
        }
        if self.history_capacity == 0 {
            return Err(SwarmError::Config("history_capacity must be > 0".into()));
        }
        if !(self.change_epsilon >= 0.0) {
            return Err(SwarmError::Config("change_epsilon must be >= 0".into()));
        }
        for (name, jump) in [
            ("standard_max_jump", self.standard_max_jump),
            ("transcendent_max_jump", self.transcendent_max_jump),
        ] {
            if !(0.0..=1.0).contains(&jump) {
                return Err(SwarmError::Config(format!("{name} must be within [0, 1]")));
            }
        }
        if self.transcendent_max_jump < self.standard_max_jump {
            return Err(SwarmError::Config(
                "transcendent_max_jump must not be below standard_max_jump".into(),
            ));
        }
        Ok(())
    }
}
