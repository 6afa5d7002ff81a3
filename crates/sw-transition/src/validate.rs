//! The max-jump safety rule.
//!
//! A transition may not move any bounded numeric field by more than the
//! applicable threshold in one request.  The looser threshold applies when
//! either endpoint is in `Transcendent` collaboration mode or the agent's role
//! is on the elevated tier.
//!
//! Independently of the jump rule, an endpoint whose bounded fields leave
//! `[0, 1]` (or are NaN) is never accepted.

use sw_agent::ThresholdTier;
use sw_core::{AgentId, EngineConfig};
use sw_events::FieldViolation;
use sw_intent::{BoundedField, Intent};

use crate::ValidationError;

/// Slack for float representation; a jump of exactly the threshold passes.
pub const JUMP_TOLERANCE: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JumpLimits {
    pub standard:     f32,
    pub transcendent: f32,
}

impl Default for JumpLimits {
    fn default() -> Self {
        Self { standard: 0.5, transcendent: 0.7 }
    }
}

impl JumpLimits {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            standard:     config.standard_max_jump,
            transcendent: config.transcendent_max_jump,
        }
    }

    /// Threshold for a jump from `from` to `to` by an agent on `tier`.
    pub fn threshold(&self, from: &Intent, to: &Intent, tier: ThresholdTier) -> f32 {
        let loose = from.collaboration_mode.is_transcendent()
            || to.collaboration_mode.is_transcendent()
            || tier == ThresholdTier::Elevated;
        if loose { self.transcendent } else { self.standard }
    }
}

/// Fields of `intent` outside `[0, 1]`, NaN included.
pub fn range_violations(intent: &Intent) -> impl Iterator<Item = FieldViolation> + '_ {
    BoundedField::ALL.iter().filter_map(move |&field| {
        let value = field.get(intent);
        (!(0.0..=1.0).contains(&value)).then_some(FieldViolation::OutOfRange { field, value })
    })
}

/// Reject an intent that could not be written to an agent.
pub fn validate_bounds(agent: AgentId, intent: &Intent) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = range_violations(intent).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { agent, violations })
    }
}

/// Check every bounded field; all violations are reported, not just the first.
///
/// A NaN delta never passes.
pub fn validate_jump(
    agent:  AgentId,
    from:   &Intent,
    to:     &Intent,
    tier:   ThresholdTier,
    limits: &JumpLimits,
) -> Result<(), ValidationError> {
    let threshold = limits.threshold(from, to, tier);
    let violations: Vec<FieldViolation> = BoundedField::ALL
        .iter()
        .filter_map(|&field| {
            let delta = (field.get(to) - field.get(from)).abs();
            (delta.is_nan() || delta > threshold + JUMP_TOLERANCE)
                .then_some(FieldViolation::Jump { field, delta, threshold })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { agent, violations })
    }
}
