//! Aggregating influences into a candidate intent.

use sw_agent::EmotionalHistory;
use sw_core::Millis;
use sw_intent::{BoundedField, EmotionalState, Intent};

/// Resistance to change from a recent emotional switch, in `[0, 1]`.
///
/// `exp(-Δt / half_life_ms)` with Δt measured from the newest recorded
/// change; an agent whose history holds no change has no momentum.
pub fn momentum(history: &EmotionalHistory, now: Millis, half_life_ms: f32) -> f32 {
    if half_life_ms.is_nan() || half_life_ms <= 0.0 {
        return 0.0;
    }
    match history.last_change_at() {
        Some(at) => (-(now.since(at) as f32) / half_life_ms).exp(),
        None => 0.0,
    }
}

/// Running weighted vote and weighted field sums for one target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blend {
    votes:    [f32; EmotionalState::COUNT],
    weighted: [f32; 3],
    total:    f32,
}

impl Blend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source intent with vote weight `adjusted`.  Non-positive or
    /// non-finite weights are ignored.
    pub fn add(&mut self, intent: &Intent, adjusted: f32) {
        if !adjusted.is_finite() || adjusted <= 0.0 {
            return;
        }
        self.votes[intent.emotional_state.ordinal()] += adjusted;
        for (i, field) in BoundedField::ALL.iter().enumerate() {
            self.weighted[i] += field.get(intent) * adjusted;
        }
        self.total += adjusted;
    }

    /// Sum of all accepted weights.
    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total <= 0.0
    }

    pub fn votes(&self) -> &[f32; EmotionalState::COUNT] {
        &self.votes
    }

    /// Weighted average of `field` across sources.
    pub fn average(&self, field: BoundedField) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let i = BoundedField::ALL.iter().position(|&f| f == field)?;
        Some(self.weighted[i] / self.total)
    }

    /// The intent `current` moves to under this blend.
    ///
    /// `current`'s own label gets a self-vote of weight `momentum`; each
    /// numeric field moves toward the average by
    /// `min(total, 1) * (1 - momentum)` of the gap, at most `max_jump`.
    /// Purpose and collaboration mode are left alone.
    pub fn resolve(&self, current: &Intent, momentum: f32, max_jump: f32) -> Intent {
        let m = momentum.clamp(0.0, 1.0);
        let mut votes = self.votes;
        votes[current.emotional_state.ordinal()] += m;
        let label = EmotionalState::dominant(&votes).unwrap_or(current.emotional_state);

        let mut next = current.clone().with_emotion(label);
        if self.is_empty() {
            return next;
        }

        let strength = self.total.min(1.0) * (1.0 - m);
        for (i, field) in BoundedField::ALL.iter().enumerate() {
            let cur = field.get(current);
            let target = self.weighted[i] / self.total;
            let step = ((target - cur) * strength).clamp(-max_jump, max_jump);
            field.set(&mut next, cur + step);
        }
        next
    }
}
