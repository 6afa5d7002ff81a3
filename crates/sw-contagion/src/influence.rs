//! Influence records and the decay rule.

use std::fmt;

use sw_core::AgentId;
use sw_intent::Intent;

/// Who is exerting an influence.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfluenceSource {
    Agent(AgentId),
    /// An administrative impulse with no agent behind it.
    Virtual,
}

impl fmt::Display for InfluenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfluenceSource::Agent(id) => write!(f, "{id}"),
            InfluenceSource::Virtual   => f.write_str("virtual"),
        }
    }
}

/// `weight * max(0, 1 - distance / radius)`.
///
/// A non-positive radius only reaches a source's own position.
pub fn decayed_magnitude(weight: f32, distance: f32, radius: f32) -> f32 {
    if radius.is_nan() || radius <= 0.0 {
        return if distance <= 0.0 { weight } else { 0.0 };
    }
    weight * (1.0 - distance / radius).max(0.0)
}

/// Scale `decayed` by what the target lets through.
pub fn adjusted_magnitude(decayed: f32, resistance: f32) -> f32 {
    decayed * (1.0 - resistance.clamp(0.0, 1.0))
}

/// One directed source → target influence for the current pass.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Influence {
    pub source:            InfluenceSource,
    pub target:            AgentId,
    pub weight:            f32,
    pub distance:          f32,
    pub radius:            f32,
    pub decayed_magnitude: f32,
    /// After the target's resistance; this is the vote weight.
    pub adjusted:          f32,
}

impl Influence {
    pub fn new(
        source:     InfluenceSource,
        target:     AgentId,
        weight:     f32,
        distance:   f32,
        radius:     f32,
        resistance: f32,
    ) -> Self {
        let decayed = decayed_magnitude(weight, distance, radius);
        Self {
            source,
            target,
            weight,
            distance,
            radius,
            decayed_magnitude: decayed,
            adjusted: adjusted_magnitude(decayed, resistance),
        }
    }

    /// `true` if this influence carries any weight after decay and resistance.
    pub fn is_active(&self) -> bool {
        self.adjusted > 0.0
    }
}

/// An injected wave: an influence that bypasses the proximity index.
///
/// Defaults to a virtual source at distance 0 with weight 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impulse {
    pub source:   InfluenceSource,
    /// The intent the wave pushes toward.
    pub intent:   Intent,
    pub weight:   f32,
    pub distance: f32,
    pub radius:   f32,
}

impl Impulse {
    pub fn new(intent: Intent) -> Self {
        Self {
            source:   InfluenceSource::Virtual,
            intent,
            weight:   1.0,
            distance: 0.0,
            radius:   1.0,
        }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Place the source `distance` away with reach `radius`.
    pub fn at(mut self, distance: f32, radius: f32) -> Self {
        self.distance = distance;
        self.radius = radius;
        self
    }

    pub fn from_agent(mut self, id: AgentId) -> Self {
        self.source = InfluenceSource::Agent(id);
        self
    }
}
