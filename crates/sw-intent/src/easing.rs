//! Easing curves mapping raw transition progress onto eased progress.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic, and fixes both
//! endpoints, so an eased interpolation can never overshoot its target.

/// The golden ratio, used as the exponent of [`Easing::Smooth`].
pub const PHI: f32 = 1.618_034;

/// Selectable easing curve for a transition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// `t`
    Linear,
    /// Quadratic ease-out: `1 - (1 - t)²`.  Fast start, gentle landing.
    EaseOut,
    /// `t^φ`.  Slow start, fast finish.
    #[default]
    Smooth,
}

impl Easing {
    /// Map raw progress `t` (clamped to `[0, 1]`) to eased progress.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Easing::Linear  => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Smooth  => t.powf(PHI),
        };
        eased.clamp(0.0, 1.0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Easing::Linear  => "linear",
            Easing::EaseOut => "ease-out",
            Easing::Smooth  => "smooth",
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
